//! Source of the caller's position when coordinates are not passed explicitly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Position reported by a [`Geolocator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location error: {0}")]
    Other(String),
}

/// One-shot "get current position" capability.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Geolocator that always reports the same position, e.g. a configured home location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Position);

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Self {
        Self(Position {
            latitude,
            longitude,
            altitude,
        })
    }
}

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Position, LocationError> {
        Ok(self.0)
    }
}
