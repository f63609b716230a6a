//! Typed client for the [OpenUV.io](https://www.openuv.io) UV index API.
//!
//! This crate defines:
//! - Parameter resolution, with a pluggable geolocation fallback
//! - Query construction and response decoding for the three endpoints
//! - Strongly typed result records
//! - A client that binds a single API key, and on-disk configuration
//!
//! It is used by `openuv-cli`, but can also be reused by other binaries or services.

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod location;
pub mod model;
pub mod resolve;
pub mod transport;
pub mod url;

pub use api::OpenUvApi;
pub use client::OpenUvClient;
pub use config::{Config, LocationConfig};
pub use error::{OpenUvError, Result};
pub use location::{FixedLocation, Geolocator, LocationError, Position};
pub use model::*;
pub use transport::{RawResponse, ReqwestTransport, Transport};
pub use url::Endpoint;
