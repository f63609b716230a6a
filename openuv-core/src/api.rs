//! The three OpenUV operations over a shared resolve → build → fetch → decode pipeline.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    decode::decode_response,
    error::Result,
    location::Geolocator,
    model::{ForecastResponse, ProtectionParams, ProtectionTimeResponse, RealTimeUvResponse, UvParams},
    resolve::{QueryParams, resolve_params, threshold_params},
    transport::{ReqwestTransport, Transport},
    url::{DEFAULT_BASE_URL, Endpoint, build_url},
};

/// Stateless entry point; every call takes the API key explicitly.
#[derive(Debug, Clone)]
pub struct OpenUvApi {
    transport: Arc<dyn Transport>,
    geolocator: Option<Arc<dyn Geolocator>>,
    base_url: String,
}

impl Default for OpenUvApi {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenUvApi {
    pub fn new() -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            geolocator: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get real-time UV index by location. Altitude, ozone level and datetime are optional.
    pub async fn get_real_time_uv(
        &self,
        api_key: &str,
        options: Option<&UvParams>,
    ) -> Result<RealTimeUvResponse> {
        let query = self.coordinate_query(options).await?;
        self.request(Endpoint::Uv, api_key, &query).await
    }

    /// Get the hourly UV index forecast for the day of `dt` (today by default).
    pub async fn get_forecast(
        &self,
        api_key: &str,
        options: Option<&UvParams>,
    ) -> Result<ForecastResponse> {
        let query = self.coordinate_query(options).await?;
        self.request(Endpoint::Forecast, api_key, &query).await
    }

    /// Get the protection window between the UV `from` and `to` thresholds,
    /// with 10 minutes accuracy.
    pub async fn get_daily_protection_time(
        &self,
        api_key: &str,
        options: Option<&ProtectionParams>,
    ) -> Result<ProtectionTimeResponse> {
        let query = self.protection_query(options).await?;
        self.request(Endpoint::Protection, api_key, &query).await
    }

    /// Issue one GET against `endpoint` and decode the body into any `T`.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        api_key: &str,
        query: &QueryParams,
    ) -> Result<T> {
        let url = build_url(&endpoint.url(&self.base_url)?, query);
        debug!(%url, "sending OpenUV request");

        let raw = self.transport.get(&url, api_key).await?;
        debug!(status = raw.status, "received OpenUV response");

        decode_response(&raw)
    }

    /// Resolved query for the real-time and forecast endpoints.
    pub async fn coordinate_query(&self, options: Option<&UvParams>) -> Result<QueryParams> {
        let resolved = resolve_params(options, self.geolocator.as_deref()).await?;
        Ok(resolved.query_params())
    }

    /// Resolved query for the protection endpoint: `from`/`to` ahead of the coordinates.
    ///
    /// Coordinates are resolved first, so a missing location is reported before
    /// any threshold problem.
    pub async fn protection_query(&self, options: Option<&ProtectionParams>) -> Result<QueryParams> {
        let coords = self.coordinate_query(options.map(|o| &o.coords)).await?;

        let mut query = threshold_params(options.and_then(|o| o.from), options.and_then(|o| o.to))?;
        query.extend(coords);
        Ok(query)
    }
}
