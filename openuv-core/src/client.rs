use serde::de::DeserializeOwned;

use crate::{
    api::OpenUvApi,
    error::Result,
    model::{ForecastResponse, ProtectionParams, ProtectionTimeResponse, RealTimeUvResponse, UvParams},
    resolve::QueryParams,
    url::Endpoint,
};

/// Binds one API key to an [`OpenUvApi`] so callers don't pass it around.
///
/// If you only call a single operation, using [`OpenUvApi`] directly is just as good.
#[derive(Debug, Clone)]
pub struct OpenUvClient {
    api_key: String,
    api: OpenUvApi,
}

impl OpenUvClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api(api_key, OpenUvApi::new())
    }

    pub fn with_api(api_key: impl Into<String>, api: OpenUvApi) -> Self {
        Self {
            api_key: api_key.into(),
            api,
        }
    }

    pub fn api(&self) -> &OpenUvApi {
        &self.api
    }

    /// See [`OpenUvApi::get_real_time_uv`].
    pub async fn get_real_time_uv(&self, options: Option<&UvParams>) -> Result<RealTimeUvResponse> {
        self.api.get_real_time_uv(&self.api_key, options).await
    }

    /// See [`OpenUvApi::get_forecast`].
    pub async fn get_forecast(&self, options: Option<&UvParams>) -> Result<ForecastResponse> {
        self.api.get_forecast(&self.api_key, options).await
    }

    /// See [`OpenUvApi::get_daily_protection_time`].
    pub async fn get_daily_protection_time(
        &self,
        options: Option<&ProtectionParams>,
    ) -> Result<ProtectionTimeResponse> {
        self.api.get_daily_protection_time(&self.api_key, options).await
    }

    /// See [`OpenUvApi::request`]. With `serde_json::Value` the body comes back untouched.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &QueryParams,
    ) -> Result<T> {
        self.api.request(endpoint, &self.api_key, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::RecordingTransport;

    #[tokio::test]
    async fn every_call_carries_the_stored_key() {
        let transport = RecordingTransport::ok("{}");
        let client =
            OpenUvClient::with_api("fakeapikey", OpenUvApi::new().with_transport(transport.clone()));
        let coords = UvParams::at(10.0, 20.0);

        client.get_forecast(Some(&coords)).await.unwrap();
        client.get_real_time_uv(Some(&coords)).await.unwrap();
        client
            .get_daily_protection_time(Some(&ProtectionParams::new(coords.clone())))
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, key)| key == "fakeapikey"));
        assert_eq!(calls[0].0, "https://api.openuv.io/api/v1/forecast?lat=10&lng=20");
        assert_eq!(calls[1].0, "https://api.openuv.io/api/v1/uv?lat=10&lng=20");
        assert_eq!(calls[2].0, "https://api.openuv.io/api/v1/protection?lat=10&lng=20");
    }

    #[tokio::test]
    async fn raw_request_keeps_partial_body_unchanged() {
        let body = r#"{"result":{"uv":10,"extra":"kept"}}"#;
        let transport = RecordingTransport::ok(body);
        let client =
            OpenUvClient::with_api("fakeapikey", OpenUvApi::new().with_transport(transport.clone()));

        let query = client
            .api()
            .coordinate_query(Some(&UvParams::at(10.0, 20.0)))
            .await
            .unwrap();
        let value: serde_json::Value = client.request(Endpoint::Uv, &query).await.unwrap();

        assert_eq!(value, serde_json::from_str::<serde_json::Value>(body).unwrap());
        assert!(value["result"].get("uv_max").is_none());
        assert_eq!(
            transport.calls(),
            vec![(
                "https://api.openuv.io/api/v1/uv?lat=10&lng=20".to_string(),
                "fakeapikey".to_string()
            )]
        );
    }
}
