use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;

use crate::error::Result;

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Status line and body of an HTTP response, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET carrying the access token header.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &Url, access_token: &str) -> Result<RawResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url, access_token: &str) -> Result<RawResponse> {
        let res = self
            .http
            .get(url.clone())
            .header(ACCESS_TOKEN_HEADER, access_token)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
