use reqwest::Url;

use crate::error::{OpenUvError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openuv.io/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Real-time UV index.
    Uv,
    /// Hourly UV index forecast.
    Forecast,
    /// Daily protection window.
    Protection,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Uv => "uv",
            Endpoint::Forecast => "forecast",
            Endpoint::Protection => "protection",
        }
    }

    /// Full endpoint URL under `base`, e.g. `https://api.openuv.io/api/v1/uv`.
    pub fn url(&self, base: &str) -> Result<Url> {
        let joined = format!("{}/{}", base.trim_end_matches('/'), self.path());
        Url::parse(&joined)
            .map_err(|e| OpenUvError::configuration(format!("Invalid base URL '{base}': {e}")))
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Append `params` to `endpoint` as query pairs, in order.
pub fn build_url<K, V>(endpoint: &Url, params: &[(K, V)]) -> Url
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = endpoint.clone();
    url.set_query(None);

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key.as_ref(), value.as_ref());
        }
    }

    url
}
