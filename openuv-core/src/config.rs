use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    api::OpenUvApi,
    client::OpenUvClient,
    location::FixedLocation,
    url::DEFAULT_BASE_URL,
};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENUV_API_KEY";

/// Default location used when a command omits coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [location]
/// lat = 52.37
/// lng = 4.89
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Overrides `https://api.openuv.io/api/v1`.
    pub base_url: Option<String>,

    pub location: Option<LocationConfig>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| on_file("parse", path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| on_file("read", path)),
        }
    }

    /// Save to the platform config path and return where it went.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| on_file("create the directory of", path))?;
        }
        fs::write(path, toml).with_context(|| on_file("write", path))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "openuv", "openuv-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_location(&mut self, lat: f64, lng: f64, alt: Option<f64>) {
        self.location = Some(LocationConfig { lat, lng, alt });
    }

    /// API key from `OPENUV_API_KEY`, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env: Option<String>) -> Option<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build a client; the configured location serves as the geolocation fallback.
    pub fn client(&self) -> Result<OpenUvClient> {
        self.client_with_key(self.api_key())
    }

    fn client_with_key(&self, api_key: Option<String>) -> Result<OpenUvClient> {
        let api_key = api_key.ok_or_else(|| {
            anyhow!(
                "No OpenUV API key configured.\n\
                 Hint: run `openuv configure` or set {API_KEY_ENV}."
            )
        })?;

        let mut api = OpenUvApi::new().with_base_url(self.base_url());
        if let Some(loc) = self.location {
            api = api.with_geolocator(Arc::new(FixedLocation::new(loc.lat, loc.lng, loc.alt)));
        }

        Ok(OpenUvClient::with_api(api_key, api))
    }
}

fn on_file(action: &str, path: &Path) -> String {
    format!("Failed to {action} config file: {}", path.display())
}
