use thiserror::Error;

pub type Result<T, E = OpenUvError> = std::result::Result<T, E>;

/// Errors surfaced by every OpenUV operation.
#[derive(Debug, Error)]
pub enum OpenUvError {
    /// Coordinates could not be established. Always raised before any network call.
    #[error("{0}")]
    Configuration(String),

    #[error("Invalid parameter '{name}': {value} is outside {range}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        range: &'static str,
    },

    /// The service answered with a non-2xx status.
    #[error("{status} {status_text} - {message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    /// Body was not valid JSON (for success and error responses alike).
    #[error("Failed to decode OpenUV response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl OpenUvError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// HTTP status for `Api` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OpenUvError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
