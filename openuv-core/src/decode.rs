use serde::{Deserialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    error::{OpenUvError, Result},
    transport::RawResponse,
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Parse a successful body as `T`, or turn a non-2xx response into [`OpenUvError::Api`].
///
/// An error body that is not JSON surfaces as [`OpenUvError::Decode`], not as `Api`.
pub fn decode_response<T: DeserializeOwned>(raw: &RawResponse) -> Result<T> {
    if raw.is_success() {
        return Ok(serde_json::from_str(&raw.body)?);
    }

    let body: ErrorBody = serde_json::from_str(&raw.body)?;
    let message = body.error.unwrap_or_else(|| "unknown error".to_string());

    warn!(status = raw.status, %message, "OpenUV request failed");

    Err(OpenUvError::Api {
        status: raw.status,
        status_text: raw.status_text.clone(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn raw(status: u16, status_text: &str, body: &str) -> RawResponse {
        RawResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_body_is_returned_as_is() {
        let value: Value = decode_response(&raw(200, "OK", r#"{"result":{"uv":10}}"#)).unwrap();
        assert_eq!(value["result"]["uv"], 10);
    }

    #[test]
    fn non_success_becomes_api_error() {
        let err =
            decode_response::<Value>(&raw(403, "Forbidden", r#"{"error":"invalid key"}"#)).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("invalid key"));
        assert!(matches!(
            err,
            OpenUvError::Api { status: 403, ref status_text, .. } if status_text == "Forbidden"
        ));
    }

    #[test]
    fn error_without_message_field_still_classified() {
        let err = decode_response::<Value>(&raw(500, "Internal Server Error", "{}")).unwrap_err();
        assert_eq!(err.to_string(), "500 Internal Server Error - unknown error");
    }

    #[test]
    fn non_json_error_body_surfaces_decode_failure() {
        let err = decode_response::<Value>(&raw(502, "Bad Gateway", "<html>oops</html>")).unwrap_err();
        assert!(matches!(err, OpenUvError::Decode(_)));
    }

    #[test]
    fn non_json_success_body_is_decode_failure() {
        let err = decode_response::<Value>(&raw(200, "OK", "not json")).unwrap_err();
        assert!(matches!(err, OpenUvError::Decode(_)));
    }
}
