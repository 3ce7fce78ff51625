//! Client error types.
//!
//! ```text
//! ClientError                       ──► AppError
//! ├── Url          (bad base URL)       Other (UNKNOWN_ERROR, 500)
//! ├── Transport    (no response)        Network
//! ├── Status 400                        Validation
//! ├── Status 401 / 403                  Authentication
//! ├── Status 404                        NotFound
//! ├── Status other                      Other (HTTP_ERROR, status)
//! ├── Decode       (bad JSON)           Other (UNKNOWN_ERROR, 500)
//! └── Api          (success: false)     Other (API_ERROR, 500)
//! ```

use kiosk_core::AppError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Base URL or endpoint could not be turned into a URL.
    #[error("Invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never got a response.
    #[error("HTTP error: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {}: {}", .status.as_u16(), .status.canonical_reason().unwrap_or(""))]
    Status { status: StatusCode, body: String },

    /// The response body was not the expected JSON.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered `{ "success": false, "error": ... }`.
    #[error("{0}")]
    Api(String),
}

impl ClientError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::Transport { .. } => AppError::network_with(err.to_string()),
            ClientError::Status { status, .. } => match status.as_u16() {
                400 => AppError::validation(err.to_string()),
                401 | 403 => AppError::authentication_with(err.to_string()),
                404 => AppError::not_found_default(),
                code => AppError::with_status(err.to_string(), "HTTP_ERROR", code),
            },
            ClientError::Api(message) => AppError::with_status(message.clone(), "API_ERROR", 500),
            ClientError::Url { .. } | ClientError::Decode { .. } => AppError::other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ClientError {
        ClientError::Status {
            status: StatusCode::from_u16(code).unwrap(),
            body: String::new(),
        }
    }

    #[test]
    fn test_status_message() {
        assert_eq!(status(500).to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(status(404).to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::from(status(400)).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::from(status(401)).code(), "AUTH_ERROR");
        assert_eq!(AppError::from(status(403)).code(), "AUTH_ERROR");
        assert_eq!(AppError::from(status(404)).status_code(), 404);

        let other = AppError::from(status(502));
        assert_eq!(other.code(), "HTTP_ERROR");
        assert_eq!(other.status_code(), 502);
        assert_eq!(other.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_api_error_mapping() {
        let err = AppError::from(ClientError::Api("Produkt není skladem".to_string()));
        assert_eq!(err.code(), "API_ERROR");
        assert_eq!(kiosk_core::error::user_message(&err), "Produkt není skladem");
    }
}
