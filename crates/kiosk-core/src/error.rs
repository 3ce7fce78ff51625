//! # Error Types
//!
//! Error classification shared by every kiosk service.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  AppError (this file)            code              HTTP                 │
//! │  ├── Validation                  VALIDATION_ERROR  400                  │
//! │  ├── Network                     NETWORK_ERROR     503                  │
//! │  ├── Authentication              AUTH_ERROR        401                  │
//! │  ├── NotFound                    NOT_FOUND         404                  │
//! │  └── Other (base case)           UNKNOWN_ERROR     500 (or custom)      │
//! │                                                                         │
//! │  FieldError     - one failed form rule, Display = Czech message         │
//! │  EndpointError  - path template left with an unfilled :param            │
//! │  UrlParamError  - missing / invalid kioskId in the kiosk URL            │
//! │                                                                         │
//! │  Flow: FieldError ──► AppError::Validation ──► user_message() ──► UI    │
//! │        ClientError (kiosk-client) ──► AppError ──► user_message() ──► UI│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are surfaced to the caller immediately. Nothing in this crate
//! retries or recovers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::constants::ui_messages;

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable codes of the predefined error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,
    /// Backend unreachable (503)
    NetworkError,
    /// Credentials rejected (401)
    AuthError,
    /// Resource not found (404)
    NotFound,
    /// Anything unclassified (500)
    UnknownError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

/// Application error with a code and an HTTP status.
///
/// ## Variants
/// The four predefined kinds carry their code and status implicitly.
/// `Other` is the base case: it carries its own code and status so services
/// can raise ad-hoc errors (`PAYMENT_ERROR`, 422, ...) through the same type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Input failed validation.
    #[error("{message}")]
    Validation {
        message: String,
        /// Form field that failed, when known.
        field: Option<String>,
    },

    /// Backend could not be reached.
    #[error("{0}")]
    Network(String),

    /// Login or kiosk secret rejected.
    #[error("{0}")]
    Authentication(String),

    /// Requested resource does not exist.
    #[error("{resource} nebyl nalezen")]
    NotFound { resource: String },

    /// Unclassified error with an explicit code and status.
    #[error("{message}")]
    Other {
        message: String,
        code: String,
        status: u16,
        operational: bool,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Network error with the default message.
    pub fn network() -> Self {
        AppError::Network(ui_messages::CONNECTION_FAILED.to_string())
    }

    pub fn network_with(message: impl Into<String>) -> Self {
        AppError::Network(message.into())
    }

    /// Authentication error with the default message.
    pub fn authentication() -> Self {
        AppError::Authentication(ui_messages::INVALID_CREDENTIALS.to_string())
    }

    pub fn authentication_with(message: impl Into<String>) -> Self {
        AppError::Authentication(message.into())
    }

    /// Not-found error for a named resource, e.g. `"Produkt"`.
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound {
            resource: resource.into(),
        }
    }

    /// Not-found error for an unnamed resource ("Zdroj nebyl nalezen").
    pub fn not_found_default() -> Self {
        AppError::not_found(ui_messages::DEFAULT_RESOURCE)
    }

    /// Unclassified error: `UNKNOWN_ERROR`, 500.
    pub fn other(message: impl Into<String>) -> Self {
        AppError::Other {
            message: message.into(),
            code: ErrorCode::UnknownError.as_str().to_string(),
            status: 500,
            operational: true,
        }
    }

    /// Error with an explicit code and status.
    pub fn with_status(message: impl Into<String>, code: impl Into<String>, status: u16) -> Self {
        AppError::Other {
            message: message.into(),
            code: code.into(),
            status,
            operational: true,
        }
    }

    /// Marks an `Other` error as a programming fault rather than an
    /// expected operational failure. Other variants are unchanged.
    pub fn non_operational(self) -> Self {
        match self {
            AppError::Other {
                message,
                code,
                status,
                ..
            } => AppError::Other {
                message,
                code,
                status,
                operational: false,
            },
            other => other,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError.as_str(),
            AppError::Network(_) => ErrorCode::NetworkError.as_str(),
            AppError::Authentication(_) => ErrorCode::AuthError.as_str(),
            AppError::NotFound { .. } => ErrorCode::NotFound.as_str(),
            AppError::Other { code, .. } => code,
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation { .. } => 400,
            AppError::Network(_) => 503,
            AppError::Authentication(_) => 401,
            AppError::NotFound { .. } => 404,
            AppError::Other { status, .. } => *status,
        }
    }

    /// Operational errors are expected failures (bad input, outages), as
    /// opposed to bugs.
    pub fn is_operational(&self) -> bool {
        match self {
            AppError::Other { operational, .. } => *operational,
            _ => true,
        }
    }

    /// Form field attached to a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Converts a failed form rule into a validation error.
impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::validation(err.to_string())
    }
}

// =============================================================================
// User-Facing Messages
// =============================================================================

/// Maps any application error to the message shown to the customer or
/// the admin.
///
/// ## Mapping
/// ```text
/// Network          ──► "Problém s připojením. Zkuste to znovu."
/// Validation       ──► its own message
/// Authentication   ──► "Neplatné přihlašovací údaje."
/// NotFound         ──► its own message
/// Other            ──► message text heuristics:
///                        contains "fetch"          ──► network message
///                        contains "401"/"Unauthorized" ──► auth message
///                        non-empty                 ──► message as is
///                        empty                     ──► generic message
/// ```
pub fn user_message(error: &AppError) -> String {
    match error {
        AppError::Network(_) => ui_messages::NETWORK_ERROR.to_string(),
        AppError::Validation { message, .. } => message.clone(),
        AppError::Authentication(_) => ui_messages::AUTH_ERROR.to_string(),
        AppError::NotFound { .. } => error.to_string(),
        AppError::Other { message, .. } => message_heuristics(message),
    }
}

/// Classifies a bare error message from outside the hierarchy.
pub fn message_heuristics(message: &str) -> String {
    if message.contains("Failed to fetch") || message.contains("fetch") {
        return ui_messages::NETWORK_ERROR.to_string();
    }
    if message.contains("401") || message.contains("Unauthorized") {
        return ui_messages::AUTH_ERROR.to_string();
    }
    if message.is_empty() {
        return ui_messages::UNKNOWN_ERROR.to_string();
    }
    message.to_string()
}

// =============================================================================
// Error Envelope
// =============================================================================

/// Body of a failed API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub details: Option<serde_json::Value>,
}

/// `{ "success": false, "error": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

/// Wraps an error into the standard failure envelope, stamped now.
pub fn format_error(error: &AppError, details: Option<serde_json::Value>) -> ErrorEnvelope {
    format_error_at(error, details, Utc::now())
}

/// Same as [`format_error`] with an explicit timestamp.
pub fn format_error_at(
    error: &AppError,
    details: Option<serde_json::Value>,
    timestamp: DateTime<Utc>,
) -> ErrorEnvelope {
    let message = error.to_string();
    ErrorEnvelope {
        success: false,
        error: ErrorBody {
            code: error.code().to_string(),
            message: if message.is_empty() {
                ui_messages::UNEXPECTED_ERROR.to_string()
            } else {
                message
            },
            timestamp,
            details,
        },
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// A failed form validation rule.
///
/// `Display` yields the Czech message shown next to the form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Toto pole je povinné")]
    Required,

    #[error("Zadejte platnou emailovou adresu")]
    InvalidEmail,

    #[error("{field} musí mít alespoň {min} znaků")]
    TooShort { field: String, min: usize },

    #[error("{field} může mít maximálně {max} znaků")]
    TooLong { field: String, max: usize },

    #[error("{field} musí být větší než 0")]
    NotPositive { field: String },

    #[error("Uživatelské jméno musí mít alespoň {min} znaky")]
    UsernameTooShort { min: usize },

    #[error("Uživatelské jméno může obsahovat pouze písmena, číslice a podtržítka")]
    UsernameCharacters,

    #[error("Heslo musí mít alespoň {min} znaků")]
    PasswordTooShort { min: usize },

    #[error("Kiosk ID musí být kladné celé číslo")]
    InvalidKioskId,

    #[error("{field} musí být nezáporné celé číslo")]
    InvalidQuantity { field: String },

    #[error("{field} musí být kladné číslo")]
    PriceNotPositive { field: String },

    #[error("{field} musí být v rozsahu 0,01 - 999 999,99 Kč")]
    PriceOutOfRange { field: String },

    #[error("{field} může mít maximálně 2 desetinná místa")]
    PriceTooPrecise { field: String },

    #[error("Variabilní symbol musí obsahovat 1 až 10 číslic")]
    InvalidVariableSymbol,

    /// Value has the wrong JSON type for the rule (e.g. an object where a
    /// number was expected).
    #[error("{field} má neplatný formát")]
    InvalidFormat { field: String },
}

// =============================================================================
// Endpoint / URL Errors
// =============================================================================

/// Failure to build a concrete path from an endpoint template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("Missing value for path parameter :{param} in {template}")]
    MissingParam { template: String, param: String },
}

/// Failure to read kiosk settings from the kiosk page URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlParamError {
    #[error("Kiosk ID is required. Please add ?kioskId=X to the URL where X is your kiosk number.")]
    MissingKioskId,

    #[error("Invalid kiosk ID: {0}. Kiosk ID must be a positive number.")]
    InvalidKioskId(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (AppError::validation("x"), "VALIDATION_ERROR", 400),
            (AppError::network(), "NETWORK_ERROR", 503),
            (AppError::authentication(), "AUTH_ERROR", 401),
            (AppError::not_found("Produkt"), "NOT_FOUND", 404),
            (AppError::other("x"), "UNKNOWN_ERROR", 500),
            (AppError::with_status("x", "PAYMENT_ERROR", 422), "PAYMENT_ERROR", 422),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status_code(), status);
            assert!(err.is_operational());
        }
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(AppError::network().to_string(), "Chyba připojení k serveru");
        assert_eq!(
            AppError::authentication().to_string(),
            "Neplatné přihlašovací údaje"
        );
        assert_eq!(
            AppError::not_found("Produkt").to_string(),
            "Produkt nebyl nalezen"
        );
        assert_eq!(AppError::not_found_default().to_string(), "Zdroj nebyl nalezen");
    }

    #[test]
    fn test_user_message_for_typed_errors() {
        assert_eq!(
            user_message(&AppError::network_with("socket closed")),
            "Problém s připojením. Zkuste to znovu."
        );
        assert_eq!(
            user_message(&AppError::validation("Cena musí být kladné číslo")),
            "Cena musí být kladné číslo"
        );
        assert_eq!(
            user_message(&AppError::authentication_with("token expired")),
            "Neplatné přihlašovací údaje."
        );
        assert_eq!(
            user_message(&AppError::not_found("Kiosk")),
            "Kiosk nebyl nalezen"
        );
    }

    #[test]
    fn test_user_message_heuristics_for_other_errors() {
        assert_eq!(
            user_message(&AppError::other("Failed to fetch")),
            "Problém s připojením. Zkuste to znovu."
        );
        assert_eq!(
            user_message(&AppError::other("401 Unauthorized")),
            "Neplatné přihlašovací údaje."
        );
        assert_eq!(
            user_message(&AppError::other("Something went wrong")),
            "Something went wrong"
        );
        assert_eq!(
            user_message(&AppError::other("")),
            "Něco se pokazilo. Zkuste to znovu."
        );
    }

    #[test]
    fn test_non_operational_only_affects_other() {
        assert!(!AppError::other("bug").non_operational().is_operational());
        assert!(AppError::network().non_operational().is_operational());
    }

    #[test]
    fn test_format_error_envelope() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let envelope = format_error_at(
            &AppError::not_found("Produkt"),
            Some(serde_json::json!({ "productId": 9 })),
            ts,
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "NOT_FOUND");
        assert_eq!(value["error"]["message"], "Produkt nebyl nalezen");
        assert_eq!(value["error"]["timestamp"], "2024-05-01T12:00:00Z");
        assert_eq!(value["error"]["details"]["productId"], 9);
    }

    #[test]
    fn test_format_error_fills_empty_message() {
        let envelope = format_error(&AppError::other(""), None);
        assert_eq!(envelope.error.message, "Došlo k neočekávané chybě");
        assert_eq!(envelope.error.code, "UNKNOWN_ERROR");
        assert!(envelope.error.details.is_none());
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "Toto pole je povinné");
        assert_eq!(
            FieldError::TooShort {
                field: "Název produktu".to_string(),
                min: 2
            }
            .to_string(),
            "Název produktu musí mít alespoň 2 znaků"
        );
        assert_eq!(
            FieldError::PriceOutOfRange {
                field: "Cena".to_string()
            }
            .to_string(),
            "Cena musí být v rozsahu 0,01 - 999 999,99 Kč"
        );
    }

    #[test]
    fn test_field_error_converts_to_validation() {
        let err: AppError = FieldError::InvalidEmail.into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(user_message(&err), "Zadejte platnou emailovou adresu");
    }
}
