//! Environment configuration module.
//!
//! Configuration is loaded from `REACT_APP_*` environment variables with
//! per-environment defaults, so the backend, the kiosk app and the admin app
//! resolve the same service URLs.
//!
//! ## Resolution
//! ```text
//! NODE_ENV == "production" ──► Production defaults (Railway URLs, mocks off)
//! anything else ────────────► Development defaults (localhost, mocks on)
//!
//! REACT_APP_FOO set and non-empty ──► its value
//! otherwise ───────────────────────► the environment's default
//! ```

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// Variable Sources
// =============================================================================

/// Key-value lookup the configuration is read from.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for [(&str, &str)] {
    fn var(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
    fn var(&self, key: &str) -> Option<String> {
        self.as_slice().var(key)
    }
}

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Production only when `NODE_ENV` is exactly `production`.
    pub fn detect(source: &(impl EnvSource + ?Sized)) -> Self {
        match source.var("NODE_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Default service URLs of this environment.
    pub fn service_urls(&self) -> ServiceUrls {
        match self {
            Environment::Development => ServiceUrls {
                backend: "http://localhost:3015",
                kiosk: "http://localhost:3000",
                admin: "http://localhost:3001",
            },
            Environment::Production => ServiceUrls {
                backend: "https://rpapp-bckend-production.up.railway.app",
                kiosk: "https://rpapp-kiosk-production.up.railway.app",
                admin: "https://extraordinary-healing-production-88f4.up.railway.app",
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where each service is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceUrls {
    pub backend: &'static str,
    pub kiosk: &'static str,
    pub admin: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Mock,
    Sandbox,
    Production,
}

impl FromStr for PaymentMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(PaymentMode::Mock),
            "sandbox" => Ok(PaymentMode::Sandbox),
            "production" => Ok(PaymentMode::Production),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(()),
        }
    }
}

// =============================================================================
// Environment Configuration
// =============================================================================

/// Resolved configuration shared by all services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub environment: Environment,

    pub api_url: String,
    pub ws_url: String,

    pub enable_mock_payments: bool,
    pub payment_account_number: String,
    pub payment_mode: PaymentMode,

    pub show_debug_info: bool,
    pub log_level: LogLevel,

    pub kiosk_url: String,
    pub admin_url: String,
    pub backend_url: String,

    /// Superseded by `sse_health_check_initial_interval_ms`; still read so
    /// older deployments keep their variable.
    pub sse_health_check_interval_ms: u64,
    pub sse_health_check_initial_interval_ms: u64,
    pub sse_health_check_backoff_multiplier: u64,
    pub sse_health_check_max_interval_ms: u64,
    pub sse_health_check_max_attempts: u32,
    pub sse_health_check_max_total_time_ms: u64,
}

impl EnvironmentConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from any variable source.
    pub fn from_source(source: &(impl EnvSource + ?Sized)) -> Result<Self, ConfigError> {
        let environment = Environment::detect(source);
        let urls = environment.service_urls();
        let is_dev = environment == Environment::Development;

        let config = EnvironmentConfig {
            environment,

            api_url: env_string(source, "REACT_APP_API_URL", urls.backend),
            ws_url: env_string(
                source,
                "REACT_APP_WS_URL",
                &urls.backend.replacen("http", "ws", 1),
            ),

            enable_mock_payments: env_bool(source, "REACT_APP_ENABLE_MOCK_PAYMENTS", is_dev),
            payment_account_number: env_string(
                source,
                "REACT_APP_PAYMENT_ACCOUNT",
                kiosk_core::PAYMENT_ACCOUNT_NUMBER,
            ),
            payment_mode: env_parse(
                source,
                "REACT_APP_PAYMENT_MODE",
                if is_dev { "mock" } else { "production" },
            )?,

            show_debug_info: env_bool(source, "REACT_APP_SHOW_DEBUG_INFO", is_dev),
            log_level: env_parse(
                source,
                "REACT_APP_LOG_LEVEL",
                if is_dev { "debug" } else { "warn" },
            )?,

            kiosk_url: env_string(source, "REACT_APP_KIOSK_URL", urls.kiosk),
            admin_url: env_string(source, "REACT_APP_ADMIN_URL", urls.admin),
            backend_url: env_string(source, "REACT_APP_BACKEND_URL", urls.backend),

            sse_health_check_interval_ms: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_INTERVAL",
                300_000, // 5 minutes
            ),
            sse_health_check_initial_interval_ms: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_INITIAL_INTERVAL",
                300_000, // 5 minutes
            ),
            sse_health_check_backoff_multiplier: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_BACKOFF_MULTIPLIER",
                2,
            ),
            sse_health_check_max_interval_ms: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_MAX_INTERVAL",
                1_800_000, // 30 minutes
            ),
            sse_health_check_max_attempts: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_MAX_ATTEMPTS",
                24,
            ),
            sse_health_check_max_total_time_ms: env_number(
                source,
                "REACT_APP_SSE_HEALTH_CHECK_MAX_TOTAL_TIME",
                7_200_000, // 2 hours
            ),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn kiosk_url(&self) -> &str {
        &self.kiosk_url
    }

    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    pub fn payment_config(&self) -> PaymentConfig {
        PaymentConfig {
            enable_mock_payments: self.enable_mock_payments,
            payment_account_number: self.payment_account_number.clone(),
            payment_mode: self.payment_mode,
        }
    }

    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            show_debug_info: self.show_debug_info,
            log_level: self.log_level,
        }
    }

    /// Delays between SSE health checks after the stream drops.
    ///
    /// Starts at the initial interval and multiplies on every attempt,
    /// capped at the max interval. Stops after max attempts, or before the
    /// delays would add up to more than the max total time.
    pub fn sse_backoff_schedule(&self) -> Vec<Duration> {
        let max_interval = self.sse_health_check_max_interval_ms;
        let mut delays = Vec::new();
        let mut delay = self.sse_health_check_initial_interval_ms.min(max_interval);
        let mut total: u64 = 0;

        for _ in 0..self.sse_health_check_max_attempts {
            total = total.saturating_add(delay);
            if total > self.sse_health_check_max_total_time_ms {
                break;
            }
            delays.push(Duration::from_millis(delay));
            delay = delay
                .saturating_mul(self.sse_health_check_backoff_multiplier)
                .min(max_interval);
        }

        delays
    }
}

/// Payment-related slice of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfig {
    pub enable_mock_payments: bool,
    pub payment_account_number: String,
    pub payment_mode: PaymentMode,
}

/// UI-related slice of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    pub show_debug_info: bool,
    pub log_level: LogLevel,
}

// =============================================================================
// Variable Helpers
// =============================================================================

/// Unset and empty variables both fall back to the default.
fn env_string(source: &(impl EnvSource + ?Sized), key: &str, default: &str) -> String {
    source
        .var(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Only the literal `true` is true.
fn env_bool(source: &(impl EnvSource + ?Sized), key: &str, default: bool) -> bool {
    match source.var(key).filter(|v| !v.is_empty()) {
        Some(value) => value == "true",
        None => default,
    }
}

/// Leading base-10 integer; anything unparsable falls back to the default.
fn env_number<T: FromStr>(source: &(impl EnvSource + ?Sized), key: &str, default: T) -> T {
    source
        .var(key)
        .and_then(|value| {
            let trimmed = value.trim_start();
            let end = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(trimmed.len());
            trimmed[..end].parse().ok()
        })
        .unwrap_or(default)
}

fn env_parse<T: FromStr>(
    source: &(impl EnvSource + ?Sized),
    key: &str,
    default: &str,
) -> Result<T, ConfigError> {
    let value = env_string(source, key, default);
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
