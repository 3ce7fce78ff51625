//! Logging setup and domain log events.
//!
//! ## Log Levels
//! - `RUST_LOG=...` - always wins when set
//! - `showDebugInfo` - debug
//! - otherwise the configured `logLevel`
//!
//! Production logs are JSON lines, development logs the compact format.
//! Every domain event carries the process session id.
//!
//! With `showDebugInfo` on, the last [`MAX_STORED_LOGS`] events are also kept
//! in memory for the debug views: [`stored_logs`] and [`clear_logs`].

use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use kiosk_core::format::random_base36;
use serde::Serialize;
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{debug, error, info, Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EnvironmentConfig;

/// Number of entries kept by the in-memory log store.
pub const MAX_STORED_LOGS: usize = 100;

static SESSION_ID: OnceLock<String> = OnceLock::new();
static LOG_STORE: OnceLock<LogStore> = OnceLock::new();

/// Id of this process' logging session: `session_{epoch millis}_{9 base36}`.
pub fn session_id() -> &'static str {
    SESSION_ID.get_or_init(|| {
        format!("session_{}_{}", Utc::now().timestamp_millis(), random_base36(9))
    })
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(config: &EnvironmentConfig) -> &'static str {
    if config.show_debug_info {
        "debug"
    } else {
        config.log_level.as_directive()
    }
}

/// Installs the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &EnvironmentConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let store = config.show_debug_info.then(|| {
        LOG_STORE
            .get_or_init(|| LogStore::new(MAX_STORED_LOGS, config.environment.to_string()))
            .clone()
    });

    let registry = tracing_subscriber::registry().with(filter).with(store);
    let result = if config.is_production() {
        registry
            .with(fmt::layer().with_target(false).json())
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).compact())
            .try_init()
    };

    if result.is_ok() {
        info!(
            session_id = session_id(),
            environment = %config.environment,
            "Logging initialized"
        );
    }
    result
}

// =============================================================================
// Domain Events
// =============================================================================

/// Something happened on a kiosk (product tapped, screen changed, ...).
pub fn kiosk_action(action: &str, kiosk_id: i64, data: Option<&Value>) {
    info!(
        session_id = session_id(),
        context = %format!("kiosk-{kiosk_id}"),
        data = ?data,
        "Kiosk action: {action}"
    );
}

/// A payment changed state (created, confirmed, cancelled, ...).
pub fn payment_event(event: &str, payment_id: &str, data: Option<&Value>) {
    info!(
        session_id = session_id(),
        context = %format!("payment-{payment_id}"),
        data = ?data,
        "Payment event: {event}"
    );
}

/// One backend call. Failures are errors, successes debug.
pub fn api_call(
    method: &str,
    endpoint: &str,
    duration: Option<Duration>,
    err: Option<&(dyn std::error::Error + 'static)>,
) {
    let message = api_call_message(method, endpoint, duration);
    match err {
        Some(err) => error!(
            session_id = session_id(),
            context = "api-client",
            error = %err,
            "{message}"
        ),
        None => debug!(session_id = session_id(), context = "api-client", "{message}"),
    }
}

// =============================================================================
// In-Memory Log Store
// =============================================================================

/// One stored log event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub session_id: String,
}

/// Bounded ring buffer of log events, usable as a tracing layer.
///
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct LogStore {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
    environment: String,
}

impl LogStore {
    pub fn new(capacity: usize, environment: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
            environment: environment.into(),
        }
    }

    /// Stored entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic while holding the lock cannot leave the deque half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: Subscriber> Layer<S> for LogStore {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = EntryFields::default();
        event.record(&mut fields);

        self.push(LogEntry {
            level: event.metadata().level().to_string().to_lowercase(),
            message: fields.message,
            context: fields.context,
            data: fields.data,
            timestamp: Utc::now(),
            environment: self.environment.clone(),
            session_id: session_id().to_string(),
        });
    }
}

#[derive(Default)]
struct EntryFields {
    message: String,
    context: Option<String>,
    data: Option<String>,
}

impl Visit for EntryFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "context" => self.context = Some(value.to_string()),
            "data" | "error" => self.data = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "context" => self.context = Some(format!("{value:?}")),
            "data" | "error" => self.data = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

/// Entries kept since logging was initialized with `showDebugInfo` on.
pub fn stored_logs() -> Vec<LogEntry> {
    LOG_STORE.get().map(LogStore::entries).unwrap_or_default()
}

/// Empties the in-memory log store.
pub fn clear_logs() {
    if let Some(store) = LOG_STORE.get() {
        store.clear();
    }
}

fn api_call_message(method: &str, endpoint: &str, duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("API {method} {endpoint} ({}ms)", d.as_millis()),
        None => format!("API {method} {endpoint}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_session_id_is_stable() {
        let id = session_id();
        assert!(id.starts_with("session_"));
        assert_eq!(id.rsplit('_').next().map(str::len), Some(9));
        assert_eq!(session_id(), id);
    }

    #[test]
    fn test_default_directive() {
        let mut config = EnvironmentConfig::from_source(&[("NODE_ENV", "production")]).unwrap();
        assert_eq!(default_directive(&config), "warn");

        config.log_level = LogLevel::Error;
        assert_eq!(default_directive(&config), "error");

        config.show_debug_info = true;
        assert_eq!(default_directive(&config), "debug");
    }

    #[test]
    fn test_api_call_message() {
        assert_eq!(
            api_call_message("GET", "/health", Some(Duration::from_millis(42))),
            "API GET /health (42ms)"
        );
        assert_eq!(api_call_message("POST", "/api/payments/cancel", None), "API POST /api/payments/cancel");
    }

    #[test]
    fn test_log_store_keeps_latest_entries() {
        let store = LogStore::new(3, "development");
        let subscriber = tracing_subscriber::registry().with(store.clone());

        tracing::subscriber::with_default(subscriber, || {
            for i in 0..5 {
                info!(context = "test", "entry {i}");
            }
            kiosk_action("product_click", 4, None);
        });

        let entries = store.entries();
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 3", "entry 4", "Kiosk action: product_click"]);
        assert_eq!(entries[0].context.as_deref(), Some("test"));
        assert_eq!(entries[2].context.as_deref(), Some("kiosk-4"));
        assert_eq!(entries[2].level, "info");
        assert_eq!(entries[2].environment, "development");
        assert_eq!(entries[2].session_id, session_id());

        store.clear();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_log_store_records_api_errors() {
        let store = LogStore::new(10, "production");
        let subscriber = tracing_subscriber::registry().with(store.clone());

        tracing::subscriber::with_default(subscriber, || {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "timeout");
            api_call("GET", "/health", Some(Duration::from_millis(5)), Some(&err));
        });

        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, "error");
        assert_eq!(entries[0].message, "API GET /health (5ms)");
        assert_eq!(entries[0].data.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_events_without_subscriber() {
        kiosk_action("product_click", 1, None);
        payment_event("created", "pay-1", Some(&serde_json::json!({ "amount": 45.5 })));
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        api_call("GET", "/health", None, Some(&err));
    }
}
