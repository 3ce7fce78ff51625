//! Request and error trackers for kiosk front ends.
//!
//! ```text
//! RequestState<T>
//!   idle ──execute──► loading ──Ok──►  data
//!                             └─Err─► error (AppError)
//!
//! ErrorNotice
//!   raise ──► visible for ERROR_DISPLAY_DURATION_MS ──► hidden
//! ```

use std::future::Future;
use std::time::{Duration, Instant};

use kiosk_core::error::{format_error, user_message};
use kiosk_core::{ui_messages, AppError, ERROR_DISPLAY_DURATION_MS};
use tracing::{debug, error};

// =============================================================================
// Request State
// =============================================================================

/// Outcome of the most recent request for one resource.
#[derive(Debug, Clone)]
pub struct RequestState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<AppError>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `op`, storing its data or its error.
    ///
    /// Data from an earlier success stays in place when `op` fails.
    pub async fn execute<Fut, E>(&mut self, op: Fut) -> Result<&T, AppError>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        self.loading = true;
        self.error = None;

        let result = op.await.map_err(Into::into);
        self.finish(result)
    }

    /// Like [`execute`](Self::execute) for errors without an `AppError`
    /// mapping. Every failure becomes a generic communication error.
    pub async fn execute_opaque<Fut, E>(&mut self, op: Fut) -> Result<&T, AppError>
    where
        Fut: Future<Output = Result<T, E>>,
        E: std::error::Error,
    {
        self.loading = true;
        self.error = None;

        let result = op.await.map_err(|err| {
            debug!(error = %err, "Request failed without an application error");
            AppError::network_with(ui_messages::COMMUNICATION_FAILED)
        });
        self.finish(result)
    }

    fn finish(&mut self, result: Result<T, AppError>) -> Result<&T, AppError> {
        self.loading = false;
        match result {
            Ok(data) => {
                let data: &T = self.data.insert(data);
                Ok(data)
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Back to idle, dropping data and error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replaces the data, e.g. after an optimistic update.
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
    }

    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

// =============================================================================
// Error Notice
// =============================================================================

/// A user-facing error message that hides itself after a few seconds.
#[derive(Debug, Clone, Default)]
pub struct ErrorNotice {
    message: Option<String>,
    raised_at: Option<Instant>,
    production: bool,
}

impl ErrorNotice {
    /// `production` adds the serialized error envelope to the log.
    pub fn new(production: bool) -> Self {
        Self {
            production,
            ..Self::default()
        }
    }

    pub fn display_duration() -> Duration {
        Duration::from_millis(ERROR_DISPLAY_DURATION_MS)
    }

    /// Logs `err` and shows its user message from now on.
    pub fn raise(&mut self, err: &AppError, context: Option<&str>) {
        self.raise_at(err, context, Instant::now());
    }

    pub fn raise_at(&mut self, err: &AppError, context: Option<&str>, now: Instant) {
        let context = context.unwrap_or("unknown");
        error!(context, code = err.code(), error = %err, "Error raised");

        if self.production {
            match serde_json::to_string(&format_error(err, None)) {
                Ok(envelope) => error!(context, envelope = %envelope, "Error report"),
                Err(e) => debug!(error = %e, "Failed to serialize error report"),
            }
        }

        self.message = Some(user_message(err));
        self.raised_at = Some(now);
    }

    /// Message to show at `now`, if any.
    pub fn message_at(&self, now: Instant) -> Option<&str> {
        if self.is_visible(now) {
            self.message.as_deref()
        } else {
            None
        }
    }

    /// Last raised message, regardless of expiry.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        match self.raised_at {
            Some(at) => now.saturating_duration_since(at) < Self::display_duration(),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.raised_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[tokio::test]
    async fn test_execute_success() {
        let mut state = RequestState::<i32>::new();
        assert!(state.is_idle());

        let value = state.execute(async { Ok::<_, AppError>(7) }).await.unwrap();
        assert_eq!(*value, 7);
        assert!(state.has_data());
        assert!(!state.loading);
        assert!(!state.has_error());
    }

    #[tokio::test]
    async fn test_execute_keeps_data_on_failure() {
        let mut state = RequestState::new();
        state.set_data(vec![1, 2]);

        let err = state
            .execute(async { Err::<Vec<i32>, _>(ClientError::Api("Kiosk nenalezen".into())) })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "API_ERROR");
        assert_eq!(state.error, Some(err));
        assert_eq!(state.data, Some(vec![1, 2]));
        assert!(!state.is_idle());
    }

    #[tokio::test]
    async fn test_execute_opaque_maps_to_network() {
        let mut state = RequestState::<()>::new();
        let err = state
            .execute_opaque(async {
                Err::<(), _>(std::io::Error::new(std::io::ErrorKind::Other, "socket closed"))
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::Network(ui_messages::COMMUNICATION_FAILED.to_string()));
        assert_eq!(user_message(&err), ui_messages::NETWORK_ERROR);
    }

    #[tokio::test]
    async fn test_reset() {
        let mut state = RequestState::<i32>::new();
        let _ = state.execute(async { Err::<i32, _>(AppError::network()) }).await;
        assert!(state.has_error());

        state.reset();
        assert!(state.is_idle());
    }

    #[test]
    fn test_notice_expires() {
        let mut notice = ErrorNotice::new(false);
        let start = Instant::now();
        notice.raise_at(&AppError::authentication(), Some("login"), start);

        assert!(notice.is_visible(start));
        assert_eq!(notice.message_at(start), Some(ui_messages::AUTH_ERROR));
        assert!(notice.is_visible(start + Duration::from_millis(4_999)));
        assert!(!notice.is_visible(start + Duration::from_millis(5_000)));
        assert_eq!(notice.message_at(start + Duration::from_secs(6)), None);
        assert_eq!(notice.message(), Some(ui_messages::AUTH_ERROR));
    }

    #[test]
    fn test_notice_clear() {
        let mut notice = ErrorNotice::new(true);
        notice.raise(&AppError::validation("Email je povinný"), None);
        assert_eq!(notice.message(), Some("Email je povinný"));

        notice.clear();
        assert_eq!(notice.message(), None);
        assert!(!notice.is_visible(Instant::now()));
    }
}
