//! # kiosk-client: HTTP Client and Environment Configuration
//!
//! The I/O half of the kiosk contracts. Front ends and tools use it to talk
//! to the backend with the wire types from [`kiosk_core`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        kiosk-client                          │
//! │                                                              │
//! │   EnvironmentConfig ──► create_api_client ──► ApiClient      │
//! │          │                                       │           │
//! │          ▼                                       ▼           │
//! │    init_logging                        ClientError ──► AppError
//! │                                                  │           │
//! │                              RequestState / ErrorNotice      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `ApiClient` and typed endpoint helpers
//! - [`config`] - `REACT_APP_*` environment configuration
//! - [`error`] - `ClientError` and its `AppError` mapping
//! - [`logging`] - tracing subscriber setup and domain events
//! - [`state`] - request and error trackers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kiosk_client::{create_api_client, EnvironmentConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EnvironmentConfig::load()?;
//! kiosk_client::logging::init_logging(&config)?;
//!
//! let client = create_api_client(None, Some("kiosk-secret".into()), &config)?;
//! let products = client.products(1).await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use client::{create_api_client, ApiClient, KIOSK_SECRET_HEADER};
pub use config::{ConfigError, Environment, EnvironmentConfig, LogLevel, PaymentMode};
pub use error::ClientError;
pub use state::{ErrorNotice, RequestState};
