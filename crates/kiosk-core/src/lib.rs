//! # kiosk-core: Shared Contracts for the Kiosk Payment System
//!
//! This crate is the **contract** between the backend, the kiosk front-end
//! and the admin front-end. It contains the wire types and the pure logic
//! every service must agree on, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kiosk Payment Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │   Kiosk app      │   │   Admin app      │   │   Backend        │    │
//! │  │ products, cart,  │   │ products, stock, │   │ payments, FIO,   │    │
//! │  │ QR / ThePay pay  │   │ kiosks, logs     │   │ ThePay, SSE      │    │
//! │  └────────┬─────────┘   └────────┬─────────┘   └────────┬─────────┘    │
//! │           │ TS bindings          │ TS bindings          │               │
//! │  ┌────────▼──────────────────────▼──────────────────────▼─────────┐    │
//! │  │               ★ kiosk-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │  ┌─────────┐ ┌───────┐ ┌──────┐ ┌────────────┐ ┌───────────┐  │    │
//! │  │  │  types  │ │ money │ │ cart │ │ validation │ │ endpoints │  │    │
//! │  │  │  DTOs   │ │ haléř │ │ math │ │  + schemas │ │ templates │  │    │
//! │  │  └─────────┘ └───────┘ └──────┘ └────────────┘ └───────────┘  │    │
//! │  │  ┌─────────┐ ┌────────┐ ┌─────┐ ┌───────────┐                 │    │
//! │  │  │  error  │ │ format │ │ spd │ │ constants │                 │    │
//! │  │  └─────────┘ └────────┘ └─────┘ └───────────┘                 │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • NO ENVIRONMENT • PURE FUNCTIONS        │    │
//! │  └───────────────────────────────┬─────────────────────────────────┘    │
//! │                                  │                                      │
//! │  ┌───────────────────────────────▼─────────────────────────────────┐    │
//! │  │            kiosk-client (HTTP client, env config)               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, Transaction, payment DTOs, ...)
//! - [`money`] - Money in haléře, CZK price helpers
//! - [`cart`] - Immutable cart operations
//! - [`validation`] - Form validators and schemas
//! - [`error`] - Error classification and user-facing messages
//! - [`endpoints`] - REST path templates
//! - [`format`] - Price/date formatting, payment ids, kiosk URL parameters
//! - [`spd`] - Czech QR payment payload
//! - [`constants`] - App configuration constants and UI strings
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: no database, network, file system or env access
//! 2. **Integer Money**: amounts are haléře (i64) in Rust, CZK numbers on the wire
//! 3. **Immutable Cart**: cart operations return a new cart
//! 4. **Typed Errors**: every failure is an enum variant with a Czech message
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::{Cart, Money};
//!
//! let cart = Cart::empty();
//! assert_eq!(cart.total_amount, Money::zero());
//!
//! let price = Money::from_czk_f64(45.5);
//! assert_eq!(price.halere(), 4550);
//! assert_eq!(price.to_string(), "45,50\u{a0}Kč");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod format;
pub mod money;
pub mod spd;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kiosk_core::Money` instead of
// `use kiosk_core::money::Money`

pub use constants::*;
pub use error::{AppError, AppResult, EndpointError, ErrorCode, FieldError, UrlParamError};
pub use money::Money;
pub use types::*;
