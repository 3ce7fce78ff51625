//! # Domain Types
//!
//! Wire types shared by the backend, the kiosk app and the admin app.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │     Kiosk       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name, price    │   │  status         │   │  name           │       │
//! │  │  click counters │   │  amount         │   │  location       │       │
//! │  └────────┬────────┘   │  variableSymbol │   └─────────────────┘       │
//! │           │ flatten    └─────────────────┘                              │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  KioskProduct   │   │ KioskInventory  │   │    Customer     │       │
//! │  │  + stock        │   │  per-kiosk row  │   │  email, spend   │       │
//! │  │  + kiosk stats  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Request/response DTOs: CreateQrPayment*, CreateMultiQrPayment*,        │
//! │  PaymentStatusResponse, StartMonitoring*, ThePay*, admin requests       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records serialize as camelCase JSON. Optional fields are omitted
//! when absent, matching the `field?: T` shape of the TypeScript bindings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle of a payment transaction, mirroring the backend schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Initiated,
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Timeout,
}

impl TransactionStatus {
    /// Returns true once the transaction can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed
                | TransactionStatus::Failed
                | TransactionStatus::Cancelled
                | TransactionStatus::Timeout
        )
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, TransactionStatus::Completed)
    }
}

/// Kind of receipt sent to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptType {
    #[default]
    Plain,
    Invoice,
    Proforma,
}

/// Screens of the kiosk and admin front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenType {
    Products,
    Payment,
    Confirmation,
    AdminLogin,
    AdminDashboard,
}

/// Delivery state of the receipt email for idempotent multi-QR responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptEmailStatus {
    Sent,
    Pending,
    Failed,
    None,
}

// =============================================================================
// Product
// =============================================================================

/// Global product data, shared by all kiosks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price in CZK.
    #[ts(type = "number")]
    pub price: Money,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
    pub clicked_on: i64,
    pub qr_codes_generated: i64,
    pub number_of_purchases: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A product as a specific kiosk shows it to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KioskProduct {
    #[serde(flatten)]
    pub product: Product,
    pub quantity_in_stock: i64,
    pub kiosk_clicked_on: i64,
    pub kiosk_number_of_purchases: i64,
}

impl KioskProduct {
    #[inline]
    pub fn id(&self) -> i64 {
        self.product.id
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.product.price
    }

    pub fn is_in_stock(&self, quantity: i64) -> bool {
        self.quantity_in_stock >= quantity
    }
}

/// A product as the admin app lists it, optionally scoped to one kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity_in_stock: Option<i64>,
    /// Visibility on the selected kiosk (from its inventory row).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub active: Option<bool>,
}

// =============================================================================
// Kiosk, Customer, Inventory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Kiosk {
    pub id: i64,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(as = "String")]
    pub first_contact_at: DateTime<Utc>,
    pub purchases_requested: i64,
    pub purchases_completed: i64,
    #[ts(type = "number")]
    pub total_spent: Money,
}

/// Stock and statistics of one product on one kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KioskInventory {
    pub id: i64,
    pub kiosk_id: i64,
    pub product_id: i64,
    pub quantity_in_stock: i64,
    pub active: bool,
    pub clicked_on: i64,
    pub qr_codes_generated: i64,
    pub number_of_purchases: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<String>")]
    pub last_restocked: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Live status of a kiosk on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KioskStatus {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub online: bool,
    #[ts(as = "String")]
    pub last_seen: DateTime<Utc>,
    #[ts(type = "number")]
    pub sales_today: Money,
}

// =============================================================================
// Transaction
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub kiosk_id: i64,
    pub customer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_id: Option<i64>,
    #[ts(as = "String")]
    pub requested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    #[ts(type = "number")]
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub qr_code_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub variable_symbol: Option<String>,
    pub receipt_type: ReceiptType,
    /// Matching bank movement id from the FIO bank API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fio_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<String>")]
    pub last_fio_check_at: Option<DateTime<Utc>>,
    pub fio_check_count: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the kiosk cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: KioskProduct,
    pub quantity: i64,
}

impl CartItem {
    /// Unit price × quantity, saturating on overflow.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, `None` on overflow.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.product.price().checked_multiply_quantity(self.quantity)
    }
}

/// The kiosk cart. See [`crate::cart`] for the operations.
///
/// ## Invariants
/// - `total_amount` = Σ line totals (exact in haléře)
/// - `total_items` = Σ quantities
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub total_items: i64,
}

// =============================================================================
// Payment View Models
// =============================================================================

/// Single-product payment as shown on the kiosk payment screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub product_id: i64,
    pub product_name: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub customer_email: String,
    pub qr_code: String,
    pub payment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub status: Option<TransactionStatus>,
}

/// Cart payment as shown on the kiosk payment screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MultiProductPaymentData {
    pub items: Vec<CartItem>,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub customer_email: String,
    pub qr_code: String,
    pub payment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub status: Option<TransactionStatus>,
}

// =============================================================================
// Generic Envelope
// =============================================================================

/// Standard response envelope used by most backend endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Unwraps the envelope: the data on success, otherwise the server's
    /// error text (or message, or a generic fallback).
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("response contained no data".to_string()),
            (false, _) => Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

/// Server-sent event / WebSocket message. Everything beyond `type`,
/// `kioskId` and `timestamp` is event specific and kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kiosk_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// =============================================================================
// QR Payment DTOs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrPaymentRequest {
    pub product_id: i64,
    pub customer_email: String,
    pub kiosk_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrPaymentResponse {
    pub payment_id: String,
    pub qr_code_data: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub customer_email: String,
    pub variable_symbol: String,
}

/// One product line of a multi-product payment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateMultiQrPaymentRequest {
    pub items: Vec<PaymentItem>,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub customer_email: String,
    pub kiosk_id: i64,
    /// Client-provided key the backend uses to drop duplicate submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateMultiQrPaymentResponseData {
    pub payment_id: String,
    pub qr_code_data: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub items_count: i64,
    pub customer_email: String,
    /// Only present in idempotent replays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub receipt_email_status: Option<ReceiptEmailStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateMultiQrPaymentResponse {
    pub success: bool,
    pub data: CreateMultiQrPaymentResponseData,
    /// e.g. "QR payment already exists (idempotent)".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub payment_id: String,
    pub status: TransactionStatus,
    #[ts(type = "number")]
    pub amount: Money,
    pub customer_email: String,
    #[ts(as = "String")]
    pub requested_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StartMonitoringRequest {
    pub payment_id: String,
}

/// Body of the payment actions that only name a payment: complete,
/// complete-multi, cancel, stop-monitoring and ThePay cancel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIdRequest {
    pub payment_id: String,
}

impl PaymentIdRequest {
    pub fn new(payment_id: impl Into<String>) -> Self {
        Self {
            payment_id: payment_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StartMonitoringResponse {
    pub payment_id: String,
    pub status: String,
    /// Epoch milliseconds; older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub monitoring_start_time: Option<i64>,
}

// =============================================================================
// ThePay DTOs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayItem {
    pub product_id: i64,
    pub quantity: i64,
    #[ts(type = "number")]
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayCreateRequest {
    pub items: Vec<ThePayItem>,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub customer_email: String,
    pub kiosk_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayCreateResponse {
    pub payment_id: String,
    pub thepay_payment_id: String,
    pub payment_url: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub customer_email: String,
    pub kiosk_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayStatusResponse {
    pub payment_id: String,
    pub status: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub customer_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayMethod {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThePayMethodsResponse {
    pub methods: Vec<ThePayMethod>,
}

// =============================================================================
// Admin & Kiosk Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdateRequest {
    pub quantity_in_stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityToggleRequest {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductClickRequest {
    pub kiosk_id: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
