//! # Cart Operations
//!
//! Immutable kiosk cart arithmetic.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Kiosk Action             Operation                Result               │
//! │  ────────────             ─────────                ──────               │
//! │                                                                         │
//! │  Tap product ───────────► cart.add(p, 1) ────────► merged or appended  │
//! │                                                                         │
//! │  Change quantity ───────► update_quantity(id, n) ► n ≤ 0 removes line  │
//! │                                                                         │
//! │  Remove ────────────────► cart.remove(id) ───────► unknown id: no-op   │
//! │                                                                         │
//! │  Cancel / paid ─────────► cart.clear() ──────────► empty, zero totals  │
//! │                                                                         │
//! │  Checkout ──────────────► to_multi_qr_request() ─► payment DTO         │
//! │                                                                         │
//! │  Every operation returns a NEW cart; the input is never modified.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! Each returned cart carries freshly computed totals:
//! `total_amount = Σ price × quantity` (exact in haléře, so the rounding of
//! the CZK value to two decimals is lossless) and `total_items = Σ quantity`.

use crate::money::Money;
use crate::types::{
    Cart, CartItem, CreateMultiQrPaymentRequest, KioskProduct, PaymentItem, ThePayCreateRequest,
    ThePayItem,
};

impl Cart {
    /// Creates an empty cart with zero totals.
    pub fn empty() -> Self {
        Cart {
            items: Vec::new(),
            total_amount: Money::zero(),
            total_items: 0,
        }
    }

    /// Builds a cart from raw lines, computing the totals.
    ///
    /// Returns `None` when a line total or a sum does not fit in `i64`.
    pub fn from_items(items: Vec<CartItem>) -> Option<Self> {
        let mut total_amount = Money::zero();
        let mut total_items: i64 = 0;
        for item in &items {
            total_amount = total_amount.checked_add(item.checked_line_total()?)?;
            total_items = total_items.checked_add(item.quantity)?;
        }
        Some(Cart {
            items,
            total_amount,
            total_items,
        })
    }

    /// Rebuilds around `items`, keeping `self` when the totals overflow.
    fn with_items(&self, items: Vec<CartItem>) -> Cart {
        Cart::from_items(items).unwrap_or_else(|| self.clone())
    }

    /// Adds `quantity` of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increases
    /// - Otherwise: a new line is appended
    /// - `quantity <= 0`: the cart is returned unchanged
    /// - Quantity or totals would overflow: the cart is returned unchanged
    pub fn add(&self, product: &KioskProduct, quantity: i64) -> Cart {
        if quantity <= 0 {
            return self.clone();
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.product.id() == product.id()) {
            Some(item) => match item.quantity.checked_add(quantity) {
                Some(merged) => item.quantity = merged,
                None => return self.clone(),
            },
            None => items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
        self.with_items(items)
    }

    /// Drops the line for `product_id`. Unknown ids leave the cart as is.
    pub fn remove(&self, product_id: i64) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|item| item.product.id() != product_id)
            .cloned()
            .collect();
        self.with_items(items)
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove`]
    /// - Product not in cart: the cart is returned unchanged
    /// - Totals would overflow: the cart is returned unchanged
    pub fn update_quantity(&self, product_id: i64, quantity: i64) -> Cart {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        if self.find(product_id).is_none() {
            return self.clone();
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.product.id() == product_id {
                    CartItem {
                        product: item.product.clone(),
                        quantity,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        self.with_items(items)
    }

    /// Returns an empty cart.
    pub fn clear(&self) -> Cart {
        Cart::empty()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn find(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id() == product_id)
    }

    /// True when the stored totals match the lines.
    pub fn totals_consistent(&self) -> bool {
        Cart::from_items(self.items.clone()).is_some_and(|recomputed| {
            recomputed.total_amount == self.total_amount
                && recomputed.total_items == self.total_items
        })
    }

    /// Lines whose quantity exceeds the kiosk stock.
    pub fn out_of_stock(&self) -> Vec<&CartItem> {
        self.items
            .iter()
            .filter(|item| !item.product.is_in_stock(item.quantity))
            .collect()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Builds the multi-product QR payment request for this cart.
    pub fn to_multi_qr_request(
        &self,
        customer_email: &str,
        kiosk_id: i64,
        idempotency_key: Option<String>,
    ) -> CreateMultiQrPaymentRequest {
        CreateMultiQrPaymentRequest {
            items: self
                .items
                .iter()
                .map(|item| PaymentItem {
                    product_id: item.product.id(),
                    quantity: item.quantity,
                })
                .collect(),
            total_amount: self.total_amount,
            customer_email: customer_email.to_string(),
            kiosk_id,
            idempotency_key,
        }
    }

    /// Builds the ThePay card payment request for this cart.
    pub fn to_thepay_request(&self, customer_email: &str, kiosk_id: i64) -> ThePayCreateRequest {
        ThePayCreateRequest {
            items: self
                .items
                .iter()
                .map(|item| ThePayItem {
                    product_id: item.product.id(),
                    quantity: item.quantity,
                    price: item.product.price(),
                })
                .collect(),
            total_amount: self.total_amount,
            customer_email: customer_email.to_string(),
            kiosk_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
