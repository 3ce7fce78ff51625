//! # REST Endpoints
//!
//! Path templates of the backend API. Parameters are written as `:name`
//! segments and filled in with [`expand`] or the typed helpers below.
//!
//! ```text
//! /api/products ............... kiosk product listing, click tracking
//! /api/payments/... ........... QR (SPD) and ThePay payments, monitoring
//! /api/admin/... .............. login, products, inventory, kiosks, logs
//! /health ..................... liveness, payment provider health
//! /events/:kioskId ............ server-sent events stream per kiosk
//! ```

use url::Url;

use crate::error::EndpointError;

// =============================================================================
// Products
// =============================================================================

pub const PRODUCTS: &str = "/api/products";
pub const PRODUCT_CLICK: &str = "/api/products/:id/click";

// =============================================================================
// Payments
// =============================================================================

pub const PAYMENT_CREATE_QR: &str = "/api/payments/create-qr";
pub const PAYMENT_CREATE_MULTI_QR: &str = "/api/payments/create-multi-qr";
pub const PAYMENT_CHECK_STATUS: &str = "/api/payments/check-status/:paymentId";
pub const PAYMENT_COMPLETE: &str = "/api/payments/complete";
pub const PAYMENT_COMPLETE_MULTI: &str = "/api/payments/complete-multi";
pub const PAYMENT_CANCEL: &str = "/api/payments/cancel";
pub const PAYMENT_START_MONITORING: &str = "/api/payments/start-monitoring";
pub const PAYMENT_STOP_MONITORING: &str = "/api/payments/stop-monitoring";

pub const PAYMENT_THEPAY_CREATE: &str = "/api/payments/create-thepay";
pub const PAYMENT_THEPAY_STATUS: &str = "/api/payments/thepay-status/:paymentId";
pub const PAYMENT_THEPAY_CANCEL: &str = "/api/payments/thepay-cancel";
pub const PAYMENT_THEPAY_METHODS: &str = "/api/payments/thepay-methods";

// =============================================================================
// Admin
// =============================================================================

pub const ADMIN_LOGIN: &str = "/api/admin/login";
pub const ADMIN_PRODUCTS: &str = "/api/admin/products";
pub const ADMIN_PRODUCTS_INVENTORY: &str = "/api/admin/products/inventory/:kioskId";
pub const ADMIN_PRODUCT_INVENTORY: &str = "/api/admin/products/:id/inventory";
pub const ADMIN_PRODUCT_INVENTORY_UPDATE: &str = "/api/admin/products/:productId/inventory/:kioskId";
pub const ADMIN_PRODUCT_KIOSK_VISIBILITY: &str = "/api/admin/products/:productId/kiosk/:kioskId";
pub const ADMIN_KIOSKS: &str = "/api/admin/kiosks";
pub const ADMIN_KIOSK_DETAILS: &str = "/api/admin/kiosks/:id";
pub const ADMIN_LOGS: &str = "/api/admin/logs";

// =============================================================================
// Health & Events
// =============================================================================

pub const HEALTH: &str = "/health";
pub const HEALTH_PAYMENT_PROVIDERS: &str = "/health/payment-providers";
pub const CHECK_TRANSACTIONS: &str = "/api/check-new-transactions";
pub const EVENTS: &str = "/events/:kioskId";

// =============================================================================
// Expansion
// =============================================================================

/// Fills the `:name` segments of a template.
///
/// Every placeholder must be covered by `params`; extra params are ignored.
/// Values are percent-encoded as single path segments.
///
/// ## Example
/// ```rust
/// use kiosk_core::endpoints::{expand, ADMIN_PRODUCT_INVENTORY_UPDATE};
///
/// let path = expand(
///     ADMIN_PRODUCT_INVENTORY_UPDATE,
///     &[("productId", "12"), ("kioskId", "3")],
/// )
/// .unwrap();
/// assert_eq!(path, "/api/admin/products/12/inventory/3");
/// ```
pub fn expand(template: &str, params: &[(&str, &str)]) -> Result<String, EndpointError> {
    let segments = template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| encode_segment(value))
                .ok_or_else(|| EndpointError::MissingParam {
                    template: template.to_string(),
                    param: name.to_string(),
                }),
            None => Ok(segment.to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(segments.join("/"))
}

/// Percent-encodes `value` so it stays one path segment (`/`, `?`, `#`, ...).
fn encode_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().strip_prefix('/').unwrap_or(url.path()).to_string()
}

/// Names of the placeholders in a template, in order.
pub fn params_of(template: &str) -> Vec<&str> {
    template
        .split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .collect()
}

// =============================================================================
// Typed Helpers
// =============================================================================

fn fill(template: &str, params: &[(&str, &str)]) -> String {
    // Placeholders of the templates above are all covered by the callers.
    expand(template, params).unwrap_or_else(|_| template.to_string())
}

/// `/api/products?kioskId={kiosk_id}`
pub fn products_for_kiosk(kiosk_id: i64) -> String {
    format!("{PRODUCTS}?kioskId={kiosk_id}")
}

pub fn product_click(product_id: i64) -> String {
    fill(PRODUCT_CLICK, &[("id", &product_id.to_string())])
}

pub fn payment_status(payment_id: &str) -> String {
    fill(PAYMENT_CHECK_STATUS, &[("paymentId", payment_id)])
}

pub fn thepay_status(payment_id: &str) -> String {
    fill(PAYMENT_THEPAY_STATUS, &[("paymentId", payment_id)])
}

pub fn admin_products_inventory(kiosk_id: i64) -> String {
    fill(ADMIN_PRODUCTS_INVENTORY, &[("kioskId", &kiosk_id.to_string())])
}

pub fn admin_product_inventory(product_id: i64) -> String {
    fill(ADMIN_PRODUCT_INVENTORY, &[("id", &product_id.to_string())])
}

pub fn admin_product_inventory_update(product_id: i64, kiosk_id: i64) -> String {
    fill(
        ADMIN_PRODUCT_INVENTORY_UPDATE,
        &[
            ("productId", &product_id.to_string()),
            ("kioskId", &kiosk_id.to_string()),
        ],
    )
}

pub fn admin_product_kiosk_visibility(product_id: i64, kiosk_id: i64) -> String {
    fill(
        ADMIN_PRODUCT_KIOSK_VISIBILITY,
        &[
            ("productId", &product_id.to_string()),
            ("kioskId", &kiosk_id.to_string()),
        ],
    )
}

pub fn admin_kiosk_details(kiosk_id: i64) -> String {
    fill(ADMIN_KIOSK_DETAILS, &[("id", &kiosk_id.to_string())])
}

pub fn events(kiosk_id: i64) -> String {
    fill(EVENTS, &[("kioskId", &kiosk_id.to_string())])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_fills_all_params() {
        assert_eq!(
            expand(PAYMENT_CHECK_STATUS, &[("paymentId", "pay-1")]).unwrap(),
            "/api/payments/check-status/pay-1"
        );
        assert_eq!(expand(HEALTH, &[]).unwrap(), "/health");
    }

    #[test]
    fn test_expand_ignores_extra_params() {
        assert_eq!(
            expand(EVENTS, &[("kioskId", "4"), ("unused", "x")]).unwrap(),
            "/events/4"
        );
    }

    #[test]
    fn test_expand_missing_param() {
        let err = expand(ADMIN_PRODUCT_KIOSK_VISIBILITY, &[("productId", "1")]).unwrap_err();
        assert_eq!(
            err,
            EndpointError::MissingParam {
                template: ADMIN_PRODUCT_KIOSK_VISIBILITY.to_string(),
                param: "kioskId".to_string(),
            }
        );
    }

    #[test]
    fn test_expand_encodes_values() {
        assert_eq!(
            payment_status("pay/1?x#y"),
            "/api/payments/check-status/pay%2F1%3Fx%23y"
        );
        assert_eq!(thepay_status("tp 1%"), "/api/payments/thepay-status/tp%201%25");
        assert_eq!(payment_status("pay-1_AB"), "/api/payments/check-status/pay-1_AB");
    }

    #[test]
    fn test_params_of() {
        assert_eq!(
            params_of(ADMIN_PRODUCT_INVENTORY_UPDATE),
            vec!["productId", "kioskId"]
        );
        assert!(params_of(PRODUCTS).is_empty());
    }

    #[test]
    fn test_typed_helpers() {
        assert_eq!(products_for_kiosk(2), "/api/products?kioskId=2");
        assert_eq!(product_click(15), "/api/products/15/click");
        assert_eq!(payment_status("pay-9"), "/api/payments/check-status/pay-9");
        assert_eq!(thepay_status("tp-1"), "/api/payments/thepay-status/tp-1");
        assert_eq!(
            admin_products_inventory(3),
            "/api/admin/products/inventory/3"
        );
        assert_eq!(admin_product_inventory(8), "/api/admin/products/8/inventory");
        assert_eq!(
            admin_product_inventory_update(8, 3),
            "/api/admin/products/8/inventory/3"
        );
        assert_eq!(
            admin_product_kiosk_visibility(8, 3),
            "/api/admin/products/8/kiosk/3"
        );
        assert_eq!(admin_kiosk_details(3), "/api/admin/kiosks/3");
        assert_eq!(events(1), "/events/1");
    }
}
