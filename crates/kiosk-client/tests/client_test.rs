use kiosk_client::{ApiClient, ClientError, KIOSK_SECRET_HEADER};
use kiosk_core::types::{
    CreateMultiQrPaymentRequest, PaymentItem, ReceiptEmailStatus, TransactionStatus,
};
use kiosk_core::{AppError, Money};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_json(id: i64, price: f64, stock: i64) -> Value {
    json!({
        "id": id,
        "name": "Káva",
        "price": price,
        "description": "Espresso",
        "clickedOn": 0,
        "qrCodesGenerated": 0,
        "numberOfPurchases": 0,
        "createdAt": "2026-10-01T08:00:00Z",
        "updatedAt": "2026-10-01T08:00:00Z",
        "quantityInStock": stock,
        "kioskClickedOn": 3,
        "kioskNumberOfPurchases": 1
    })
}

#[tokio::test]
async fn test_sends_json_and_secret_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("content-type", "application/json"))
        .and(header(KIOSK_SECRET_HEADER, "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&format!("{}/", mock_server.uri()), Some("s3cret".into())).unwrap();
    let health = client.health().await.unwrap();

    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_no_secret_header_without_secret() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    client.health().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key(KIOSK_SECRET_HEADER));
}

#[tokio::test]
async fn test_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let err = client.kiosks().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 404: Not Found");
    match &err {
        ClientError::Status { body, .. } => assert_eq!(body, "missing"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(AppError::from(err), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/products/inventory/2"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let err = client.admin_products_for_kiosk(2).await.unwrap_err();

    assert_eq!(AppError::from(err).code(), "AUTH_ERROR");
}

#[tokio::test]
async fn test_post_without_data_sends_no_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check-new-transactions"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let response: Value = client
        .post::<Value, _>("/api/check-new-transactions", None)
        .await
        .unwrap();

    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_products_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("kioskId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [product_json(7, 45.5, 3)]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let products = client.products(1).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id(), 7);
    assert_eq!(products[0].price(), Money::from_halere(4550));
    assert!(products[0].is_in_stock(3));
}

#[tokio::test]
async fn test_envelope_failure_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/check-status/pay-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Platba nenalezena"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let err = client.payment_status("pay-1").await.unwrap_err();

    assert!(matches!(&err, ClientError::Api(msg) if msg == "Platba nenalezena"));
}

#[tokio::test]
async fn test_payment_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/check-status/pay-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "paymentId": "pay-2",
                "status": "COMPLETED",
                "amount": 120.0,
                "customerEmail": "jan@example.cz",
                "requestedAt": "2026-10-19T10:00:00Z",
                "completedAt": "2026-10-19T10:02:00Z"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let status = client.payment_status("pay-2").await.unwrap();

    assert_eq!(status.status, TransactionStatus::Completed);
    assert_eq!(status.amount, Money::from_halere(12_000));
    assert!(status.completed_at.is_some());
}

#[tokio::test]
async fn test_create_multi_qr_payment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payments/create-multi-qr"))
        .and(body_json(json!({
            "items": [{ "productId": 7, "quantity": 2 }],
            "totalAmount": 91.0,
            "customerEmail": "jan@example.cz",
            "kioskId": 1,
            "idempotencyKey": "cart-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "paymentId": "pay-3",
                "qrCodeData": "SPD*1.0*ACC:CZ00*AM:91.00*CC:CZK",
                "amount": 91.0,
                "itemsCount": 2,
                "customerEmail": "jan@example.cz",
                "receiptEmailStatus": "sent"
            },
            "message": "QR payment already exists (idempotent)"
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let request = CreateMultiQrPaymentRequest {
        items: vec![PaymentItem {
            product_id: 7,
            quantity: 2,
        }],
        total_amount: Money::from_halere(9_100),
        customer_email: "jan@example.cz".to_string(),
        kiosk_id: 1,
        idempotency_key: Some("cart-1".to_string()),
    };
    let response = client.create_multi_qr_payment(&request).await.unwrap();

    assert!(response.success);
    assert_eq!(response.data.payment_id, "pay-3");
    assert_eq!(response.data.receipt_email_status, Some(ReceiptEmailStatus::Sent));
}

#[tokio::test]
async fn test_cancel_payment_sends_payment_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payments/cancel"))
        .and(body_json(json!({ "paymentId": "pay-4" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Platba zrušena"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    client.cancel_payment("pay-4").await.unwrap();
}

#[tokio::test]
async fn test_update_inventory_uses_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/products/7/inventory/1"))
        .and(body_json(json!({ "quantityInStock": 12 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": {} })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    client.update_inventory(7, 1, 12).await.unwrap();
}

#[tokio::test]
async fn test_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/thepay-methods"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&mock_server.uri(), None).unwrap();
    let err = client.thepay_methods().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_transport_error_maps_to_network() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let client = ApiClient::new(&uri, None).unwrap();
    let err = client.health().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    assert_eq!(AppError::from(err).code(), "NETWORK_ERROR");
}
