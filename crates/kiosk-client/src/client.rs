//! JSON HTTP client for the kiosk backend.
//!
//! [`ApiClient`] is a thin wrapper over `reqwest`: it prefixes endpoint paths
//! with the base URL, sends the fixed header set and maps failures into
//! [`ClientError`]. Typed helpers cover the documented endpoints.
//!
//! ## Headers
//!
//! - `Content-Type: application/json` on every request
//! - `X-Kiosk-Secret: <secret>` when the client was built with a kiosk secret
//!
//! ## Error Handling
//!
//! - no response ──► [`ClientError::Transport`]
//! - non-2xx ──► [`ClientError::Status`] (`HTTP 404: Not Found`)
//! - unexpected body ──► [`ClientError::Decode`]
//! - `{ "success": false }` envelope ──► [`ClientError::Api`]
//!
//! Nothing is retried; the error goes straight back to the caller.

use std::time::{Duration, Instant};

use kiosk_core::endpoints;
use kiosk_core::types::{
    AdminProduct, ApiResponse, CreateMultiQrPaymentRequest, CreateMultiQrPaymentResponse,
    CreateQrPaymentRequest, CreateQrPaymentResponse, InventoryUpdateRequest, Kiosk, KioskProduct,
    PaymentIdRequest, PaymentStatusResponse, ProductClickRequest, StartMonitoringRequest,
    StartMonitoringResponse, ThePayCreateRequest, ThePayCreateResponse, ThePayMethodsResponse,
    ThePayStatusResponse, VisibilityToggleRequest,
};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::EnvironmentConfig;
use crate::error::ClientError;
use crate::logging;

/// Header carrying the per-kiosk shared secret.
pub const KIOSK_SECRET_HEADER: &str = "X-Kiosk-Secret";

/// A client for the kiosk backend REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Base URL without a trailing slash (e.g. `http://localhost:3015`)
    base_url: String,
    /// Optional kiosk secret sent with each request
    kiosk_secret: Option<String>,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Constructs a client for `base_url`. One trailing slash is dropped.
    pub fn new(base_url: &str, kiosk_secret: Option<String>) -> Result<Self, ClientError> {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();
        Url::parse(&base_url).map_err(|source| ClientError::Url {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            base_url,
            kiosk_secret: kiosk_secret.filter(|s| !s.is_empty()),
            client: Client::new(),
            timeout: None,
        })
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn kiosk_secret(&self) -> Option<&str> {
        self.kiosk_secret.as_deref()
    }

    // =========================================================================
    // Generic Verbs
    // =========================================================================

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ClientError> {
        self.request::<(), R>(Method::GET, endpoint, None).await
    }

    /// POST with an optional JSON body; `None` sends no body at all.
    pub async fn post<T, R>(&self, endpoint: &str, data: Option<&T>) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, data).await
    }

    /// PUT with an optional JSON body; `None` sends no body at all.
    pub async fn put<T, R>(&self, endpoint: &str, data: Option<&T>) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PUT, endpoint, data).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ClientError> {
        self.request::<(), R>(Method::DELETE, endpoint, None).await
    }

    async fn request<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&T>,
    ) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        let result = self.send(method.clone(), endpoint, data).await;

        let err = result.as_ref().err();
        logging::api_call(
            method.as_str(),
            endpoint,
            Some(started.elapsed()),
            err.map(|e| e as &(dyn std::error::Error + 'static)),
        );

        result
    }

    async fn send<T, R>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&T>,
    ) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let context = format!("{method} {endpoint}");

        let mut req = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(secret) = &self.kiosk_secret {
            req = req.header(KIOSK_SECRET_HEADER, secret);
        }
        if let Some(data) = data {
            req = req.json(data);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(|source| ClientError::Transport {
            context: context.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            // The body only adds detail; a failed read still reports the status.
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        response
            .json::<R>()
            .await
            .map_err(|source| ClientError::Decode { context, source })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Products visible on a kiosk.
    pub async fn products(&self, kiosk_id: i64) -> Result<Vec<KioskProduct>, ClientError> {
        let response: ApiResponse<Vec<KioskProduct>> =
            self.get(&endpoints::products_for_kiosk(kiosk_id)).await?;
        unwrap_envelope(response)
    }

    /// Records a product tap for the popularity counters.
    pub async fn record_product_click(
        &self,
        product_id: i64,
        kiosk_id: i64,
    ) -> Result<(), ClientError> {
        let response: ApiResponse<Value> = self
            .post(
                &endpoints::product_click(product_id),
                Some(&ProductClickRequest { kiosk_id }),
            )
            .await?;
        check_envelope(response)
    }

    // =========================================================================
    // QR Payments
    // =========================================================================

    pub async fn create_qr_payment(
        &self,
        request: &CreateQrPaymentRequest,
    ) -> Result<CreateQrPaymentResponse, ClientError> {
        let response: ApiResponse<CreateQrPaymentResponse> = self
            .post(endpoints::PAYMENT_CREATE_QR, Some(request))
            .await?;
        unwrap_envelope(response)
    }

    /// Creates the QR payment for a whole cart.
    ///
    /// An `idempotency_key` that was already used returns the existing payment
    /// with `receiptEmailStatus` set.
    pub async fn create_multi_qr_payment(
        &self,
        request: &CreateMultiQrPaymentRequest,
    ) -> Result<CreateMultiQrPaymentResponse, ClientError> {
        self.post(endpoints::PAYMENT_CREATE_MULTI_QR, Some(request))
            .await
    }

    pub async fn payment_status(
        &self,
        payment_id: &str,
    ) -> Result<PaymentStatusResponse, ClientError> {
        let response: ApiResponse<PaymentStatusResponse> =
            self.get(&endpoints::payment_status(payment_id)).await?;
        unwrap_envelope(response)
    }

    pub async fn complete_payment(&self, payment_id: &str) -> Result<(), ClientError> {
        self.payment_action(endpoints::PAYMENT_COMPLETE, payment_id)
            .await
    }

    pub async fn complete_multi_payment(&self, payment_id: &str) -> Result<(), ClientError> {
        self.payment_action(endpoints::PAYMENT_COMPLETE_MULTI, payment_id)
            .await
    }

    pub async fn cancel_payment(&self, payment_id: &str) -> Result<(), ClientError> {
        self.payment_action(endpoints::PAYMENT_CANCEL, payment_id)
            .await
    }

    /// Asks the backend to watch the bank account for this payment.
    pub async fn start_monitoring(
        &self,
        payment_id: &str,
    ) -> Result<StartMonitoringResponse, ClientError> {
        let response: ApiResponse<StartMonitoringResponse> = self
            .post(
                endpoints::PAYMENT_START_MONITORING,
                Some(&StartMonitoringRequest {
                    payment_id: payment_id.to_string(),
                }),
            )
            .await?;
        unwrap_envelope(response)
    }

    pub async fn stop_monitoring(&self, payment_id: &str) -> Result<(), ClientError> {
        self.payment_action(endpoints::PAYMENT_STOP_MONITORING, payment_id)
            .await
    }

    async fn payment_action(&self, endpoint: &str, payment_id: &str) -> Result<(), ClientError> {
        let body = PaymentIdRequest::new(payment_id);
        let response: ApiResponse<Value> = self.post(endpoint, Some(&body)).await?;
        check_envelope(response)
    }

    // =========================================================================
    // ThePay
    // =========================================================================

    pub async fn create_thepay_payment(
        &self,
        request: &ThePayCreateRequest,
    ) -> Result<ThePayCreateResponse, ClientError> {
        let response: ApiResponse<ThePayCreateResponse> = self
            .post(endpoints::PAYMENT_THEPAY_CREATE, Some(request))
            .await?;
        unwrap_envelope(response)
    }

    pub async fn thepay_status(
        &self,
        payment_id: &str,
    ) -> Result<ThePayStatusResponse, ClientError> {
        let response: ApiResponse<ThePayStatusResponse> =
            self.get(&endpoints::thepay_status(payment_id)).await?;
        unwrap_envelope(response)
    }

    pub async fn cancel_thepay_payment(&self, payment_id: &str) -> Result<(), ClientError> {
        self.payment_action(endpoints::PAYMENT_THEPAY_CANCEL, payment_id)
            .await
    }

    pub async fn thepay_methods(&self) -> Result<ThePayMethodsResponse, ClientError> {
        let response: ApiResponse<ThePayMethodsResponse> =
            self.get(endpoints::PAYMENT_THEPAY_METHODS).await?;
        unwrap_envelope(response)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Products with stock and visibility for one kiosk.
    pub async fn admin_products_for_kiosk(
        &self,
        kiosk_id: i64,
    ) -> Result<Vec<AdminProduct>, ClientError> {
        let response: ApiResponse<Vec<AdminProduct>> = self
            .get(&endpoints::admin_products_inventory(kiosk_id))
            .await?;
        unwrap_envelope(response)
    }

    pub async fn update_inventory(
        &self,
        product_id: i64,
        kiosk_id: i64,
        quantity_in_stock: i64,
    ) -> Result<(), ClientError> {
        let response: ApiResponse<Value> = self
            .put(
                &endpoints::admin_product_inventory_update(product_id, kiosk_id),
                Some(&InventoryUpdateRequest { quantity_in_stock }),
            )
            .await?;
        check_envelope(response)
    }

    pub async fn set_kiosk_visibility(
        &self,
        product_id: i64,
        kiosk_id: i64,
        visible: bool,
    ) -> Result<(), ClientError> {
        let response: ApiResponse<Value> = self
            .put(
                &endpoints::admin_product_kiosk_visibility(product_id, kiosk_id),
                Some(&VisibilityToggleRequest { visible }),
            )
            .await?;
        check_envelope(response)
    }

    pub async fn kiosks(&self) -> Result<Vec<Kiosk>, ClientError> {
        let response: ApiResponse<Vec<Kiosk>> = self.get(endpoints::ADMIN_KIOSKS).await?;
        unwrap_envelope(response)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Raw `/health` document.
    pub async fn health(&self) -> Result<Value, ClientError> {
        self.get(endpoints::HEALTH).await
    }

    /// Raw `/health/payment-providers` document.
    pub async fn payment_providers_health(&self) -> Result<Value, ClientError> {
        self.get(endpoints::HEALTH_PAYMENT_PROVIDERS).await
    }
}

/// Converts a string URL into an `ApiClient` without a kiosk secret.
impl TryFrom<&str> for ApiClient {
    type Error = ClientError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value, None)
    }
}

/// Builds a client for `base_url`, or for the configured API URL when none
/// is given.
pub fn create_api_client(
    base_url: Option<&str>,
    kiosk_secret: Option<String>,
    config: &EnvironmentConfig,
) -> Result<ApiClient, ClientError> {
    let url = base_url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| config.api_url());
    ApiClient::new(url, kiosk_secret)
}

fn unwrap_envelope<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    response.into_result().map_err(ClientError::Api)
}

fn check_envelope(response: ApiResponse<Value>) -> Result<(), ClientError> {
    if response.success {
        Ok(())
    } else {
        unwrap_envelope(response).map(|_| ())
    }
}
