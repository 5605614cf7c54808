//! # HTTP Backend Client
//!
//! JSON-over-HTTP implementation of the `Backend` trait against the kiosk
//! server API. Every request carries a bearer token; payment submissions
//! additionally carry an idempotency key.

use crate::config::BackendConfig;
use async_trait::async_trait;
use desk_core::{
    Backend, Cart, DeskError, DeskResult, Identifiable, PaymentTransaction, Product, User,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// `Backend` implementation talking JSON over HTTP
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> DeskResult<Self> {
        let config = BackendConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.endpoint(path))
            .header("Authorization", self.config.auth_header())
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint(path))
            .header("Authorization", self.config.auth_header())
    }

    fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .patch(self.endpoint(path))
            .header("Authorization", self.config.auth_header())
    }

    /// Send a request and decode the JSON body, mapping transport and
    /// non-success statuses to typed errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> DeskResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| DeskError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeskError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Backend API error: status={}, body={}", status, body);
            return Err(DeskError::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            DeskError::Serialization(format!("Failed to parse backend response: {}", e))
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn resolve_identifier(&self, identifier: &str) -> DeskResult<Identifiable> {
        let path = format!("/identifiers/{}.json", identifier);
        match self.execute::<Identifiable>(self.get(&path)).await {
            Err(DeskError::Backend { status: 404, .. }) => Err(DeskError::IdentifierNotFound {
                identifier: identifier.to_string(),
            }),
            other => {
                if let Ok(ref item) = other {
                    debug!("Resolved identifier {} to {}", identifier, item.name());
                }
                other
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_products(&self) -> DeskResult<Vec<Product>> {
        self.execute(self.get("/products.json")).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: u64) -> DeskResult<Product> {
        let path = format!("/products/{}.json", id);
        match self.execute(self.get(&path)).await {
            Err(DeskError::Backend { status: 404, .. }) => Err(DeskError::ResourceNotFound {
                resource: format!("product {}", id),
            }),
            other => other,
        }
    }

    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn save_product(&self, product: &Product) -> DeskResult<Product> {
        let path = format!("/products/{}.json", product.id);
        self.execute(self.patch(&path).json(product)).await
    }

    #[instrument(skip(self))]
    async fn get_users(&self) -> DeskResult<Vec<User>> {
        self.execute(self.get("/users.json")).await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: u64) -> DeskResult<User> {
        let path = format!("/users/{}.json", id);
        match self.execute(self.get(&path)).await {
            Err(DeskError::Backend { status: 404, .. }) => Err(DeskError::ResourceNotFound {
                resource: format!("user {}", id),
            }),
            other => other,
        }
    }

    #[instrument(skip(self, user), fields(user = %user.name))]
    async fn save_user(&self, user: &User) -> DeskResult<User> {
        match user.id {
            Some(id) => {
                let path = format!("/users/{}.json", id);
                self.execute(self.patch(&path).json(user)).await
            }
            None => self.execute(self.post("/users.json").json(user)).await,
        }
    }

    #[instrument(skip(self, cart), fields(cart_id = ?cart.id, items = cart.item_count()))]
    async fn create_or_update_cart(&self, cart: &Cart) -> DeskResult<Cart> {
        let stored: Cart = match cart.id {
            Some(id) => {
                let path = format!("/carts/{}.json", id);
                self.execute(self.patch(&path).json(cart)).await?
            }
            None => self.execute(self.post("/carts.json").json(cart)).await?,
        };
        debug!("Stored cart {:?} with {} items", stored.id, stored.item_count());
        Ok(stored)
    }

    #[instrument(skip(self, cart), fields(cart_id = ?cart.id))]
    async fn pay_cart(&self, cart: &Cart) -> DeskResult<PaymentTransaction> {
        let cart_id = cart.id.ok_or_else(|| {
            DeskError::InvalidRequest("Cart has no identity; persist it before payment".to_string())
        })?;

        let path = format!("/carts/{}/pay.json", cart_id);
        let idempotency_key = Uuid::new_v4().to_string();

        let result: DeskResult<PaymentTransaction> = self
            .execute(
                self.post(&path)
                    .header("Idempotency-Key", &idempotency_key)
                    .json(&json!({ "cart_id": cart_id })),
            )
            .await;

        match result {
            Ok(transaction) => {
                info!(
                    "Payment settled: transaction={}, cart={}",
                    transaction.id, transaction.cart_id
                );
                Ok(transaction)
            }
            Err(DeskError::Backend {
                status: 402,
                message,
            }) => Err(DeskError::PaymentDeclined { reason: message }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::Pricing;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> HttpBackend {
        HttpBackend::new(BackendConfig::new(server.uri(), "test-token"))
    }

    fn product_body() -> serde_json::Value {
        json!({
            "type": "product",
            "id": 7,
            "name": "Club-Mate",
            "tags": ["drink"],
            "pricings": [{"id": 1, "name": "Member", "amount": 150}]
        })
    }

    #[tokio::test]
    async fn test_resolve_identifier_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identifiers/A1.json"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body()))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let item = backend.resolve_identifier("A1").await.unwrap();

        match item {
            Identifiable::Product(product) => {
                assert_eq!(product.id, 7);
                assert_eq!(
                    product.default_pricing(),
                    Some(&Pricing::new(1, "Member", 150))
                );
            }
            Identifiable::User(_) => panic!("expected product variant"),
        }
    }

    #[tokio::test]
    async fn test_resolve_identifier_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identifiers/U9.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "user",
                "id": 3,
                "name": "Ada",
                "active": true,
                "identifiers": ["U9"]
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let item = backend.resolve_identifier("U9").await.unwrap();
        assert!(matches!(item, Identifiable::User(ref user) if user.id == Some(3)));
    }

    #[tokio::test]
    async fn test_resolve_identifier_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identifiers/ZZZ.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.resolve_identifier("ZZZ").await.unwrap_err();
        assert!(matches!(
            err,
            DeskError::IdentifierNotFound { ref identifier } if identifier == "ZZZ"
        ));
    }

    #[tokio::test]
    async fn test_resolve_identifier_server_error_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/identifiers/A1.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.resolve_identifier("A1").await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_pay_cart_sends_idempotency_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/carts/5/pay.json"))
            .and(header_exists("Idempotency-Key"))
            .and(body_json(json!({"cart_id": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 99,
                "cart_id": 5,
                "created_at": "2024-06-01T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let mut cart = Cart::new();
        cart.id = Some(5);

        let transaction = backend.pay_cart(&cart).await.unwrap();
        assert_eq!(transaction.id, 99);
        assert_eq!(transaction.cart_id, 5);
    }

    #[tokio::test]
    async fn test_pay_cart_declined() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/carts/5/pay.json"))
            .respond_with(ResponseTemplate::new(402).set_body_string("insufficient funds"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let mut cart = Cart::new();
        cart.id = Some(5);

        let err = backend.pay_cart(&cart).await.unwrap_err();
        assert!(matches!(
            err,
            DeskError::PaymentDeclined { ref reason } if reason == "insufficient funds"
        ));
    }

    #[tokio::test]
    async fn test_pay_cart_requires_identity() {
        let server = MockServer::start().await;
        let backend = backend_for(&server);

        let err = backend.pay_cart(&Cart::new()).await.unwrap_err();
        assert!(matches!(err, DeskError::InvalidRequest(_)));
        // No request must have been issued
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_cart_posts_when_unsaved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/carts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "line_items": []
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let stored = backend.create_or_update_cart(&Cart::new()).await.unwrap();
        assert_eq!(stored.id, Some(5));
    }

    #[tokio::test]
    async fn test_update_cart_patches_when_saved() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/carts/5.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "line_items": []
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let mut cart = Cart::new();
        cart.id = Some(5);

        let stored = backend.create_or_update_cart(&cart).await.unwrap();
        assert_eq!(stored.id, Some(5));
    }

    #[tokio::test]
    async fn test_save_user_posts_when_unsaved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 11,
                "name": "Ada",
                "active": true,
                "identifiers": ["U9"]
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let saved = backend
            .save_user(&User::new("Ada").with_identifier("U9"))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(11));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/42.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.get_product(42).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
