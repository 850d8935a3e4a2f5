//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use dataroom_api::{AppState, build_app};
use dataroom_auth::{JwtEncoder, JwtIdentityProvider};
use dataroom_core::config::{AppConfig, StoreProvider};
use dataroom_core::types::UserId;
use dataroom_database::MemoryStore;
use dataroom_entity::user::UserRole;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Token issuer sharing the server's secret
    pub encoder: JwtEncoder,
}

/// A caller with a valid bearer token.
pub struct TestUser {
    pub id: UserId,
    pub token: String,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let identity = Arc::new(JwtIdentityProvider::new(&config.auth));
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config, Arc::new(MemoryStore::new()), identity);

        Self {
            router: build_app(state),
            encoder,
        }
    }

    /// Mint a token for a fresh user with the given role
    pub fn user(&self, role: UserRole) -> TestUser {
        let id = UserId::new();
        let (token, _) = self
            .encoder
            .generate_access_token(id, role, &format!("{role}-{id}"))
            .expect("Failed to issue token");
        TestUser { id, token }
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder and return its ID as a string
    pub async fn create_folder(&self, user: &TestUser, name: &str, parent: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent })),
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("folder id")
            .to_string()
    }

    /// Register a document and return its ID as a string
    pub async fn create_document(
        &self,
        user: &TestUser,
        filename: &str,
        folder: Option<&str>,
    ) -> String {
        let response = self
            .request(
                "POST",
                "/api/documents",
                Some(serde_json::json!({
                    "filename": filename,
                    "size_bytes": 512,
                    "folder_id": folder,
                })),
                Some(&user.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("document id")
            .to_string()
    }
}

/// Simplified test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
