//! Router fixture for endpoint tests: the full `/api` router over the
//! in-memory store, a mock identity provider and a mock payment processor.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::adapters::auth::MockTokenVerifier;
use crate::adapters::memory::InMemoryStore;
use crate::adapters::stripe::MockPaymentProvider;
use crate::application::handlers::test_support::seed_user;
use crate::application::IdentityResolver;
use crate::domain::foundation::Role;
use crate::domain::user::User;

use super::router::app_router;
use super::state::{AppState, Repositories};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub provider: Arc<MockPaymentProvider>,
    verifier: Arc<MockTokenVerifier>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let provider = Arc::new(MockPaymentProvider::new());
        let verifier = Arc::new(MockTokenVerifier::new());
        let resolver = Arc::new(IdentityResolver::new(verifier.clone(), store.clone()));

        let state = AppState::new(
            Repositories::in_memory(store.clone()),
            provider.clone(),
            resolver,
            "usd",
        );

        Self {
            store,
            provider,
            verifier,
            router: app_router(state),
        }
    }

    /// Seeds a user with `role` and returns a bearer token for them.
    pub async fn login(&self, email: &str, role: Role) -> String {
        self.login_user(email, role).await.1
    }

    pub async fn login_user(&self, email: &str, role: Role) -> (User, String) {
        let uid = format!("uid-{}", email);
        let user = seed_user(&self.store, email, &uid, role).await;
        let token = format!("token-{}", email);
        self.verifier.add_token(&token, uid, email);
        (user, token)
    }

    /// Makes a token valid at the identity provider without a local user.
    pub fn provider_only_token(&self, email: &str) -> String {
        let token = format!("token-{}", email);
        self.verifier.add_token(&token, format!("uid-{}", email), email);
        token
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(method, uri, Some(token), Some(body)).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
