#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use gherkin_tracker::config::AppConfig;
use gherkin_tracker::database::{MemoryStore, UserStore};
use gherkin_tracker::types::Role;
use gherkin_tracker::{app, AppState};

pub const PASSWORD: &str = "password123";

/// The real router over a fresh in-memory store, driven in-process
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn msg(&self) -> String {
        self.json()["msg"].as_str().unwrap_or_default().to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::new(store.clone(), config));
        Self { store, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    /// Send a hand-built request, for headers or bodies the helpers don't cover
    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(TestResponse { status, headers, body })
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register a user and return their session token
    pub async fn register(&self, name: &str, email: &str) -> Result<String> {
        let res = self
            .request(
                Method::POST,
                "/api/users",
                None,
                Some(json!({ "name": name, "email": email, "password": PASSWORD })),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "register failed: {} {}", res.status, res.text());
        token_of(&res)
    }

    pub async fn login(&self, email: &str) -> Result<String> {
        let res = self
            .request(
                Method::POST,
                "/api/auth",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {} {}", res.status, res.text());
        token_of(&res)
    }

    /// Register, promote to admin, then sign in again so the token carries the role
    pub async fn register_admin(&self, name: &str, email: &str) -> Result<String> {
        self.register(name, email).await?;
        self.store
            .set_user_role(email, Role::Admin)
            .await?
            .context("user vanished before promotion")?;
        self.login(email).await
    }

    pub async fn user_id(&self, token: &str) -> Result<String> {
        let res = self.get("/api/auth/me", token).await?;
        res.json()["_id"]
            .as_str()
            .map(str::to_string)
            .context("me response has no _id")
    }
}

fn token_of(res: &TestResponse) -> Result<String> {
    res.json()["token"]
        .as_str()
        .map(str::to_string)
        .context("response has no token")
}
