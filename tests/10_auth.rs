mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{TestApp, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn register_then_login_returns_tokens() -> Result<()> {
    let app = TestApp::new();
    let registered = app.register("Ada", "ada@example.com").await?;
    assert!(!registered.is_empty());

    let token = app.login("ada@example.com").await?;
    let me = app.get("/api/auth/me", &token).await?;
    assert_eq!(me.status, StatusCode::OK);

    let body = me.json();
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn email_is_stored_lowercase() -> Result<()> {
    let app = TestApp::new();
    app.register("Ada", "Ada@Example.COM").await?;
    app.login("ada@example.com").await?;
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_rejected() -> Result<()> {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com").await?;

    let res = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Other", "email": "ada@example.com", "password": PASSWORD })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.msg(), "User already exists");
    Ok(())
}

#[tokio::test]
async fn registration_reports_every_invalid_field() -> Result<()> {
    let app = TestApp::new();
    let res = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "not-an-email", "password": "123" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let body = res.json();
    assert_eq!(body["msg"], "Name is required");
    let params: Vec<&str> = body["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["param"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(params, vec!["name", "email", "password"]);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() -> Result<()> {
    let app = TestApp::new();
    app.register("Ada", "ada@example.com").await?;

    for body in [
        json!({ "email": "ada@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    ] {
        let res = app.request(Method::POST, "/api/auth", None, Some(body)).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.msg(), "Invalid Credentials");
    }
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() -> Result<()> {
    let app = TestApp::new();

    let missing = app.request(Method::GET, "/api/keywords", None, None).await?;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.msg(), "No token, authorization denied");

    let forged = app.get("/api/keywords", "not.a.token").await?;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.msg(), "Token is not valid");
    Ok(())
}

#[tokio::test]
async fn bearer_header_is_accepted() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["email"], "ada@example.com");
    Ok(())
}

#[tokio::test]
async fn blank_custom_header_does_not_hide_bearer_token() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header("x-auth-token", "")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json().get("msg").is_some());
    Ok(())
}

#[tokio::test]
async fn welcome_health_and_unknown_api_paths() -> Result<()> {
    let app = TestApp::new();

    let welcome = app.request(Method::GET, "/", None, None).await?;
    assert_eq!(welcome.status, StatusCode::OK);
    assert_eq!(welcome.msg(), "Welcome to the Gherkin Tracker API");

    let health = app.request(Method::GET, "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.json()["status"], "ok");
    assert_eq!(health.json()["database"], "memory");

    let missing = app.request(Method::GET, "/api/nothing-here", None, None).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.msg(), "Not found");
    Ok(())
}
