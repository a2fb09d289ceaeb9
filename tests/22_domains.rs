mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn domain_names_are_unique_across_users() -> Result<()> {
    let app = TestApp::new();
    let ada = app.register("Ada", "ada@example.com").await?;
    let bob = app.register("Bob", "bob@example.com").await?;

    let first = app
        .post("/api/domains", &ada, json!({ "name": "Checkout", "description": "Payments" }))
        .await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json()["description"], "Payments");

    let second = app.post("/api/domains", &bob, json!({ "name": "Checkout" })).await?;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.msg(), "Domain already exists");
    Ok(())
}

#[tokio::test]
async fn domain_requires_a_name() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;
    let res = app.post("/api/domains", &token, json!({ "description": "no name" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.msg(), "Name is required");
    Ok(())
}

#[tokio::test]
async fn domain_update_and_delete_are_owner_only() -> Result<()> {
    let app = TestApp::new();
    let ada = app.register("Ada", "ada@example.com").await?;
    let bob = app.register("Bob", "bob@example.com").await?;

    let created = app.post("/api/domains", &ada, json!({ "name": "Search" })).await?.json();
    let uri = format!("/api/domains/{}", created["_id"].as_str().unwrap_or_default());

    let denied = app.put(&uri, &bob, json!({ "description": "mine now" })).await?;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let updated = app.put(&uri, &ada, json!({ "description": "Site search" })).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["name"], "Search");
    assert_eq!(updated.json()["description"], "Site search");

    let listed = app.get("/api/domains", &ada).await?.json();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(app.get("/api/domains", &bob).await?.json(), json!([]));

    let removed = app.delete(&uri, &ada).await?;
    assert_eq!(removed.msg(), "Domain removed");
    assert_eq!(app.get(&uri, &ada).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn renaming_onto_a_taken_name_conflicts() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;
    app.post("/api/domains", &token, json!({ "name": "Auth" })).await?;
    let other = app.post("/api/domains", &token, json!({ "name": "Search" })).await?.json();

    let uri = format!("/api/domains/{}", other["_id"].as_str().unwrap_or_default());
    let res = app.put(&uri, &token, json!({ "name": "Auth" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.msg(), "Domain already exists");
    Ok(())
}
