mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn tags_get_a_default_color() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;

    let res = app.post("/api/tags", &token, json!({ "name": "smoke" })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["color"], "#3498db");

    let duplicate = app.post("/api/tags", &token, json!({ "name": "smoke", "color": "#fff" })).await?;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.msg(), "Tag already exists");
    Ok(())
}

#[tokio::test]
async fn tag_color_must_be_hex() -> Result<()> {
    let app = TestApp::new();
    let token = app.register("Ada", "ada@example.com").await?;

    let res = app.post("/api/tags", &token, json!({ "name": "slow", "color": "blue" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.msg(), "Color must be a hex value such as #3498db");
    Ok(())
}

#[tokio::test]
async fn only_admins_edit_or_remove_tags() -> Result<()> {
    let app = TestApp::new();
    let user = app.register("Ada", "ada@example.com").await?;
    let admin = app.register_admin("Root", "root@example.com").await?;

    let created = app.post("/api/tags", &user, json!({ "name": "regression" })).await?.json();
    let uri = format!("/api/tags/{}", created["_id"].as_str().unwrap_or_default());

    let denied = app.put(&uri, &user, json!({ "color": "#000000" })).await?;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.msg(), "Admin access required");
    assert_eq!(app.delete(&uri, &user).await?.status, StatusCode::FORBIDDEN);

    let updated = app.put(&uri, &admin, json!({ "color": "#000000" })).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["color"], "#000000");
    assert_eq!(updated.json()["name"], "regression");

    let removed = app.delete(&uri, &admin).await?;
    assert_eq!(removed.msg(), "Tag removed");
    assert_eq!(app.get("/api/tags", &user).await?.json(), json!([]));
    Ok(())
}

#[tokio::test]
async fn tags_are_shared_between_users() -> Result<()> {
    let app = TestApp::new();
    let ada = app.register("Ada", "ada@example.com").await?;
    let bob = app.register("Bob", "bob@example.com").await?;

    let created = app.post("/api/tags", &ada, json!({ "name": "smoke" })).await?.json();
    let listed = app.get("/api/tags", &bob).await?.json();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let uri = format!("/api/tags/{}", created["_id"].as_str().unwrap_or_default());
    assert_eq!(app.get(&uri, &bob).await?.json()["name"], "smoke");
    Ok(())
}
