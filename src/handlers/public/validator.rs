use axum::Json;
use serde_json::{json, Value};

/// GET /api/validator/test
pub async fn validator_test() -> Json<Value> {
    Json(json!({ "msg": "Validator route is working" }))
}
