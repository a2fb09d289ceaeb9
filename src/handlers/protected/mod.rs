// handlers/protected/mod.rs - Protected handlers (JWT required)
//
// Every handler here runs behind `jwt_auth_middleware` and receives the
// caller as `Extension<AuthUser>`. Ownership and role checks happen in the
// handlers themselves.

pub mod account;
pub mod domains;
pub mod keywords;
pub mod reports;
pub mod tags;
pub mod templates;
pub mod validator;

use axum::Json;
use serde_json::{json, Value};

/// Confirmation body for deletes
pub(crate) fn removed(entity: &str) -> Json<Value> {
    Json(json!({ "msg": format!("{} removed", entity) }))
}
