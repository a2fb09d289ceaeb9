// handlers/mod.rs - Route handlers grouped by security tier
//
// Public (no token) → Protected (JWT auth applied as a route layer)

pub mod protected;
pub mod public;
pub mod root;

use uuid::Uuid;

use crate::error::ApiError;

/// A path id that is not a UUID cannot name a record
pub fn parse_id(id: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
