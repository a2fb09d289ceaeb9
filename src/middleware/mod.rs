pub mod auth;
pub mod response;
pub mod validate;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use response::{CsvDownload, JsonBody};
pub use validate::{FieldError, FieldErrors};
