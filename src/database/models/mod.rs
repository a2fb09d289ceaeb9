use chrono::{DateTime, SubsecRound, Utc};

pub mod domain;
pub mod keyword;
pub mod tag;
pub mod template;
pub mod user;

pub use domain::{Domain, DomainInput, DomainPatch};
pub use keyword::{Keyword, KeywordInput, KeywordPatch, KeywordRow};
pub use tag::{is_hex_color, Tag, TagInput, TagPatch, DEFAULT_TAG_COLOR};
pub use template::{Template, TemplateInput, TemplatePatch, TemplateRow};
pub use user::{NewUser, User, UserRow};

/// Creation timestamp at the microsecond precision a `TIMESTAMPTZ` column
/// keeps, so a freshly created record matches what a later read returns.
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A supplied string field. Omitted and empty strings both read as "not
/// supplied", so an update can never blank out a stored value.
pub fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
