//! Storage seams. Handlers only ever see `dyn Store`, so the PostgreSQL
//! and in-memory backends are interchangeable.

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Domain, Keyword, Tag, Template, User};
use super::DatabaseError;
use crate::filter::KeywordFilter;
use crate::types::Role;

pub type StoreResult<T> = Result<T, DatabaseError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is taken
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn set_user_role(&self, email: &str, role: Role) -> StoreResult<Option<User>>;
}

#[async_trait]
pub trait KeywordStore: Send + Sync {
    async fn list_keywords(&self, filter: &KeywordFilter) -> StoreResult<Vec<Keyword>>;
    async fn count_keywords(&self, filter: &KeywordFilter) -> StoreResult<u64>;
    async fn get_keyword(&self, id: Uuid) -> StoreResult<Option<Keyword>>;
    async fn insert_keyword(&self, keyword: Keyword) -> StoreResult<Keyword>;
    /// Overwrites the mutable fields; `NotFound` if the row vanished
    async fn update_keyword(&self, keyword: Keyword) -> StoreResult<Keyword>;
    async fn delete_keyword(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn list_domains(&self, owner: Uuid) -> StoreResult<Vec<Domain>>;
    async fn count_domains(&self, owner: Uuid) -> StoreResult<u64>;
    async fn get_domain(&self, id: Uuid) -> StoreResult<Option<Domain>>;
    /// Fails with `Conflict` when the name is taken
    async fn insert_domain(&self, domain: Domain) -> StoreResult<Domain>;
    async fn update_domain(&self, domain: Domain) -> StoreResult<Domain>;
    async fn delete_domain(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// The caller's own templates plus every public one
    async fn list_visible_templates(&self, user: Uuid) -> StoreResult<Vec<Template>>;
    async fn count_templates(&self, owner: Uuid) -> StoreResult<u64>;
    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>>;
    async fn insert_template(&self, template: Template) -> StoreResult<Template>;
    async fn update_template(&self, template: Template) -> StoreResult<Template>;
    async fn delete_template(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>>;
    async fn get_tag(&self, id: Uuid) -> StoreResult<Option<Tag>>;
    /// Fails with `Conflict` when the name is taken
    async fn insert_tag(&self, tag: Tag) -> StoreResult<Tag>;
    async fn update_tag(&self, tag: Tag) -> StoreResult<Tag>;
    async fn delete_tag(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait Store: UserStore + KeywordStore + DomainStore + TemplateStore + TagStore {
    /// Short backend label for logs and the health endpoint
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;
}
