use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Domain, Keyword, Tag, Template, User};
use super::store::{DomainStore, KeywordStore, Store, StoreResult, TagStore, TemplateStore, UserStore};
use super::DatabaseError;
use crate::filter::KeywordFilter;
use crate::types::Role;

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    keywords: HashMap<Uuid, Keyword>,
    domains: HashMap<Uuid, Domain>,
    templates: HashMap<Uuid, Template>,
    tags: HashMap<Uuid, Tag>,
}

/// Process-local store. Unique names are checked and written under one
/// write lock, so concurrent creates cannot both win.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(mut items: Vec<T>, date: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    items.sort_by(|a, b| date(b).cmp(&date(a)));
    items
}

fn replace<T: Clone>(map: &mut HashMap<Uuid, T>, id: Uuid, value: T, what: &str) -> StoreResult<T> {
    match map.get_mut(&id) {
        Some(slot) => {
            *slot = value.clone();
            Ok(value)
        }
        None => Err(DatabaseError::NotFound(format!("{} not found", what))),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("User already exists".to_string()));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn set_user_role(&self, email: &str, role: Role) -> StoreResult<Option<User>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.values_mut().find(|u| u.email == email).map(|user| {
            user.role = role;
            user.clone()
        }))
    }
}

#[async_trait]
impl KeywordStore for MemoryStore {
    async fn list_keywords(&self, filter: &KeywordFilter) -> StoreResult<Vec<Keyword>> {
        let inner = self.inner.read().await;
        let matching = inner.keywords.values().filter(|k| filter.matches(k)).cloned().collect();
        let mut sorted = newest_first(matching, |k: &Keyword| k.date);
        if let Some(limit) = filter.limit {
            sorted.truncate(limit);
        }
        Ok(sorted)
    }

    async fn count_keywords(&self, filter: &KeywordFilter) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.keywords.values().filter(|k| filter.matches(k)).count() as u64)
    }

    async fn get_keyword(&self, id: Uuid) -> StoreResult<Option<Keyword>> {
        Ok(self.inner.read().await.keywords.get(&id).cloned())
    }

    async fn insert_keyword(&self, keyword: Keyword) -> StoreResult<Keyword> {
        self.inner.write().await.keywords.insert(keyword.id, keyword.clone());
        Ok(keyword)
    }

    async fn update_keyword(&self, keyword: Keyword) -> StoreResult<Keyword> {
        let mut inner = self.inner.write().await;
        replace(&mut inner.keywords, keyword.id, keyword, "Keyword")
    }

    async fn delete_keyword(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.keywords.remove(&id).is_some())
    }
}

#[async_trait]
impl DomainStore for MemoryStore {
    async fn list_domains(&self, owner: Uuid) -> StoreResult<Vec<Domain>> {
        let inner = self.inner.read().await;
        let owned = inner.domains.values().filter(|d| d.user == owner).cloned().collect();
        Ok(newest_first(owned, |d: &Domain| d.date))
    }

    async fn count_domains(&self, owner: Uuid) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.domains.values().filter(|d| d.user == owner).count() as u64)
    }

    async fn get_domain(&self, id: Uuid) -> StoreResult<Option<Domain>> {
        Ok(self.inner.read().await.domains.get(&id).cloned())
    }

    async fn insert_domain(&self, domain: Domain) -> StoreResult<Domain> {
        let mut inner = self.inner.write().await;
        if inner.domains.values().any(|d| d.name == domain.name) {
            return Err(DatabaseError::Conflict("Domain already exists".to_string()));
        }
        inner.domains.insert(domain.id, domain.clone());
        Ok(domain)
    }

    async fn update_domain(&self, domain: Domain) -> StoreResult<Domain> {
        let mut inner = self.inner.write().await;
        if inner.domains.values().any(|d| d.name == domain.name && d.id != domain.id) {
            return Err(DatabaseError::Conflict("Domain already exists".to_string()));
        }
        replace(&mut inner.domains, domain.id, domain, "Domain")
    }

    async fn delete_domain(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.domains.remove(&id).is_some())
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list_visible_templates(&self, user: Uuid) -> StoreResult<Vec<Template>> {
        let inner = self.inner.read().await;
        let visible = inner
            .templates
            .values()
            .filter(|t| t.user == user || t.is_public)
            .cloned()
            .collect();
        Ok(newest_first(visible, |t: &Template| t.date))
    }

    async fn count_templates(&self, owner: Uuid) -> StoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.templates.values().filter(|t| t.user == owner).count() as u64)
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>> {
        Ok(self.inner.read().await.templates.get(&id).cloned())
    }

    async fn insert_template(&self, template: Template) -> StoreResult<Template> {
        self.inner.write().await.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn update_template(&self, template: Template) -> StoreResult<Template> {
        let mut inner = self.inner.write().await;
        replace(&mut inner.templates, template.id, template, "Template")
    }

    async fn delete_template(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.templates.remove(&id).is_some())
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let inner = self.inner.read().await;
        Ok(newest_first(inner.tags.values().cloned().collect(), |t: &Tag| t.date))
    }

    async fn get_tag(&self, id: Uuid) -> StoreResult<Option<Tag>> {
        Ok(self.inner.read().await.tags.get(&id).cloned())
    }

    async fn insert_tag(&self, tag: Tag) -> StoreResult<Tag> {
        let mut inner = self.inner.write().await;
        if inner.tags.values().any(|t| t.name == tag.name) {
            return Err(DatabaseError::Conflict("Tag already exists".to_string()));
        }
        inner.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, tag: Tag) -> StoreResult<Tag> {
        let mut inner = self.inner.write().await;
        if inner.tags.values().any(|t| t.name == tag.name && t.id != tag.id) {
            return Err(DatabaseError::Conflict("Tag already exists".to_string()));
        }
        replace(&mut inner.tags, tag.id, tag, "Tag")
    }

    async fn delete_tag(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.tags.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
