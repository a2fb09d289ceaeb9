use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{Domain, Keyword, KeywordRow, Tag, Template, TemplateRow, User, UserRow};
use super::store::{DomainStore, KeywordStore, Store, StoreResult, TagStore, TemplateStore, UserStore};
use super::{schema, DatabaseError, DatabaseManager};
use crate::config::DatabaseConfig;
use crate::filter::KeywordFilter;
use crate::types::Role;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";
const KEYWORD_COLUMNS: &str = "id, text, kind, domain, tags, user_id, created_at";
const DOMAIN_COLUMNS: &str = r#"id, name, description, user_id AS "user", created_at AS date"#;
const TEMPLATE_COLUMNS: &str = "id, name, description, content, tags, is_public, user_id, created_at";
const TAG_COLUMNS: &str = "id, name, color, created_at AS date";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect(config).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        schema::migrate(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique-constraint violation (SQLSTATE 23505) to a client-facing conflict
fn conflict_on_unique(err: sqlx::Error, message: &str) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            return DatabaseError::Conflict(message.to_string());
        }
    }
    DatabaseError::Sqlx(err)
}

fn not_found(what: &str) -> DatabaseError {
    DatabaseError::NotFound(format!("{} not found", what))
}

/// Appends the WHERE clause for a keyword filter
fn push_keyword_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &KeywordFilter) {
    builder.push(" WHERE TRUE");
    if let Some(owner) = filter.owner {
        builder.push(" AND user_id = ").push_bind(owner);
    }
    if let Some(domain) = &filter.domain {
        builder.push(" AND domain = ").push_bind(domain.clone());
    }
    if let Some(kind) = filter.kind {
        builder.push(" AND kind = ").push_bind(kind.as_str());
    }
    if let Some(tag) = &filter.tag {
        builder.push(" AND ").push_bind(tag.clone()).push(" = ANY(tags)");
    }
    if let Some(since) = filter.since {
        builder.push(" AND created_at >= ").push_bind(since);
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.date)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "User already exists"))?;
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn set_user_role(&self, email: &str, role: Role) -> StoreResult<Option<User>> {
        let sql = format!("UPDATE users SET role = $1 WHERE email = $2 RETURNING {USER_COLUMNS}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.as_str())
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl KeywordStore for PgStore {
    async fn list_keywords(&self, filter: &KeywordFilter) -> StoreResult<Vec<Keyword>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {KEYWORD_COLUMNS} FROM keywords"));
        push_keyword_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<KeywordRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Keyword::try_from).collect()
    }

    async fn count_keywords(&self, filter: &KeywordFilter) -> StoreResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM keywords");
        push_keyword_filter(&mut builder, filter);
        let (count,): (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn get_keyword(&self, id: Uuid) -> StoreResult<Option<Keyword>> {
        let sql = format!("SELECT {KEYWORD_COLUMNS} FROM keywords WHERE id = $1");
        let row = sqlx::query_as::<_, KeywordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Keyword::try_from).transpose()
    }

    async fn insert_keyword(&self, keyword: Keyword) -> StoreResult<Keyword> {
        sqlx::query(
            "INSERT INTO keywords (id, text, kind, domain, tags, user_id, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(keyword.id)
        .bind(&keyword.text)
        .bind(keyword.kind.as_str())
        .bind(&keyword.domain)
        .bind(&keyword.tags)
        .bind(keyword.user)
        .bind(keyword.date)
        .execute(&self.pool)
        .await?;
        Ok(keyword)
    }

    async fn update_keyword(&self, keyword: Keyword) -> StoreResult<Keyword> {
        let result = sqlx::query("UPDATE keywords SET text = $2, kind = $3, domain = $4, tags = $5 WHERE id = $1")
            .bind(keyword.id)
            .bind(&keyword.text)
            .bind(keyword.kind.as_str())
            .bind(&keyword.domain)
            .bind(&keyword.tags)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Keyword"));
        }
        Ok(keyword)
    }

    async fn delete_keyword(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM keywords WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DomainStore for PgStore {
    async fn list_domains(&self, owner: Uuid) -> StoreResult<Vec<Domain>> {
        let sql = format!("SELECT {DOMAIN_COLUMNS} FROM domains WHERE user_id = $1 ORDER BY created_at DESC");
        Ok(sqlx::query_as::<_, Domain>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn count_domains(&self, owner: Uuid) -> StoreResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM domains WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn get_domain(&self, id: Uuid) -> StoreResult<Option<Domain>> {
        let sql = format!("SELECT {DOMAIN_COLUMNS} FROM domains WHERE id = $1");
        Ok(sqlx::query_as::<_, Domain>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_domain(&self, domain: Domain) -> StoreResult<Domain> {
        sqlx::query("INSERT INTO domains (id, name, description, user_id, created_at) VALUES ($1, $2, $3, $4, $5)")
            .bind(domain.id)
            .bind(&domain.name)
            .bind(&domain.description)
            .bind(domain.user)
            .bind(domain.date)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Domain already exists"))?;
        Ok(domain)
    }

    async fn update_domain(&self, domain: Domain) -> StoreResult<Domain> {
        let result = sqlx::query("UPDATE domains SET name = $2, description = $3 WHERE id = $1")
            .bind(domain.id)
            .bind(&domain.name)
            .bind(&domain.description)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Domain already exists"))?;
        if result.rows_affected() == 0 {
            return Err(not_found("Domain"));
        }
        Ok(domain)
    }

    async fn delete_domain(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM domains WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TemplateStore for PgStore {
    async fn list_visible_templates(&self, user: Uuid) -> StoreResult<Vec<Template>> {
        let sql = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE user_id = $1 OR is_public ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, TemplateRow>(&sql)
            .bind(user)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Template::from).collect())
    }

    async fn count_templates(&self, owner: Uuid) -> StoreResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM templates WHERE user_id = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<Template>> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1");
        let row = sqlx::query_as::<_, TemplateRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Template::from))
    }

    async fn insert_template(&self, template: Template) -> StoreResult<Template> {
        sqlx::query(
            "INSERT INTO templates (id, name, description, content, tags, is_public, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.content)
        .bind(&template.tags)
        .bind(template.is_public)
        .bind(template.user)
        .bind(template.date)
        .execute(&self.pool)
        .await?;
        Ok(template)
    }

    async fn update_template(&self, template: Template) -> StoreResult<Template> {
        let result = sqlx::query(
            "UPDATE templates SET name = $2, description = $3, content = $4, tags = $5, is_public = $6 WHERE id = $1",
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.content)
        .bind(&template.tags)
        .bind(template.is_public)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Template"));
        }
        Ok(template)
    }

    async fn delete_template(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TagStore for PgStore {
    async fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let sql = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY created_at DESC");
        Ok(sqlx::query_as::<_, Tag>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get_tag(&self, id: Uuid) -> StoreResult<Option<Tag>> {
        let sql = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        Ok(sqlx::query_as::<_, Tag>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_tag(&self, tag: Tag) -> StoreResult<Tag> {
        sqlx::query("INSERT INTO tags (id, name, color, created_at) VALUES ($1, $2, $3, $4)")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.color)
            .bind(tag.date)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Tag already exists"))?;
        Ok(tag)
    }

    async fn update_tag(&self, tag: Tag) -> StoreResult<Tag> {
        let result = sqlx::query("UPDATE tags SET name = $2, color = $3 WHERE id = $1")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.color)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "Tag already exists"))?;
        if result.rows_affected() == 0 {
            return Err(not_found("Tag"));
        }
        Ok(tag)
    }

    async fn delete_tag(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}
