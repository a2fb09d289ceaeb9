use sqlx::PgPool;
use tracing::info;

use super::DatabaseError;

/// Idempotent DDL; uniqueness lives here rather than in handler pre-checks
const MIGRATIONS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT users_email_key UNIQUE (email)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS keywords (
        id UUID PRIMARY KEY,
        text TEXT NOT NULL,
        kind TEXT NOT NULL,
        domain TEXT,
        tags TEXT[] NOT NULL DEFAULT '{}',
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE INDEX IF NOT EXISTS keywords_user_created_idx ON keywords (user_id, created_at DESC)"#,
    r#"CREATE TABLE IF NOT EXISTS domains (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT domains_name_key UNIQUE (name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS templates (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        content TEXT NOT NULL,
        tags TEXT[] NOT NULL DEFAULT '{}',
        is_public BOOLEAN NOT NULL DEFAULT FALSE,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE INDEX IF NOT EXISTS templates_public_idx ON templates (is_public) WHERE is_public"#,
    r#"CREATE TABLE IF NOT EXISTS tags (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        color TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT tags_name_key UNIQUE (name)
    )"#,
];

pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    for statement in MIGRATIONS {
        sqlx::query(*statement).execute(pool).await?;
    }
    info!("Applied {} schema statements", MIGRATIONS.len());
    Ok(())
}
