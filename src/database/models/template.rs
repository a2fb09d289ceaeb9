use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reusable block of feature text, optionally shared with every user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub user: Uuid,
    pub date: DateTime<Utc>,
}

impl Template {
    pub fn new(user: Uuid, name: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            content,
            tags: Vec::new(),
            is_public: false,
            user,
            date: super::stored_now(),
        }
    }

    /// Public templates are readable by anyone signed in
    pub fn is_visible_to(&self, user: Uuid, is_admin: bool) -> bool {
        self.is_public || self.user == user || is_admin
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl TemplatePatch {
    pub fn apply(self, template: &mut Template) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(description) = self.description {
            template.description = Some(description);
        }
        if let Some(content) = self.content {
            template.content = content;
        }
        if let Some(tags) = self.tags {
            template.tags = tags;
        }
        if let Some(is_public) = self.is_public {
            template.is_public = is_public;
        }
    }
}

#[derive(Debug, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            content: row.content,
            tags: row.tags,
            is_public: row.is_public,
            user: row.user_id,
            date: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_follows_ownership_and_sharing() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut template = Template::new(owner, "Login".to_string(), "Feature: Login".to_string());

        assert!(template.is_visible_to(owner, false));
        assert!(!template.is_visible_to(other, false));
        assert!(template.is_visible_to(other, true));

        template.is_public = true;
        assert!(template.is_visible_to(other, false));
    }

    #[test]
    fn patch_can_unpublish() {
        let mut template = Template::new(Uuid::new_v4(), "Login".to_string(), "Feature: Login".to_string());
        template.is_public = true;

        TemplatePatch {
            is_public: Some(false),
            ..Default::default()
        }
        .apply(&mut template);

        assert!(!template.is_public);
        assert_eq!(template.content, "Feature: Login");
    }

    #[test]
    fn input_uses_camel_case() {
        let input: TemplateInput =
            serde_json::from_value(serde_json::json!({ "name": "x", "isPublic": true })).unwrap();
        assert_eq!(input.is_public, Some(true));
    }
}
