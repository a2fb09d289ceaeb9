use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::DatabaseError;
use crate::types::KeywordType;

/// A single Gherkin step phrase owned by the user who recorded it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: KeywordType,
    pub domain: Option<String>,
    pub tags: Vec<String>,
    pub user: Uuid,
    pub date: DateTime<Utc>,
}

impl Keyword {
    pub fn new(user: Uuid, text: String, kind: KeywordType) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            kind,
            domain: None,
            tags: Vec::new(),
            user,
            date: super::stored_now(),
        }
    }
}

/// Request body for create and update
#[derive(Debug, Default, Deserialize)]
pub struct KeywordInput {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domain: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Fields an update actually changes
#[derive(Debug, Default)]
pub struct KeywordPatch {
    pub text: Option<String>,
    pub kind: Option<KeywordType>,
    pub domain: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl KeywordPatch {
    pub fn apply(self, keyword: &mut Keyword) {
        if let Some(text) = self.text {
            keyword.text = text;
        }
        if let Some(kind) = self.kind {
            keyword.kind = kind;
        }
        if let Some(domain) = self.domain {
            keyword.domain = Some(domain);
        }
        if let Some(tags) = self.tags {
            keyword.tags = tags;
        }
    }
}

#[derive(Debug, FromRow)]
pub struct KeywordRow {
    pub id: Uuid,
    pub text: String,
    pub kind: String,
    pub domain: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<KeywordRow> for Keyword {
    type Error = DatabaseError;

    fn try_from(row: KeywordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            text: row.text,
            kind: row.kind.parse().map_err(DatabaseError::Corrupt)?,
            domain: row.domain,
            tags: row.tags,
            user: row.user_id,
            date: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut keyword = Keyword::new(Uuid::new_v4(), "Given I log in".to_string(), KeywordType::Given);
        keyword.domain = Some("Auth".to_string());
        keyword.tags = vec!["smoke".to_string()];

        KeywordPatch {
            text: Some("Given I sign in".to_string()),
            ..Default::default()
        }
        .apply(&mut keyword);

        assert_eq!(keyword.text, "Given I sign in");
        assert_eq!(keyword.kind, KeywordType::Given);
        assert_eq!(keyword.domain.as_deref(), Some("Auth"));
        assert_eq!(keyword.tags, vec!["smoke".to_string()]);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let keyword = Keyword::new(Uuid::new_v4(), "When I pay".to_string(), KeywordType::When);
        let value = serde_json::to_value(&keyword).unwrap();
        assert_eq!(value["type"], "When");
        assert_eq!(value["_id"], keyword.id.to_string());
        assert!(value.get("kind").is_none());
    }
}
