use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Named category grouping keywords and templates
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Domain {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user: Uuid,
    pub date: DateTime<Utc>,
}

impl Domain {
    pub fn new(user: Uuid, name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            user,
            date: super::stored_now(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DomainInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default)]
pub struct DomainPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl DomainPatch {
    pub fn apply(self, domain: &mut Domain) {
        if let Some(name) = self.name {
            domain.name = name;
        }
        if let Some(description) = self.description {
            domain.description = Some(description);
        }
    }
}
