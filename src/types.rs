/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access role carried in the session token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gherkin step keyword a tracked phrase starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeywordType {
    Given,
    When,
    Then,
    And,
    But,
}

impl KeywordType {
    pub const ALL: [KeywordType; 5] = [
        KeywordType::Given,
        KeywordType::When,
        KeywordType::Then,
        KeywordType::And,
        KeywordType::But,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordType::Given => "Given",
            KeywordType::When => "When",
            KeywordType::Then => "Then",
            KeywordType::And => "And",
            KeywordType::But => "But",
        }
    }
}

impl FromStr for KeywordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeywordType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| "Type must be one of Given, When, Then, And, But".to_string())
    }
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format selected by the `format` query parameter of report routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    /// Anything other than `csv` falls back to JSON
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Json,
        }
    }
}
