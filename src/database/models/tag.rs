use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_TAG_COLOR: &str = "#3498db";

/// Named, colored label shared by every user
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub date: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: String, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color: color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            date: super::stored_now(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TagInput {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl TagPatch {
    pub fn apply(self, tag: &mut Tag) {
        if let Some(name) = self.name {
            tag.name = name;
        }
        if let Some(color) = self.color {
            tag.color = color;
        }
    }
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tags_get_default_color() {
        assert_eq!(Tag::new("smoke".to_string(), None).color, DEFAULT_TAG_COLOR);
        assert_eq!(Tag::new("slow".to_string(), Some("#fff".to_string())).color, "#fff");
    }

    #[test]
    fn recognises_hex_colors() {
        assert!(is_hex_color("#3498db"));
        assert!(is_hex_color("#FFF"));
        assert!(!is_hex_color("3498db"));
        assert!(!is_hex_color("#3498dz"));
        assert!(!is_hex_color("#12345"));
    }
}
