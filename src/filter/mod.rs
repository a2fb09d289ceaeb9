pub mod time_range;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::Keyword;
use crate::types::KeywordType;

pub use time_range::TimeRange;

/// Selection criteria for keyword queries. Every set field must match;
/// results come back newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordFilter {
    pub owner: Option<Uuid>,
    pub domain: Option<String>,
    pub kind: Option<KeywordType>,
    pub tag: Option<String>,
    /// Inclusive lower bound on the creation date
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl KeywordFilter {
    pub fn for_owner(owner: Uuid) -> Self {
        Self {
            owner: Some(owner),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_kind(mut self, kind: KeywordType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// In-process evaluation, used by the memory store
    pub fn matches(&self, keyword: &Keyword) -> bool {
        if self.owner.is_some_and(|owner| keyword.user != owner) {
            return false;
        }
        if let Some(domain) = &self.domain {
            if keyword.domain.as_deref() != Some(domain.as_str()) {
                return false;
            }
        }
        if self.kind.is_some_and(|kind| keyword.kind != kind) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !keyword.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if self.since.is_some_and(|since| keyword.date < since) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn keyword(owner: Uuid) -> Keyword {
        let mut keyword = Keyword::new(owner, "Given I open checkout".to_string(), KeywordType::Given);
        keyword.domain = Some("Checkout".to_string());
        keyword.tags = vec!["smoke".to_string()];
        keyword
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(KeywordFilter::default().matches(&keyword(Uuid::new_v4())));
    }

    #[test]
    fn owner_domain_kind_and_tag_must_all_match() {
        let owner = Uuid::new_v4();
        let k = keyword(owner);

        let filter = KeywordFilter::for_owner(owner)
            .with_domain("Checkout")
            .with_kind(KeywordType::Given)
            .with_tag("smoke");
        assert!(filter.matches(&k));

        assert!(!KeywordFilter::for_owner(Uuid::new_v4()).matches(&k));
        assert!(!KeywordFilter::for_owner(owner).with_domain("checkout").matches(&k));
        assert!(!KeywordFilter::for_owner(owner).with_kind(KeywordType::Then).matches(&k));
        assert!(!KeywordFilter::for_owner(owner).with_tag("slow").matches(&k));
    }

    #[test]
    fn since_bound_is_inclusive() {
        let k = keyword(Uuid::new_v4());
        assert!(KeywordFilter::default().since(k.date).matches(&k));
        assert!(!KeywordFilter::default().since(k.date + Duration::seconds(1)).matches(&k));
    }
}
