use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::{Domain, Keyword};
use crate::database::{DatabaseError, Store};
use crate::filter::{KeywordFilter, TimeRange};
use crate::types::KeywordType;

/// Keywords shown in the summary's "recent" list
pub const RECENT_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct KeywordReportQuery {
    pub domain: Option<String>,
    pub time_range: Option<TimeRange>,
}

/// A domain annotated with how many of the owner's keywords name it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainReportRow {
    #[serde(flatten)]
    pub domain: Domain,
    pub keyword_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Counts {
    pub keywords: u64,
    pub domains: u64,
    pub templates: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: KeywordType,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub counts: Counts,
    pub keywords_by_type: Vec<TypeCount>,
    pub recent_keywords: Vec<Keyword>,
}

/// Read-only aggregation over one user's records
pub struct ReportService {
    store: Arc<dyn Store>,
}

impl ReportService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn keywords(
        &self,
        owner: Uuid,
        query: &KeywordReportQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Keyword>, DatabaseError> {
        let mut filter = KeywordFilter::for_owner(owner);
        if let Some(domain) = &query.domain {
            filter = filter.with_domain(domain.clone());
        }
        if let Some(range) = query.time_range {
            filter = filter.since(range.start(now));
        }
        self.store.list_keywords(&filter).await
    }

    /// Correlates by name: a keyword counts toward a domain when its domain
    /// string equals the domain's name.
    pub async fn domains(&self, owner: Uuid) -> Result<Vec<DomainReportRow>, DatabaseError> {
        let domains = self.store.list_domains(owner).await?;
        let mut rows = Vec::with_capacity(domains.len());
        for domain in domains {
            let filter = KeywordFilter::for_owner(owner).with_domain(domain.name.clone());
            let keyword_count = self.store.count_keywords(&filter).await?;
            rows.push(DomainReportRow { domain, keyword_count });
        }
        Ok(rows)
    }

    pub async fn summary(&self, owner: Uuid) -> Result<Summary, DatabaseError> {
        let all = KeywordFilter::for_owner(owner);
        let counts = Counts {
            keywords: self.store.count_keywords(&all).await?,
            domains: self.store.count_domains(owner).await?,
            templates: self.store.count_templates(owner).await?,
        };

        let mut keywords_by_type = Vec::new();
        for kind in KeywordType::ALL {
            let count = self.store.count_keywords(&all.clone().with_kind(kind)).await?;
            if count > 0 {
                keywords_by_type.push(TypeCount { kind, count });
            }
        }
        keywords_by_type.sort_by(|a, b| b.count.cmp(&a.count));

        let recent_keywords = self.store.list_keywords(&all.limit(RECENT_KEYWORDS)).await?;
        tracing::debug!("Built summary for {}: {} keywords", owner, counts.keywords);

        Ok(Summary {
            counts,
            keywords_by_type,
            recent_keywords,
        })
    }
}
