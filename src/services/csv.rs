//! CSV renderings of the report rows.

use crate::database::models::Keyword;
use crate::services::DomainReportRow;

pub const KEYWORDS_HEADER: &str = "Type,Text,Domain,Date";
pub const DOMAINS_HEADER: &str = "Name,Description,Keyword Count";

/// Always wrap in quotes, doubling embedded quotes
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote only when the value would otherwise break the row
pub fn quote_if_needed(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        quote(value)
    } else {
        value.to_string()
    }
}

pub fn keywords_csv(keywords: &[Keyword]) -> String {
    let mut out = String::from(KEYWORDS_HEADER);
    out.push('\n');
    for keyword in keywords {
        out.push_str(&format!(
            "{},{},{},{}\n",
            keyword.kind,
            quote(&keyword.text),
            quote_if_needed(keyword.domain.as_deref().unwrap_or_default()),
            keyword.date.format("%Y-%m-%d"),
        ));
    }
    out
}

pub fn domains_csv(rows: &[DomainReportRow]) -> String {
    let mut out = String::from(DOMAINS_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            quote(&row.domain.name),
            quote(row.domain.description.as_deref().unwrap_or_default()),
            row.keyword_count,
        ));
    }
    out
}
