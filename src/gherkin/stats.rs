use serde::Serialize;

/// Literal marker counts. This is a heuristic tally, not a parse: a marker
/// embedded in prose counts the same as one starting a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub feature_count: usize,
    pub scenario_count: usize,
    pub step_count: usize,
    pub examples_count: usize,
}

impl ContentStats {
    pub fn count(content: &str) -> Self {
        let occurrences = |marker: &str| content.matches(marker).count();
        Self {
            feature_count: occurrences("Feature:"),
            scenario_count: occurrences("Scenario:") + occurrences("Scenario Outline:"),
            step_count: ["Given ", "When ", "Then ", "And ", "But "]
                .iter()
                .map(|kw| occurrences(kw))
                .sum(),
            examples_count: occurrences("Examples:"),
        }
    }
}

/// Body of `POST /api/validator/validate`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ContentStats,
}

impl ValidationReport {
    pub fn for_content(content: &str) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ContentStats::count(content),
        }
    }
}
