//! Placeholder payloads for the issue-tracker download routes. Nothing here
//! talks to a tracker; the content is generated from the key alone.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Test cases bundled into a mock test plan
const PLAN_SIZE: u64 = 2;

fn issue_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]+-\d+$").expect("valid issue key pattern"))
}

/// Tracker key of the form `PROJECT-123`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueKey {
    raw: String,
    project: String,
    number: u64,
}

impl IssueKey {
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl FromStr for IssueKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid issue key format: {}. Expected format: PROJECT-123", s);
        if !issue_key_regex().is_match(s) {
            return Err(invalid());
        }
        let (project, number) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            raw: s.to_string(),
            project: project.to_string(),
            number: number.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFile {
    pub issue_key: String,
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPlan {
    pub test_plan_key: String,
    pub files: Vec<FeatureFile>,
}

pub fn feature_file(key: &IssueKey) -> FeatureFile {
    let content = format!(
        "Feature: Gherkin Content for {key}\n  Scenario: Default Scenario\n    Given the test case {key} is available\n    When it is executed\n    Then it passes\n"
    );
    FeatureFile {
        issue_key: key.to_string(),
        file_name: format!("{key}.feature"),
        content,
    }
}

/// Mock plan listing the test cases that follow the plan key in its project.
/// Numbers past `u64::MAX` do not exist, so a plan near the top is shorter.
pub fn test_plan(key: &IssueKey) -> TestPlan {
    let files = (1..=PLAN_SIZE)
        .filter_map(|offset| key.number.checked_add(offset))
        .map(|number| IssueKey {
            raw: format!("{}-{}", key.project, number),
            project: key.project.clone(),
            number,
        })
        .map(|case| feature_file(&case))
        .collect();
    TestPlan {
        test_plan_key: key.to_string(),
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_keys() {
        let key: IssueKey = "PETM-123".parse().unwrap();
        assert_eq!(key.project(), "PETM");
        assert_eq!(key.number(), 123);
        assert_eq!(key.to_string(), "PETM-123");
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in ["petm-1", "PETM", "PETM-", "PETM-12a", " PETM-1", "PE1-2"] {
            let err = bad.parse::<IssueKey>().unwrap_err();
            assert!(err.starts_with("Invalid issue key format"), "{bad}: {err}");
        }
    }

    #[test]
    fn feature_file_is_named_after_the_key() {
        let file = feature_file(&"QA-7".parse().unwrap());
        assert_eq!(file.file_name, "QA-7.feature");
        assert!(file.content.starts_with("Feature: Gherkin Content for QA-7\n"));
    }

    #[test]
    fn test_plan_lists_following_cases() {
        let plan = test_plan(&"QA-10".parse().unwrap());
        assert_eq!(plan.test_plan_key, "QA-10");
        let names: Vec<_> = plan.files.iter().map(|f| f.issue_key.as_str()).collect();
        assert_eq!(names, vec!["QA-11", "QA-12"]);
    }

    #[test]
    fn test_plan_stops_at_the_largest_number() {
        let last = format!("QA-{}", u64::MAX);
        let plan = test_plan(&last.parse().unwrap());
        assert_eq!(plan.test_plan_key, last);
        assert!(plan.files.is_empty());

        let near = format!("QA-{}", u64::MAX - 1);
        let plan = test_plan(&near.parse().unwrap());
        let names: Vec<_> = plan.files.iter().map(|f| f.issue_key.clone()).collect();
        assert_eq!(names, vec![format!("QA-{}", u64::MAX)]);
    }
}
