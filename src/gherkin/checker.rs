//! Line-oriented lint for Gherkin feature files.
//!
//! The checker walks the text once, tracking the open scenario and any
//! Examples table, and reports structural problems alongside style issues
//! (placeholder usage, repeated words) and the rules of the specialised
//! feature formats.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::STEP_KEYWORDS;

/// Exempt from the repeated-word check
const KEYWORD_WORDS: [&str; 9] = [
    "Feature", "Scenario", "Given", "When", "Then", "And", "But", "Background", "Examples",
];

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<"[^"]+">"#).expect("valid placeholder pattern"))
}

fn fixed_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""[^"]*""#).expect("valid fixed value pattern"))
}

fn single_quoted_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"'[^']*'").expect("valid single quote pattern"))
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("valid word pattern"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    #[default]
    Standard,
    /// Scenarios are preconditions only: no `When`, `Then` or `But`
    DriveCycle,
    /// Exactly one `Given` and one `When` per scenario, no `But`
    SuccessCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    #[serde(rename = "Syntax Error")]
    SyntaxError,
    #[serde(rename = "Duplicate Scenario")]
    DuplicateScenario,
    #[serde(rename = "Placeholder Mismatch")]
    PlaceholderMismatch,
    #[serde(rename = "Placeholder Order")]
    PlaceholderOrder,
    #[serde(rename = "Invalid Placeholder Syntax")]
    InvalidPlaceholder,
    #[serde(rename = "Repeated Word")]
    RepeatedWord,
    #[serde(rename = "Drive Cycle Format")]
    DriveCycle,
    #[serde(rename = "Success Criteria Format")]
    SuccessCriteria,
}

impl IssueKind {
    /// Report order
    pub const ALL: [IssueKind; 8] = [
        IssueKind::SyntaxError,
        IssueKind::PlaceholderMismatch,
        IssueKind::PlaceholderOrder,
        IssueKind::InvalidPlaceholder,
        IssueKind::RepeatedWord,
        IssueKind::DriveCycle,
        IssueKind::SuccessCriteria,
        IssueKind::DuplicateScenario,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::SyntaxError => "Syntax Error",
            IssueKind::DuplicateScenario => "Duplicate Scenario",
            IssueKind::PlaceholderMismatch => "Placeholder Mismatch",
            IssueKind::PlaceholderOrder => "Placeholder Order",
            IssueKind::InvalidPlaceholder => "Invalid Placeholder Syntax",
            IssueKind::RepeatedWord => "Repeated Word",
            IssueKind::DriveCycle => "Drive Cycle Format",
            IssueKind::SuccessCriteria => "Success Criteria Format",
        }
    }

    fn section_title(&self) -> &'static str {
        match self {
            IssueKind::SyntaxError => "Syntax Errors",
            IssueKind::DuplicateScenario => "Duplicate Scenario Check",
            IssueKind::PlaceholderMismatch => "Placeholder Mismatch Check",
            IssueKind::PlaceholderOrder => "Placeholder Order Check",
            IssueKind::InvalidPlaceholder => "Invalid Placeholder Syntax Check",
            IssueKind::RepeatedWord => "Repeated Word Check",
            IssueKind::DriveCycle => "Drive Cycle Format Check",
            IssueKind::SuccessCriteria => "Success Criteria Format Check",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which checks contribute to the report. Omitted toggles are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckSet {
    pub syntax: bool,
    pub duplicate_scenario: bool,
    pub placeholder_mismatch: bool,
    pub placeholder_order: bool,
    pub invalid_placeholder: bool,
    pub repeated_word: bool,
    pub drive_cycle: bool,
    pub success_criteria: bool,
}

impl Default for CheckSet {
    fn default() -> Self {
        Self {
            syntax: true,
            duplicate_scenario: true,
            placeholder_mismatch: true,
            placeholder_order: true,
            invalid_placeholder: true,
            repeated_word: true,
            drive_cycle: true,
            success_criteria: true,
        }
    }
}

impl CheckSet {
    pub fn enabled(&self, kind: IssueKind) -> bool {
        match kind {
            IssueKind::SyntaxError => self.syntax,
            IssueKind::DuplicateScenario => self.duplicate_scenario,
            IssueKind::PlaceholderMismatch => self.placeholder_mismatch,
            IssueKind::PlaceholderOrder => self.placeholder_order,
            IssueKind::InvalidPlaceholder => self.invalid_placeholder,
            IssueKind::RepeatedWord => self.repeated_word,
            IssueKind::DriveCycle => self.drive_cycle,
            IssueKind::SuccessCriteria => self.success_criteria,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStats {
    pub total_lines: usize,
    pub scenarios: usize,
    pub steps: usize,
    /// Data rows across all Examples tables
    pub total_iterations: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub feature_type: FeatureType,
    pub total_errors: usize,
    pub issues: Vec<Issue>,
    pub stats: CheckStats,
    #[serde(skip)]
    checks: CheckSet,
}

impl CheckReport {
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Plain-text rendering, one section per enabled check
    pub fn render_text(&self) -> String {
        let mut out = String::from("Gherkin Feature File Analysis Report\n");
        out.push_str(&format!("Feature Type: {}\n", self.feature_type.label()));
        out.push_str(&format!("Total Errors Found: {}\n", self.total_errors));
        out.push_str(&"-".repeat(50));
        out.push_str("\n\n");

        for kind in IssueKind::ALL {
            if !self.checks.enabled(kind) || !self.feature_type.applies(kind) {
                continue;
            }
            out.push_str(kind.section_title());
            out.push_str(":\n");
            let lines: Vec<String> = self
                .of_kind(kind)
                .map(|issue| format!(" - Line {}: {}", issue.line, issue.description))
                .collect();
            if lines.is_empty() {
                out.push_str(" - None found\n");
            } else {
                out.push_str(&lines.join("\n"));
            }
            out.push_str("\n\n");
        }

        out.push_str("File Statistics:\n");
        out.push_str(&format!(" - Total Lines: {}\n", self.stats.total_lines));
        out.push_str(&format!(" - Scenarios: {}\n", self.stats.scenarios));
        out.push_str(&format!(" - Steps: {}\n", self.stats.steps));
        out.push_str(&format!(" - Total Iterations in Examples: {}\n", self.stats.total_iterations));
        out
    }
}

impl FeatureType {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureType::Standard => "Standard",
            FeatureType::DriveCycle => "Drive Cycle",
            FeatureType::SuccessCriteria => "Success Criteria",
        }
    }

    /// Format-specific sections only appear for their own format
    fn applies(&self, kind: IssueKind) -> bool {
        match kind {
            IssueKind::DriveCycle => *self == FeatureType::DriveCycle,
            IssueKind::SuccessCriteria => *self == FeatureType::SuccessCriteria,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Checker {
    feature_type: FeatureType,
    checks: CheckSet,
}

impl Checker {
    pub fn new(feature_type: FeatureType, checks: CheckSet) -> Self {
        Self { feature_type, checks }
    }

    pub fn check(&self, content: &str) -> CheckReport {
        let mut scan = Scan::new(self.feature_type);
        for (index, line) in content.lines().enumerate() {
            scan.line(index + 1, line.trim());
        }
        let (issues, stats) = scan.finish(content.lines().count());

        let issues: Vec<Issue> = issues
            .into_iter()
            .filter(|issue| self.checks.enabled(issue.kind))
            .collect();
        tracing::debug!(
            "Checked {} lines as {:?}: {} issues",
            stats.total_lines,
            self.feature_type,
            issues.len()
        );

        CheckReport {
            feature_type: self.feature_type,
            total_errors: issues.len(),
            issues,
            stats,
            checks: self.checks,
        }
    }
}

struct OpenScenario<'a> {
    start_line: usize,
    /// Steps before any Examples table, with their line numbers
    steps: Vec<(usize, &'a str)>,
    given: usize,
    when: usize,
    then: usize,
}

struct Scan<'a> {
    feature_type: FeatureType,
    issues: Vec<Issue>,
    stats: CheckStats,
    has_feature: bool,
    titles: HashMap<&'a str, usize>,
    scenario: Option<OpenScenario<'a>>,
    in_examples: bool,
    headers: Option<Vec<&'a str>>,
}

impl<'a> Scan<'a> {
    fn new(feature_type: FeatureType) -> Self {
        Self {
            feature_type,
            issues: Vec::new(),
            stats: CheckStats::default(),
            has_feature: false,
            titles: HashMap::new(),
            scenario: None,
            in_examples: false,
            headers: None,
        }
    }

    fn issue(&mut self, kind: IssueKind, description: impl Into<String>, line: usize) {
        self.issues.push(Issue {
            kind,
            description: description.into(),
            line,
        });
    }

    fn line(&mut self, number: usize, line: &'a str) {
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        let table_row = self.in_examples && line.starts_with('|');

        if line.starts_with("Feature") {
            self.has_feature = true;
        } else if line.starts_with("Scenario") {
            self.open_scenario(number, line);
        } else if line.starts_with("Examples") {
            if self.scenario.is_none() {
                self.issue(IssueKind::SyntaxError, "Examples found outside a Scenario", number);
            }
            self.in_examples = true;
        } else if table_row {
            self.table_row(number, line);
        } else if let Some(keyword) = STEP_KEYWORDS.iter().find(|kw| line.starts_with(**kw)) {
            self.step(number, line, keyword);
        }

        self.check_quotes(number, line);
        if !table_row {
            self.check_repeated_words(number, line);
        }
    }

    fn open_scenario(&mut self, number: usize, line: &'a str) {
        self.close_scenario();
        if !self.has_feature {
            self.issue(IssueKind::SyntaxError, "Scenario found before Feature", number);
        }
        self.stats.scenarios += 1;

        match self.titles.get(line) {
            Some(first) => {
                let description = format!("Scenario identical to one at line {}", first);
                self.issue(IssueKind::DuplicateScenario, description, number);
            }
            None => {
                self.titles.insert(line, number);
            }
        }

        self.scenario = Some(OpenScenario {
            start_line: number,
            steps: Vec::new(),
            given: 0,
            when: 0,
            then: 0,
        });
        self.in_examples = false;
        self.headers = None;
    }

    /// Apply the per-scenario format rules once the scenario has ended
    fn close_scenario(&mut self) {
        let Some(scenario) = self.scenario.take() else {
            return;
        };
        let line = scenario.start_line;

        match self.feature_type {
            FeatureType::DriveCycle => {
                if scenario.when > 0 {
                    self.issue(IssueKind::DriveCycle, "When not allowed in Drive Cycle format", line);
                }
                if scenario.then > 0 {
                    self.issue(IssueKind::DriveCycle, "Then not allowed in Drive Cycle format", line);
                }
            }
            FeatureType::SuccessCriteria => {
                if scenario.given != 1 {
                    let msg = format!("Success Criteria must have exactly 1 Given, found {}", scenario.given);
                    self.issue(IssueKind::SuccessCriteria, msg, line);
                }
                if scenario.when != 1 {
                    let msg = format!("Success Criteria must have exactly 1 When, found {}", scenario.when);
                    self.issue(IssueKind::SuccessCriteria, msg, line);
                }
            }
            FeatureType::Standard => {}
        }
    }

    fn step(&mut self, number: usize, line: &'a str, keyword: &str) {
        self.stats.steps += 1;
        let in_examples = self.in_examples;

        match self.scenario.as_mut() {
            None => self.issue(IssueKind::SyntaxError, "Step found outside a Scenario", number),
            Some(scenario) => {
                if !in_examples {
                    scenario.steps.push((number, line));
                }
                match keyword {
                    "Given" => scenario.given += 1,
                    "When" => scenario.when += 1,
                    "Then" => scenario.then += 1,
                    _ => {}
                }
            }
        }

        if keyword == "But" {
            match self.feature_type {
                FeatureType::DriveCycle => {
                    self.issue(IssueKind::DriveCycle, "But not allowed in Drive Cycle format", number)
                }
                FeatureType::SuccessCriteria => {
                    self.issue(IssueKind::SuccessCriteria, "But not allowed in Success Criteria format", number)
                }
                FeatureType::Standard => {}
            }
        }
    }

    /// The first row of an Examples table is its header; the rest are iterations
    fn table_row(&mut self, number: usize, line: &'a str) {
        if self.headers.is_some() {
            self.stats.total_iterations += 1;
            return;
        }

        let cells: Vec<&'a str> = line.split('|').map(str::trim).collect();
        let headers = cells[1..cells.len() - 1].to_vec();
        self.check_placeholders(number, &headers);
        self.headers = Some(headers);
    }

    fn check_placeholders(&mut self, number: usize, headers: &[&str]) {
        let used: Vec<(usize, &'a str)> = match &self.scenario {
            Some(scenario) => scenario
                .steps
                .iter()
                .flat_map(|&(line, step)| placeholder_regex().find_iter(step).map(move |m| (line, m.as_str())))
                .collect(),
            None => Vec::new(),
        };
        let column = |placeholder: &str| {
            let name = placeholder
                .trim_matches(|c: char| c == '<' || c == '>')
                .trim_matches('"');
            headers.iter().position(|h| *h == name)
        };

        let mut reported: Vec<&str> = Vec::new();
        for &(line, placeholder) in &used {
            if column(placeholder).is_none() && !reported.contains(&placeholder) {
                reported.push(placeholder);
                let msg = format!(
                    "Placeholder '{}' does not match any column heading in the Examples table (case-sensitive)",
                    placeholder
                );
                self.issue(IssueKind::PlaceholderMismatch, msg, line);
            }
        }

        let mut last: Option<usize> = None;
        for &(line, placeholder) in &used {
            let Some(position) = column(placeholder) else {
                continue;
            };
            if last.is_some_and(|last| position < last) {
                let msg = format!(
                    "Placeholder '{}' used out of sequence relative to Examples table column headings",
                    placeholder
                );
                self.issue(IssueKind::PlaceholderOrder, msg, line);
            }
            last = Some(last.map_or(position, |last| last.max(position)));
        }

        if used.is_empty() {
            tracing::trace!("Examples header at line {} with no placeholders in use", number);
        }
    }

    fn check_quotes(&mut self, number: usize, line: &str) {
        for found in single_quoted_regex().find_iter(line) {
            let quoted = found.as_str();
            let msg = format!(
                "Placeholder '{}' should use angle brackets with double quotes (e.g., <\"{}\">) instead of single quotes",
                quoted,
                quoted.trim_matches('\'')
            );
            self.issue(IssueKind::InvalidPlaceholder, msg, number);
        }
    }

    fn check_repeated_words(&mut self, number: usize, line: &str) {
        let without_placeholders = placeholder_regex().replace_all(line, "");
        let cleaned = fixed_value_regex().replace_all(&without_placeholders, "");
        let words: Vec<&str> = word_regex().find_iter(&cleaned).map(|m| m.as_str()).collect();

        let repeats: Vec<String> = words
            .windows(2)
            .filter(|pair| pair[0] == pair[1] && !KEYWORD_WORDS.contains(&pair[0]))
            .map(|pair| format!("Word '{}' repeated", pair[0]))
            .collect();
        for msg in repeats {
            self.issue(IssueKind::RepeatedWord, msg, number);
        }
    }

    fn finish(mut self, total_lines: usize) -> (Vec<Issue>, CheckStats) {
        self.close_scenario();
        if !self.has_feature {
            self.issue(IssueKind::SyntaxError, "No Feature keyword found in file", 1);
        }
        self.stats.total_lines = total_lines;
        (self.issues, self.stats)
    }
}
