//! Gherkin text utilities behind the validator routes.

pub mod checker;
pub mod downloads;
pub mod normalize;
pub mod stats;

pub use checker::{CheckReport, CheckSet, Checker, FeatureType, Issue, IssueKind};
pub use normalize::normalize;
pub use stats::{ContentStats, ValidationReport};

/// Step keywords in the order Gherkin documents list them
pub const STEP_KEYWORDS: [&str; 5] = ["Given", "When", "Then", "And", "But"];
