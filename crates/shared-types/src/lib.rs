pub mod redline;
pub mod types;

pub use redline::{Decision, RedlineDocument, RedlineError, ReviewEvent};
pub use types::{
    fingerprint, Change, ChangeType, ClauseCategory, ClauseComparison, ComparisonResult,
    ComparisonSummary, DocumentDescriptor, OverallChange, OverallRiskLevel, RiskAssessment,
    Severity, TextSegment,
};
