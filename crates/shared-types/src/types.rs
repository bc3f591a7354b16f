use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A paragraph of a compared document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    pub id: String,
    pub text: String,
    pub start_offset: usize, // Char offset into the source text (inclusive)
    pub end_offset: usize,   // Char offset (exclusive)
    pub line_number: usize,  // 1-based line of the first character
    pub paragraph_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Formatting,
    Moved,
    Unchanged,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Modified => "modified",
            ChangeType::Formatting => "formatting",
            ChangeType::Moved => "moved",
            ChangeType::Unchanged => "unchanged",
        }
    }
}

/// Legal severity of a change, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Cosmetic,
}

impl Severity {
    /// Bucket a risk score: `>= 0.8` critical, `>= 0.5` major, `>= 0.2` minor, else cosmetic.
    pub fn from_risk_score(score: f64) -> Self {
        if score >= 0.8 {
            Severity::Critical
        } else if score >= 0.5 {
            Severity::Major
        } else if score >= 0.2 {
            Severity::Minor
        } else {
            Severity::Cosmetic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Cosmetic => "cosmetic",
        }
    }
}

/// Legal clause categories in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseCategory {
    Parties,
    Definitions,
    Subject,
    Term,
    Price,
    Payment,
    Delivery,
    Warranty,
    Liability,
    Penalty,
    Confidentiality,
    NonCompete,
    IntellectualProperty,
    Termination,
    ForceMajeure,
    DisputeResolution,
    Notice,
    GeneralProvisions,
    Signatures,
    Appendices,
    Other,
}

impl ClauseCategory {
    /// Every category, in the order the classifier tests them.
    pub const ALL: [ClauseCategory; 21] = [
        ClauseCategory::Parties,
        ClauseCategory::Definitions,
        ClauseCategory::Subject,
        ClauseCategory::Term,
        ClauseCategory::Price,
        ClauseCategory::Payment,
        ClauseCategory::Delivery,
        ClauseCategory::Warranty,
        ClauseCategory::Liability,
        ClauseCategory::Penalty,
        ClauseCategory::Confidentiality,
        ClauseCategory::NonCompete,
        ClauseCategory::IntellectualProperty,
        ClauseCategory::Termination,
        ClauseCategory::ForceMajeure,
        ClauseCategory::DisputeResolution,
        ClauseCategory::Notice,
        ClauseCategory::GeneralProvisions,
        ClauseCategory::Signatures,
        ClauseCategory::Appendices,
        ClauseCategory::Other,
    ];

    /// Machine name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseCategory::Parties => "parties",
            ClauseCategory::Definitions => "definitions",
            ClauseCategory::Subject => "subject",
            ClauseCategory::Term => "term",
            ClauseCategory::Price => "price",
            ClauseCategory::Payment => "payment",
            ClauseCategory::Delivery => "delivery",
            ClauseCategory::Warranty => "warranty",
            ClauseCategory::Liability => "liability",
            ClauseCategory::Penalty => "penalty",
            ClauseCategory::Confidentiality => "confidentiality",
            ClauseCategory::NonCompete => "non_compete",
            ClauseCategory::IntellectualProperty => "intellectual_property",
            ClauseCategory::Termination => "termination",
            ClauseCategory::ForceMajeure => "force_majeure",
            ClauseCategory::DisputeResolution => "dispute_resolution",
            ClauseCategory::Notice => "notice",
            ClauseCategory::GeneralProvisions => "general_provisions",
            ClauseCategory::Signatures => "signatures",
            ClauseCategory::Appendices => "appendices",
            ClauseCategory::Other => "other",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            ClauseCategory::Parties => "Parties",
            ClauseCategory::Definitions => "Definitions",
            ClauseCategory::Subject => "Subject Matter",
            ClauseCategory::Term => "Term",
            ClauseCategory::Price => "Price",
            ClauseCategory::Payment => "Payment",
            ClauseCategory::Delivery => "Delivery",
            ClauseCategory::Warranty => "Warranty",
            ClauseCategory::Liability => "Liability",
            ClauseCategory::Penalty => "Penalty",
            ClauseCategory::Confidentiality => "Confidentiality",
            ClauseCategory::NonCompete => "Non-Compete",
            ClauseCategory::IntellectualProperty => "Intellectual Property",
            ClauseCategory::Termination => "Termination",
            ClauseCategory::ForceMajeure => "Force Majeure",
            ClauseCategory::DisputeResolution => "Dispute Resolution",
            ClauseCategory::Notice => "Notices",
            ClauseCategory::GeneralProvisions => "General Provisions",
            ClauseCategory::Signatures => "Signatures",
            ClauseCategory::Appendices => "Appendices",
            ClauseCategory::Other => "Other",
        }
    }
}

/// A single difference between the two documents.
///
/// Always references at least one segment; `Modified`, `Formatting` and
/// `Moved` changes reference both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub id: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub severity: Severity,
    pub original_segment: Option<TextSegment>,
    pub new_segment: Option<TextSegment>,
    pub original_text: String,
    pub new_text: String,
    pub clause_category: ClauseCategory,
    pub risk_score: f64, // 0.0 - 1.0
    pub legal_implication: Option<String>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallChange {
    Added,
    Removed,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: Severity,
    pub reason: String,
}

/// Per-category roll-up of changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseComparison {
    pub category: ClauseCategory,
    pub present_in_original: bool,
    pub present_in_new: bool,
    pub changes: Vec<Change>,
    pub overall_change: OverallChange,
    pub risk_assessment: RiskAssessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl OverallRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRiskLevel::Low => "low",
            OverallRiskLevel::Medium => "medium",
            OverallRiskLevel::High => "high",
            OverallRiskLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_changes: usize,
    pub added_count: usize,
    pub removed_count: usize,
    pub modified_count: usize,
    pub formatting_count: usize,
    pub moved_count: usize,
    /// Matched pairs with identical text, which produce no `Change`
    pub unchanged_count: usize,
    pub critical_count: usize,
    pub major_count: usize,
    pub minor_count: usize,
    pub cosmetic_count: usize,
    pub overall_risk_score: f64,
    pub overall_risk_level: OverallRiskLevel,
    pub affected_categories: Vec<ClauseCategory>,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Identifies one side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    pub name: String,
    pub fingerprint: String, // Hex SHA-256 of the UTF-8 text
    pub char_count: usize,
    pub segment_count: usize,
}

impl DocumentDescriptor {
    pub fn new(name: &str, text: &str, segment_count: usize) -> Self {
        Self {
            name: name.to_string(),
            fingerprint: fingerprint(text),
            char_count: text.chars().count(),
            segment_count,
        }
    }
}

/// Immutable snapshot produced by one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub id: String,
    pub original_document: DocumentDescriptor,
    pub new_document: DocumentDescriptor,
    pub changes: Vec<Change>,
    pub clause_comparisons: Vec<ClauseComparison>,
    pub summary: ComparisonSummary,
    pub compared_at: String, // RFC 3339
    pub duration_ms: u64,
}

impl ComparisonResult {
    /// Changes of a given severity, in emission order
    pub fn changes_with_severity(&self, severity: Severity) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.severity == severity)
    }
}

/// Compute the hex SHA-256 of a document's text
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
