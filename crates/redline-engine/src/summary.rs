//! Document-level summary: counts, overall risk, templated findings

use shared_types::{
    Change, ChangeType, ClauseCategory, ClauseComparison, ComparisonSummary, OverallRiskLevel,
    Severity,
};

/// How many high-severity implications are quoted in the findings
const MAX_QUOTED_IMPLICATIONS: usize = 5;

pub fn build_summary(
    changes: &[Change],
    clause_comparisons: &[ClauseComparison],
    unchanged_count: usize,
) -> ComparisonSummary {
    let count_type = |t: ChangeType| changes.iter().filter(|c| c.change_type == t).count();
    let count_severity = |s: Severity| changes.iter().filter(|c| c.severity == s).count();

    let critical_count = count_severity(Severity::Critical);
    let major_count = count_severity(Severity::Major);

    let overall_risk_score = if changes.is_empty() {
        0.0
    } else {
        changes.iter().map(|c| c.risk_score).sum::<f64>() / changes.len() as f64
    };

    let overall_risk_level = overall_level(critical_count, major_count, overall_risk_score);

    let mut affected_categories: Vec<ClauseCategory> =
        changes.iter().map(|c| c.clause_category).collect();
    affected_categories.sort();
    affected_categories.dedup();

    let mut summary = ComparisonSummary {
        total_changes: changes.len(),
        added_count: count_type(ChangeType::Added),
        removed_count: count_type(ChangeType::Removed),
        modified_count: count_type(ChangeType::Modified),
        formatting_count: count_type(ChangeType::Formatting),
        moved_count: count_type(ChangeType::Moved),
        unchanged_count,
        critical_count,
        major_count,
        minor_count: count_severity(Severity::Minor),
        cosmetic_count: count_severity(Severity::Cosmetic),
        overall_risk_score,
        overall_risk_level,
        affected_categories,
        key_findings: Vec::new(),
        recommendations: Vec::new(),
    };

    summary.key_findings = key_findings(&summary, changes, clause_comparisons);
    summary.recommendations = recommendations(&summary);
    summary
}

pub fn overall_level(critical_count: usize, major_count: usize, score: f64) -> OverallRiskLevel {
    if critical_count > 0 || score >= 0.7 {
        OverallRiskLevel::Critical
    } else if major_count > 2 || score >= 0.5 {
        OverallRiskLevel::High
    } else if major_count > 0 || score >= 0.3 {
        OverallRiskLevel::Medium
    } else {
        OverallRiskLevel::Low
    }
}

fn key_findings(
    summary: &ComparisonSummary,
    changes: &[Change],
    clause_comparisons: &[ClauseComparison],
) -> Vec<String> {
    if summary.total_changes == 0 {
        return vec!["No substantive differences were found between the two versions.".to_string()];
    }

    let mut findings = vec![format!(
        "{} change(s) detected: {} added, {} removed, {} modified, {} formatting, {} moved.",
        summary.total_changes,
        summary.added_count,
        summary.removed_count,
        summary.modified_count,
        summary.formatting_count,
        summary.moved_count
    )];

    if summary.critical_count > 0 {
        findings.push(format!(
            "{} critical change(s) require immediate legal review.",
            summary.critical_count
        ));
    }
    if summary.major_count > 0 {
        findings.push(format!(
            "{} major change(s) materially affect the parties' obligations.",
            summary.major_count
        ));
    }

    let mut quoted: Vec<&Change> = changes
        .iter()
        .filter(|c| c.severity <= Severity::Major && c.legal_implication.is_some())
        .collect();
    quoted.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    for change in quoted.into_iter().take(MAX_QUOTED_IMPLICATIONS) {
        if let Some(implication) = &change.legal_implication {
            findings.push(format!(
                "{} clause ({}): {}",
                change.clause_category.label(),
                change.change_type.as_str(),
                implication
            ));
        }
    }

    for clause in clause_comparisons {
        if clause.risk_assessment.level <= Severity::Major {
            findings.push(format!(
                "{} clauses carry {} risk.",
                clause.category.label(),
                clause.risk_assessment.level.as_str()
            ));
        }
    }

    findings
}

fn recommendations(summary: &ComparisonSummary) -> Vec<String> {
    let mut recs = Vec::new();
    let touches = |category: ClauseCategory| summary.affected_categories.contains(&category);

    if summary.critical_count > 0 {
        recs.push(
            "Have counsel review every critical change before the revised version is signed."
                .to_string(),
        );
    }
    if touches(ClauseCategory::Liability) || touches(ClauseCategory::Penalty) {
        recs.push(
            "Liability and penalty provisions changed; confirm caps, exclusions and penalty amounts \
             remain acceptable."
                .to_string(),
        );
    }
    if touches(ClauseCategory::Termination) {
        recs.push("Verify termination rights, notice periods and their consequences.".to_string());
    }
    if touches(ClauseCategory::Price) || touches(ClauseCategory::Payment) {
        recs.push("Reconcile price and payment terms with the commercial agreement.".to_string());
    }
    if touches(ClauseCategory::Confidentiality)
        || touches(ClauseCategory::NonCompete)
        || touches(ClauseCategory::IntellectualProperty)
    {
        recs.push(
            "Check the scope and duration of confidentiality, non-compete and IP obligations."
                .to_string(),
        );
    }
    if touches(ClauseCategory::DisputeResolution) {
        recs.push("Confirm the governing law and dispute forum are still acceptable.".to_string());
    }
    if summary.removed_count > 0 {
        recs.push("Confirm that every removed paragraph was deleted intentionally.".to_string());
    }
    if summary.added_count > 0 {
        recs.push("Review newly added paragraphs for obligations not previously agreed.".to_string());
    }
    if recs.is_empty() {
        let rec = if summary.total_changes == 0 {
            "No action required; the documents are equivalent."
        } else {
            "Changes appear low risk; a standard review is sufficient."
        };
        recs.push(rec.to_string());
    }

    recs
}
