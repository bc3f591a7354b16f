//! Clause-level roll-up of changes

use shared_types::{
    Change, ChangeType, ClauseCategory, ClauseComparison, OverallChange, RiskAssessment, Severity,
};

use crate::rules::clause_categories;

/// Group changes by clause category.
///
/// Presence is decided by running each category's patterns over the whole
/// document, independent of how individual segments were classified.
/// Categories without changes whose presence did not change are omitted.
pub fn aggregate_clauses(
    original_text: &str,
    revised_text: &str,
    changes: &[Change],
) -> Vec<ClauseComparison> {
    ClauseCategory::ALL
        .iter()
        .filter_map(|&category| compare_category(category, original_text, revised_text, changes))
        .collect()
}

fn compare_category(
    category: ClauseCategory,
    original_text: &str,
    revised_text: &str,
    changes: &[Change],
) -> Option<ClauseComparison> {
    let owned: Vec<Change> = changes
        .iter()
        .filter(|c| c.clause_category == category)
        .cloned()
        .collect();

    let (present_in_original, present_in_new) = if category == ClauseCategory::Other {
        (
            owned.iter().any(|c| c.original_segment.is_some()),
            owned.iter().any(|c| c.new_segment.is_some()),
        )
    } else {
        (
            clause_categories::is_present(category, original_text),
            clause_categories::is_present(category, revised_text),
        )
    };

    let overall_change = match (present_in_original, present_in_new) {
        (true, false) => OverallChange::Removed,
        (false, true) => OverallChange::Added,
        _ if !owned.is_empty() => OverallChange::Modified,
        _ => OverallChange::Unchanged,
    };

    if owned.is_empty() && overall_change == OverallChange::Unchanged {
        return None;
    }

    let risk_assessment = assess_category(category, overall_change, &owned);

    Some(ClauseComparison {
        category,
        present_in_original,
        present_in_new,
        changes: owned,
        overall_change,
        risk_assessment,
    })
}

fn assess_category(
    category: ClauseCategory,
    overall_change: OverallChange,
    changes: &[Change],
) -> RiskAssessment {
    let Some(top) = changes
        .iter()
        .max_by(|a, b| a.risk_score.total_cmp(&b.risk_score))
    else {
        let reason = match overall_change {
            OverallChange::Removed => format!(
                "{} language no longer appears in the revised document.",
                category.label()
            ),
            OverallChange::Added => format!(
                "{} language appears only in the revised document.",
                category.label()
            ),
            _ => format!("No changes to {} clauses.", category.label()),
        };
        return RiskAssessment {
            level: Severity::Cosmetic,
            reason,
        };
    };

    let level = Severity::from_risk_score(top.risk_score);
    let mut reason = format!(
        "{} change(s) in {} clauses ({}); highest risk score {:.2}.",
        changes.len(),
        category.label(),
        describe_types(changes),
        top.risk_score
    );

    let most_severe_implication = changes
        .iter()
        .filter(|c| c.legal_implication.is_some())
        .max_by(|a, b| a.risk_score.total_cmp(&b.risk_score))
        .and_then(|c| c.legal_implication.as_deref());
    if let Some(implication) = most_severe_implication {
        reason.push(' ');
        reason.push_str(implication);
    }

    RiskAssessment { level, reason }
}

fn describe_types(changes: &[Change]) -> String {
    [
        ChangeType::Added,
        ChangeType::Removed,
        ChangeType::Modified,
        ChangeType::Formatting,
        ChangeType::Moved,
    ]
    .iter()
    .filter_map(|t| {
        let count = changes.iter().filter(|c| c.change_type == *t).count();
        (count > 0).then(|| format!("{} {}", count, t.as_str()))
    })
    .collect::<Vec<_>>()
    .join(", ")
}
