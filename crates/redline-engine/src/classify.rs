//! Turns an alignment into typed, risk-scored changes

use shared_types::{Change, ChangeType, TextSegment};

use crate::alignment::{AlignedPair, Alignment, MatchKind};
use crate::rules::clause_categories;
use crate::rules::risk_patterns::{self, first_divergent_pattern};
use crate::similarity::whitespace_normalized_eq;

/// Build one `Change` per unmatched segment and per non-identical match.
///
/// Emission order: original document order (matches and removals), then
/// additions in revised document order. Identical matches in place emit
/// nothing.
pub fn classify_changes(
    original: &[TextSegment],
    revised: &[TextSegment],
    alignment: &Alignment,
) -> Vec<Change> {
    let mut builder = ChangeBuilder::default();

    for (i, orig) in original.iter().enumerate() {
        match alignment.pair_for_original(i) {
            Some(pair) => {
                if let Some(change_type) = pair_change_type(pair, orig, &revised[pair.revised]) {
                    builder.pair(change_type, pair, orig, &revised[pair.revised]);
                }
            }
            None => builder.removed(orig),
        }
    }

    for &j in &alignment.unmatched_revised {
        builder.added(&revised[j]);
    }

    builder.changes
}

/// `None` for an in-place identical pair
fn pair_change_type(pair: &AlignedPair, orig: &TextSegment, rev: &TextSegment) -> Option<ChangeType> {
    let change_type = match (pair.kind, pair.relocated) {
        (MatchKind::Identical, false) => return None,
        (MatchKind::Identical, true) | (MatchKind::NearIdentical, true) => ChangeType::Moved,
        (MatchKind::NearIdentical, false) => ChangeType::Formatting,
        (MatchKind::Modified, _) => ChangeType::Modified,
    };

    // Near-identical text is only cosmetic if no risk phrase flipped across it
    let change_type = match change_type {
        ChangeType::Formatting if first_divergent_pattern(&orig.text, &rev.text).is_some() => {
            ChangeType::Modified
        }
        ChangeType::Modified if whitespace_normalized_eq(&orig.text, &rev.text) => {
            ChangeType::Formatting
        }
        other => other,
    };

    Some(change_type)
}

#[derive(Default)]
struct ChangeBuilder {
    changes: Vec<Change>,
}

impl ChangeBuilder {
    fn next_id(&self) -> String {
        format!("change-{}", self.changes.len() + 1)
    }

    fn pair(&mut self, change_type: ChangeType, pair: &AlignedPair, orig: &TextSegment, rev: &TextSegment) {
        let verdict = risk_patterns::assess_risk_with_similarity(
            &orig.text,
            &rev.text,
            change_type,
            pair.similarity,
        );

        let mut comments = vec![format!("Similarity: {:.2}", pair.similarity)];
        if pair.relocated {
            comments.push(format!(
                "Relocated from paragraph {} to paragraph {}",
                orig.paragraph_index, rev.paragraph_index
            ));
        }
        if pair.kind == MatchKind::NearIdentical && change_type == ChangeType::Modified {
            comments.push("Near-identical text changes a risk-relevant phrase".to_string());
        }
        if let Some(id) = verdict.pattern_id {
            comments.push(format!("Risk pattern: {}", id));
        }

        self.changes.push(Change {
            id: self.next_id(),
            change_type,
            severity: verdict.severity,
            original_segment: Some(orig.clone()),
            new_segment: Some(rev.clone()),
            original_text: orig.text.clone(),
            new_text: rev.text.clone(),
            clause_category: clause_categories::classify(&rev.text),
            risk_score: verdict.risk_score,
            legal_implication: verdict.implication,
            comments,
        });
    }

    fn removed(&mut self, orig: &TextSegment) {
        let verdict = risk_patterns::assess_risk(&orig.text, "", ChangeType::Removed);
        let comments = verdict
            .pattern_id
            .map(|id| vec![format!("Risk pattern: {}", id)])
            .unwrap_or_default();

        self.changes.push(Change {
            id: self.next_id(),
            change_type: ChangeType::Removed,
            severity: verdict.severity,
            original_segment: Some(orig.clone()),
            new_segment: None,
            original_text: orig.text.clone(),
            new_text: String::new(),
            clause_category: clause_categories::classify(&orig.text),
            risk_score: verdict.risk_score,
            legal_implication: verdict.implication,
            comments,
        });
    }

    fn added(&mut self, rev: &TextSegment) {
        let verdict = risk_patterns::assess_risk("", &rev.text, ChangeType::Added);
        let comments = verdict
            .pattern_id
            .map(|id| vec![format!("Risk pattern: {}", id)])
            .unwrap_or_default();

        self.changes.push(Change {
            id: self.next_id(),
            change_type: ChangeType::Added,
            severity: verdict.severity,
            original_segment: None,
            new_segment: Some(rev.clone()),
            original_text: String::new(),
            new_text: rev.text.clone(),
            clause_category: clause_categories::classify(&rev.text),
            risk_score: verdict.risk_score,
            legal_implication: verdict.implication,
            comments,
        });
    }
}
