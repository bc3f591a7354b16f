//! Caller-owned redline document and reviewer decisions
//!
//! A `RedlineDocument` is derived from a `ComparisonResult` once and then
//! mutated only through accept/reject decisions. The comparison result itself
//! is never touched.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Change;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedlineError {
    #[error("Unknown change id: {0}")]
    UnknownChange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
    Cleared,
}

/// One reviewer decision, recorded only when it changes state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub change_id: String,
    pub decision: Decision,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedlineDocument {
    /// Plain-text report
    pub content: String,
    pub html_content: String,
    pub changes: Vec<Change>,
    pub accepted_changes: BTreeSet<String>,
    pub rejected_changes: BTreeSet<String>,
    #[serde(default)]
    pub history: Vec<ReviewEvent>,
}

impl RedlineDocument {
    pub fn new(content: String, html_content: String, changes: Vec<Change>) -> Self {
        Self {
            content,
            html_content,
            changes,
            accepted_changes: BTreeSet::new(),
            rejected_changes: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Accept a change. Idempotent; removes any prior rejection.
    pub fn accept_change(&mut self, change_id: &str) -> Result<(), RedlineError> {
        self.ensure_known(change_id)?;
        let removed = self.rejected_changes.remove(change_id);
        let inserted = self.accepted_changes.insert(change_id.to_string());
        if removed || inserted {
            self.record(change_id, Decision::Accepted);
        }
        Ok(())
    }

    /// Reject a change. Idempotent; removes any prior acceptance.
    pub fn reject_change(&mut self, change_id: &str) -> Result<(), RedlineError> {
        self.ensure_known(change_id)?;
        let removed = self.accepted_changes.remove(change_id);
        let inserted = self.rejected_changes.insert(change_id.to_string());
        if removed || inserted {
            self.record(change_id, Decision::Rejected);
        }
        Ok(())
    }

    /// Return a change to the undecided state
    pub fn clear_decision(&mut self, change_id: &str) -> Result<(), RedlineError> {
        self.ensure_known(change_id)?;
        let was_accepted = self.accepted_changes.remove(change_id);
        let was_rejected = self.rejected_changes.remove(change_id);
        if was_accepted || was_rejected {
            self.record(change_id, Decision::Cleared);
        }
        Ok(())
    }

    pub fn is_accepted(&self, change_id: &str) -> bool {
        self.accepted_changes.contains(change_id)
    }

    pub fn is_rejected(&self, change_id: &str) -> bool {
        self.rejected_changes.contains(change_id)
    }

    /// Changes with neither decision, in document order
    pub fn pending_changes(&self) -> impl Iterator<Item = &Change> {
        self.changes
            .iter()
            .filter(move |c| !self.is_accepted(&c.id) && !self.is_rejected(&c.id))
    }

    pub fn is_fully_reviewed(&self) -> bool {
        self.pending_changes().next().is_none()
    }

    fn ensure_known(&self, change_id: &str) -> Result<(), RedlineError> {
        if self.changes.iter().any(|c| c.id == change_id) {
            Ok(())
        } else {
            Err(RedlineError::UnknownChange(change_id.to_string()))
        }
    }

    fn record(&mut self, change_id: &str, decision: Decision) {
        self.history.push(ReviewEvent {
            change_id: change_id.to_string(),
            decision,
            timestamp: Utc::now().to_rfc3339(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeType, ClauseCategory, Severity};

    fn change(id: &str) -> Change {
        Change {
            id: id.to_string(),
            change_type: ChangeType::Added,
            severity: Severity::Minor,
            original_segment: None,
            new_segment: None,
            original_text: String::new(),
            new_text: "Yeni madde eklendi.".to_string(),
            clause_category: ClauseCategory::Other,
            risk_score: 0.3,
            legal_implication: None,
            comments: vec![],
        }
    }

    fn redline() -> RedlineDocument {
        RedlineDocument::new(
            "report".to_string(),
            "<div></div>".to_string(),
            vec![change("change-1"), change("change-2")],
        )
    }

    #[test]
    fn test_accept_is_idempotent() {
        let mut doc = redline();
        doc.accept_change("change-1").unwrap();
        doc.accept_change("change-1").unwrap();

        assert_eq!(doc.accepted_changes.len(), 1);
        assert_eq!(doc.history.len(), 1);
    }

    #[test]
    fn test_accept_and_reject_are_mutually_exclusive() {
        let mut doc = redline();
        doc.accept_change("change-1").unwrap();
        doc.reject_change("change-1").unwrap();

        assert!(!doc.is_accepted("change-1"));
        assert!(doc.is_rejected("change-1"));

        doc.accept_change("change-1").unwrap();
        assert!(doc.is_accepted("change-1"));
        assert!(!doc.is_rejected("change-1"));
        assert_eq!(doc.history.len(), 3);
    }

    #[test]
    fn test_unknown_change_is_rejected() {
        let mut doc = redline();
        let err = doc.accept_change("change-99").unwrap_err();

        assert_eq!(err, RedlineError::UnknownChange("change-99".to_string()));
        assert!(doc.accepted_changes.is_empty());
        assert!(doc.history.is_empty());
    }

    #[test]
    fn test_pending_changes() {
        let mut doc = redline();
        assert!(!doc.is_fully_reviewed());

        doc.reject_change("change-2").unwrap();
        let pending: Vec<_> = doc.pending_changes().map(|c| c.id.as_str()).collect();
        assert_eq!(pending, vec!["change-1"]);

        doc.accept_change("change-1").unwrap();
        assert!(doc.is_fully_reviewed());
    }

    #[test]
    fn test_clear_decision() {
        let mut doc = redline();
        doc.accept_change("change-1").unwrap();
        doc.clear_decision("change-1").unwrap();
        doc.clear_decision("change-1").unwrap();

        assert!(!doc.is_accepted("change-1"));
        assert_eq!(doc.history.last().unwrap().decision, Decision::Cleared);
        assert_eq!(doc.history.len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::types::{ChangeType, ClauseCategory, Severity};
    use proptest::prelude::*;

    fn doc_with(count: usize) -> RedlineDocument {
        let changes = (1..=count)
            .map(|i| Change {
                id: format!("change-{}", i),
                change_type: ChangeType::Removed,
                severity: Severity::Major,
                original_segment: None,
                new_segment: None,
                original_text: "x".to_string(),
                new_text: String::new(),
                clause_category: ClauseCategory::Other,
                risk_score: 0.5,
                legal_implication: None,
                comments: vec![],
            })
            .collect();
        RedlineDocument::new(String::new(), String::new(), changes)
    }

    proptest! {
        /// Property: after any sequence of decisions no id is both accepted and rejected
        #[test]
        fn decisions_stay_disjoint(ops in prop::collection::vec((0usize..3, 1usize..6), 0..40)) {
            let mut doc = doc_with(5);
            for (op, idx) in ops {
                let id = format!("change-{}", idx);
                match op {
                    0 => doc.accept_change(&id).unwrap(),
                    1 => doc.reject_change(&id).unwrap(),
                    _ => doc.clear_decision(&id).unwrap(),
                }
            }
            prop_assert!(doc.accepted_changes.is_disjoint(&doc.rejected_changes));
            let decided = doc.accepted_changes.len() + doc.rejected_changes.len();
            prop_assert_eq!(decided + doc.pending_changes().count(), 5);
        }
    }
}
