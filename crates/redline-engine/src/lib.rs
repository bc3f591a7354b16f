//! Legal document redlining
//!
//! Compares two versions of a plain-text contract paragraph by paragraph,
//! classifies every difference, scores it for legal risk and rolls the
//! result up per clause category and per document.
//!
//! ```
//! use redline_engine::RedlineEngine;
//!
//! let engine = RedlineEngine::default();
//! let result = engine.compare(
//!     "Madde 1: Ödeme yapılacaktır.",
//!     "Madde 1: Ödeme 30 gün içinde yapılacaktır.",
//! );
//! assert_eq!(result.summary.total_changes, 1);
//! ```

pub mod aggregate;
pub mod alignment;
pub mod classify;
pub mod config;
pub mod error;
pub mod render;
pub mod rules;
pub mod segmenter;
pub mod similarity;
pub mod summary;

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{ComparisonResult, DocumentDescriptor, TextSegment};
use tracing::{info, instrument};
use uuid::Uuid;

use alignment::MatchKind;
use segmenter::DocumentSide;

pub use config::EngineConfig;
pub use error::ConfigError;

pub const DEFAULT_ORIGINAL_NAME: &str = "Original";
pub const DEFAULT_REVISED_NAME: &str = "Revised";

/// One side of a comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentInput<'a> {
    pub name: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> DocumentInput<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { name: None, text }
    }

    pub fn named(name: &'a str, text: &'a str) -> Self {
        Self {
            name: Some(name),
            text,
        }
    }
}

/// A comparison result together with the segments it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub result: ComparisonResult,
    pub original_segments: Vec<TextSegment>,
    pub revised_segments: Vec<TextSegment>,
}

/// Entry point. Holds only immutable configuration, so one engine can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RedlineEngine {
    config: EngineConfig,
}

impl RedlineEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compare two unnamed documents
    pub fn compare(&self, original: &str, revised: &str) -> ComparisonResult {
        self.compare_documents(DocumentInput::new(original), DocumentInput::new(revised))
            .result
    }

    #[instrument(skip_all, fields(original = original.name, revised = revised.name))]
    pub fn compare_documents(
        &self,
        original: DocumentInput<'_>,
        revised: DocumentInput<'_>,
    ) -> Comparison {
        let started = Instant::now();

        let original_segments = segmenter::segment(original.text, DocumentSide::Original);
        let revised_segments = segmenter::segment(revised.text, DocumentSide::Revised);

        let alignment = alignment::align(&original_segments, &revised_segments, &self.config);
        let changes = classify::classify_changes(&original_segments, &revised_segments, &alignment);

        let unchanged_count = alignment
            .pairs
            .iter()
            .filter(|p| p.kind == MatchKind::Identical && !p.relocated)
            .count();

        let clause_comparisons = aggregate::aggregate_clauses(original.text, revised.text, &changes);
        let summary = summary::build_summary(&changes, &clause_comparisons, unchanged_count);

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            original_segments = original_segments.len(),
            revised_segments = revised_segments.len(),
            changes = changes.len(),
            risk_level = summary.overall_risk_level.as_str(),
            duration_ms,
            "comparison complete"
        );

        let result = ComparisonResult {
            id: Uuid::new_v4().to_string(),
            original_document: DocumentDescriptor::new(
                original.name.unwrap_or(DEFAULT_ORIGINAL_NAME),
                original.text,
                original_segments.len(),
            ),
            new_document: DocumentDescriptor::new(
                revised.name.unwrap_or(DEFAULT_REVISED_NAME),
                revised.text,
                revised_segments.len(),
            ),
            changes,
            clause_comparisons,
            summary,
            compared_at: chrono::Utc::now().to_rfc3339(),
            duration_ms,
        };

        Comparison {
            result,
            original_segments,
            revised_segments,
        }
    }

    /// Compare independent document pairs in parallel. Output order matches
    /// input order.
    pub fn compare_batch(&self, pairs: &[(DocumentInput<'_>, DocumentInput<'_>)]) -> Vec<Comparison> {
        pairs
            .par_iter()
            .map(|&(original, revised)| self.compare_documents(original, revised))
            .collect()
    }
}
