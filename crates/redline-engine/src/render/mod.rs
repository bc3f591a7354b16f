//! Presentation of comparison results
//!
//! - **HTML**: redline of the revised document with inline word diffs
//! - **Report**: plain-text summary for terminals and emails
//!
//! Nothing here changes a result; both renderers are pure functions of it.

mod html;
mod report;

use shared_types::RedlineDocument;

use crate::Comparison;

pub use html::{escape_html, inline_diff, render_html, word_diff, DiffOp};
pub use report::render_report;

/// Build the reviewable redline for a comparison: the text report as
/// `content`, the HTML redline as `html_content`, no decisions yet.
pub fn build_redline(comparison: &Comparison) -> RedlineDocument {
    RedlineDocument::new(
        render_report(&comparison.result),
        render_html(&comparison.result, &comparison.revised_segments),
        comparison.result.changes.clone(),
    )
}
