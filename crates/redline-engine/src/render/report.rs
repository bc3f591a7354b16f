//! Plain-text comparison report
//!
//! Summary, per-clause table, the high-severity changes and recommendations.

use std::fmt::{self, Write};

use shared_types::{Change, ComparisonResult, DocumentDescriptor, Severity};

const RULE: &str = "────────────────────────────────────────────────────────────────";

/// How many high-severity changes are listed individually
const MAX_LISTED_CHANGES: usize = 10;

const SNIPPET_CHARS: usize = 80;

pub fn render_report(result: &ComparisonResult) -> String {
    let mut output = String::new();
    // fmt::Write into a String cannot fail
    let _ = write_report(&mut output, result);
    output
}

fn write_report(output: &mut String, result: &ComparisonResult) -> fmt::Result {
    let summary = &result.summary;

    writeln!(output, "REDLINE COMPARISON REPORT")?;
    writeln!(output, "{}", RULE)?;
    write_document(output, "Original", &result.original_document)?;
    write_document(output, "Revised", &result.new_document)?;
    writeln!(output, "Compared:  {} ({}ms)", result.compared_at, result.duration_ms)?;
    writeln!(output)?;

    writeln!(output, "SUMMARY")?;
    writeln!(output, "{}", RULE)?;
    writeln!(
        output,
        "  Overall risk:  {} (score {:.2})",
        summary.overall_risk_level.as_str().to_uppercase(),
        summary.overall_risk_score
    )?;
    writeln!(output, "  Changes:       {}", summary.total_changes)?;
    writeln!(
        output,
        "    added {}, removed {}, modified {}, formatting {}, moved {}, unchanged {}",
        summary.added_count,
        summary.removed_count,
        summary.modified_count,
        summary.formatting_count,
        summary.moved_count,
        summary.unchanged_count
    )?;
    writeln!(
        output,
        "  Severity:      critical {}, major {}, minor {}, cosmetic {}",
        summary.critical_count, summary.major_count, summary.minor_count, summary.cosmetic_count
    )?;
    writeln!(output)?;

    writeln!(output, "KEY FINDINGS")?;
    writeln!(output, "{}", RULE)?;
    for finding in &summary.key_findings {
        writeln!(output, "  - {}", finding)?;
    }
    writeln!(output)?;

    if !result.clause_comparisons.is_empty() {
        writeln!(output, "CLAUSES")?;
        writeln!(output, "{}", RULE)?;
        writeln!(
            output,
            "  {:<24} {:<10} {:<9} {:>7}",
            "Category", "Change", "Risk", "Changes"
        )?;
        for clause in &result.clause_comparisons {
            writeln!(
                output,
                "  {:<24} {:<10} {:<9} {:>7}",
                clause.category.label(),
                format!("{:?}", clause.overall_change).to_lowercase(),
                clause.risk_assessment.level.as_str(),
                clause.changes.len()
            )?;
        }
        writeln!(output)?;
    }

    let mut serious: Vec<&Change> = result
        .changes_with_severity(Severity::Critical)
        .chain(result.changes_with_severity(Severity::Major))
        .collect();
    serious.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    if !serious.is_empty() {
        writeln!(output, "HIGH-SEVERITY CHANGES")?;
        writeln!(output, "{}", RULE)?;
        for change in serious.iter().take(MAX_LISTED_CHANGES) {
            write_change(output, change)?;
        }
        if serious.len() > MAX_LISTED_CHANGES {
            writeln!(output, "  ... and {} more", serious.len() - MAX_LISTED_CHANGES)?;
        }
        writeln!(output)?;
    }

    writeln!(output, "RECOMMENDATIONS")?;
    writeln!(output, "{}", RULE)?;
    for (i, rec) in summary.recommendations.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, rec)?;
    }

    Ok(())
}

fn write_document(output: &mut String, label: &str, doc: &DocumentDescriptor) -> fmt::Result {
    let short = doc.fingerprint.get(..12).unwrap_or(&doc.fingerprint);
    writeln!(
        output,
        "{:<10} {} ({} paragraphs, {} chars, sha256 {})",
        format!("{}:", label),
        doc.name,
        doc.segment_count,
        doc.char_count,
        short
    )
}

fn write_change(output: &mut String, change: &Change) -> fmt::Result {
    writeln!(
        output,
        "  [{}] {} {} ({}, risk {:.2})",
        change.severity.as_str(),
        change.id,
        change.change_type.as_str(),
        change.clause_category.label(),
        change.risk_score
    )?;
    if !change.original_text.is_empty() {
        writeln!(output, "      - {}", snippet(&change.original_text))?;
    }
    if !change.new_text.is_empty() {
        writeln!(output, "      + {}", snippet(&change.new_text))?;
    }
    if let Some(implication) = &change.legal_implication {
        writeln!(output, "      {}", implication)?;
    }
    Ok(())
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= SNIPPET_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RedlineEngine;

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let text = "ş".repeat(100);
        let s = snippet(&text);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_snippet_flattens_whitespace() {
        assert_eq!(snippet("a\n  b\tc"), "a b c");
    }

    #[test]
    fn test_high_severity_section_lists_critical_changes() {
        let result = RedlineEngine::default().compare(
            "Satıcı, sözleşmeden doğan zararlardan sınırsız sorumluluk taşır.\n\nGizlilik esastır.",
            "Satıcı, sözleşmeden doğan zararlardan sorumluluk taşır.\n\nGizlilik esastır.  ",
        );
        let report = render_report(&result);

        assert!(report.contains("HIGH-SEVERITY CHANGES"));
        assert!(report.contains("[critical] change-1 modified"));
        // The formatting change stays out of the list
        assert!(!report.contains("change-2 formatting"));
    }

    #[test]
    fn test_cosmetic_only_report_has_no_high_severity_section() {
        let result = RedlineEngine::default().compare("Gizlilik esastır.", "Gizlilik esastır.   ");
        let report = render_report(&result);

        assert!(!report.contains("HIGH-SEVERITY CHANGES"));
        assert!(report.contains("RECOMMENDATIONS"));
    }
}
