//! HTML redline
//!
//! Revised paragraphs are emitted in document order, each marked up by the
//! change that references it. Paragraphs deleted outright follow at the end.

use std::collections::HashMap;

use shared_types::{Change, ChangeType, ComparisonResult, TextSegment};

/// Largest token grid (`words(a) * words(b)`) diffed word by word
const MAX_WORD_DIFF_CELLS: usize = 250_000;

const STYLE: &str = r#"
  body { font-family: Georgia, 'Times New Roman', serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; color: #222; }
  header { border-bottom: 1px solid #ddd; margin-bottom: 24px; }
  p.change { padding: 4px 8px; border-left: 3px solid transparent; }
  p.severity-critical { border-left-color: #b91c1c; }
  p.severity-major { border-left-color: #ea580c; }
  p.severity-minor { border-left-color: #ca8a04; }
  p.severity-cosmetic { border-left-color: #9ca3af; }
  ins { background: #dcfce7; color: #166534; text-decoration: none; }
  del { background: #fee2e2; color: #991b1b; }
  p.moved { background: #eff6ff; }
  p.formatting { color: #555; }
  section.removed { border-top: 1px dashed #ddd; margin-top: 24px; }
"#;

/// One step of a word-level diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp<'a> {
    Equal(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

/// Render the redline for a comparison.
///
/// `revised_segments` must be the segments the result was computed from;
/// segments that no change references are rendered as plain paragraphs.
pub fn render_html(result: &ComparisonResult, revised_segments: &[TextSegment]) -> String {
    let by_new_segment: HashMap<&str, &Change> = result
        .changes
        .iter()
        .filter_map(|c| c.new_segment.as_ref().map(|s| (s.id.as_str(), c)))
        .collect();

    let mut body = String::new();
    for segment in revised_segments {
        match by_new_segment.get(segment.id.as_str()) {
            Some(change) => body.push_str(&render_change(change)),
            None => body.push_str(&format!("<p>{}</p>\n", escape_html(&segment.text))),
        }
    }

    let removed: Vec<&Change> = result
        .changes
        .iter()
        .filter(|c| c.change_type == ChangeType::Removed)
        .collect();
    if !removed.is_empty() {
        body.push_str("<section class=\"removed\">\n<h2>Removed paragraphs</h2>\n");
        for change in removed {
            body.push_str(&render_change(change));
        }
        body.push_str("</section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Redline: {original} vs {revised}</title>
  <style>{style}</style>
</head>
<body>
<header>
  <h1>Redline</h1>
  <p>{original} &rarr; {revised}</p>
  <p>{total} change(s), overall risk <strong>{level}</strong> ({score:.2})</p>
</header>
<main>
{body}</main>
</body>
</html>
"#,
        original = escape_html(&result.original_document.name),
        revised = escape_html(&result.new_document.name),
        style = STYLE,
        total = result.summary.total_changes,
        level = result.summary.overall_risk_level.as_str(),
        score = result.summary.overall_risk_score,
        body = body,
    )
}

fn render_change(change: &Change) -> String {
    let inner = match change.change_type {
        ChangeType::Added => format!("<ins>{}</ins>", escape_html(&change.new_text)),
        ChangeType::Removed => format!("<del>{}</del>", escape_html(&change.original_text)),
        ChangeType::Modified => inline_diff(&change.original_text, &change.new_text),
        ChangeType::Moved if change.original_text != change.new_text => {
            inline_diff(&change.original_text, &change.new_text)
        }
        ChangeType::Moved | ChangeType::Formatting | ChangeType::Unchanged => {
            escape_html(&change.new_text)
        }
    };

    let title = change
        .legal_implication
        .as_deref()
        .or_else(|| change.comments.first().map(String::as_str))
        .map(|t| format!(" title=\"{}\"", escape_html(t)))
        .unwrap_or_default();

    format!(
        "<p class=\"change {kind} severity-{severity}\" data-change-id=\"{id}\" data-category=\"{category}\"{title}>{inner}</p>\n",
        kind = change.change_type.as_str(),
        severity = change.severity.as_str(),
        id = escape_html(&change.id),
        category = change.clause_category.as_str(),
        title = title,
        inner = inner,
    )
}

/// Word-level `<del>`/`<ins>` markup, or a whole-paragraph replacement
/// when the paragraphs are too long to diff
pub fn inline_diff(original: &str, new: &str) -> String {
    let a: Vec<&str> = original.split_whitespace().collect();
    let b: Vec<&str> = new.split_whitespace().collect();

    if a.len().saturating_mul(b.len()) > MAX_WORD_DIFF_CELLS {
        return format!(
            "<del>{}</del> <ins>{}</ins>",
            escape_html(original),
            escape_html(new)
        );
    }

    let mut parts: Vec<String> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut run_tag = "";

    for op in word_diff(&a, &b) {
        let (word, tag) = match op {
            DiffOp::Equal(w) => (w, ""),
            DiffOp::Delete(w) => (w, "del"),
            DiffOp::Insert(w) => (w, "ins"),
        };
        if tag != run_tag && !run.is_empty() {
            parts.push(wrap(run_tag, &run));
            run.clear();
        }
        run_tag = tag;
        run.push(word);
    }
    if !run.is_empty() {
        parts.push(wrap(run_tag, &run));
    }

    parts.join(" ")
}

fn wrap(tag: &str, words: &[&str]) -> String {
    let text = escape_html(&words.join(" "));
    if tag.is_empty() {
        text
    } else {
        format!("<{tag}>{text}</{tag}>")
    }
}

/// Longest-common-subsequence diff over word tokens. Deletions are emitted
/// before insertions at each divergence.
pub fn word_diff<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<DiffOp<'a>> {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    // lcs[i * width + j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if a[i] == b[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(DiffOp::Equal(a[i]));
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push(DiffOp::Delete(a[i]));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().copied().map(DiffOp::Delete));
    ops.extend(b[j..].iter().copied().map(DiffOp::Insert));
    ops
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn escape_never_leaks_markup(s in "\\PC*") {
            let escaped = escape_html(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
        }

        #[test]
        fn diff_preserves_both_sides(
            a in prop::collection::vec("[a-c]{1,2}", 0..12),
            b in prop::collection::vec("[a-c]{1,2}", 0..12),
        ) {
            let a: Vec<&str> = a.iter().map(String::as_str).collect();
            let b: Vec<&str> = b.iter().map(String::as_str).collect();
            let ops = word_diff(&a, &b);

            let left: Vec<&str> = ops.iter().filter_map(|op| match op {
                DiffOp::Equal(w) | DiffOp::Delete(w) => Some(*w),
                DiffOp::Insert(_) => None,
            }).collect();
            let right: Vec<&str> = ops.iter().filter_map(|op| match op {
                DiffOp::Equal(w) | DiffOp::Insert(w) => Some(*w),
                DiffOp::Delete(_) => None,
            }).collect();
            prop_assert_eq!(left, a);
            prop_assert_eq!(right, b);
        }
    }
}
