//! Paragraph alignment between two document versions
//!
//! Greedy best match: each original paragraph, in document order, takes the
//! most similar paragraph of the revised document that is still free. A free
//! paragraph with exactly the same text always wins; otherwise ties go to the
//! earliest candidate. Paragraphs that differ only in whitespace score 1.0.
//! This is not an optimal bipartite matching, but it is `O(|O|·|N|)`
//! similarity calls and deterministic.
//!
//! With move detection enabled, a second pass finds the longest chain of
//! matches whose revised positions increase with the original order. Matches
//! outside that chain are flagged as relocated.

use shared_types::TextSegment;
use tracing::debug;

use crate::config::EngineConfig;
use crate::similarity::{similarity_with_limit, whitespace_normalized_eq};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Byte-for-byte equal text
    Identical,
    /// Similarity at or above the near-identical threshold
    NearIdentical,
    /// Similarity at or above the match threshold
    Modified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub original: usize,
    pub revised: usize,
    pub similarity: f64,
    pub kind: MatchKind,
    pub relocated: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    /// Matches in original document order
    pub pairs: Vec<AlignedPair>,
    pub unmatched_original: Vec<usize>,
    pub unmatched_revised: Vec<usize>,
}

impl Alignment {
    pub fn pair_for_original(&self, index: usize) -> Option<&AlignedPair> {
        self.pairs.iter().find(|p| p.original == index)
    }
}

pub fn align(original: &[TextSegment], revised: &[TextSegment], config: &EngineConfig) -> Alignment {
    let mut alignment = Alignment::default();
    let mut revised_taken = vec![false; revised.len()];

    for (i, orig) in original.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;

        for (j, rev) in revised.iter().enumerate() {
            if revised_taken[j] {
                continue;
            }
            if orig.text == rev.text {
                best = Some((j, 1.0));
                break;
            }
            let score = if whitespace_normalized_eq(&orig.text, &rev.text) {
                1.0
            } else {
                similarity_with_limit(&orig.text, &rev.text, config.edit_distance_max_chars)
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((j, score));
            }
        }

        let matched = best.and_then(|(j, score)| {
            let kind = if orig.text == revised[j].text {
                MatchKind::Identical
            } else if score >= config.near_identical_threshold {
                MatchKind::NearIdentical
            } else if score >= config.match_threshold {
                MatchKind::Modified
            } else {
                return None;
            };
            Some((j, score, kind))
        });

        match matched {
            Some((j, score, kind)) => {
                revised_taken[j] = true;
                alignment.pairs.push(AlignedPair {
                    original: i,
                    revised: j,
                    similarity: score,
                    kind,
                    relocated: false,
                });
            }
            None => alignment.unmatched_original.push(i),
        }
    }

    alignment.unmatched_revised = revised_taken
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .map(|(j, _)| j)
        .collect();

    if config.detect_moves {
        mark_relocations(&mut alignment.pairs);
    }

    debug!(
        pairs = alignment.pairs.len(),
        unmatched_original = alignment.unmatched_original.len(),
        unmatched_revised = alignment.unmatched_revised.len(),
        relocated = alignment.pairs.iter().filter(|p| p.relocated).count(),
        "aligned segments"
    );

    alignment
}

/// Flag pairs outside the longest increasing run of revised indices
fn mark_relocations(pairs: &mut [AlignedPair]) {
    let revised: Vec<usize> = pairs.iter().map(|p| p.revised).collect();
    let keep = longest_increasing_subsequence(&revised);

    let mut in_order = vec![false; pairs.len()];
    for idx in keep {
        in_order[idx] = true;
    }
    for (pair, ordered) in pairs.iter_mut().zip(in_order) {
        pair.relocated = !ordered;
    }
}

/// Positions (into `values`) of one longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, `O(n log n)`.
pub fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k] = position of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (pos, &value) in values.iter().enumerate() {
        let k = tails.partition_point(|&t| values[t] < value);
        if k > 0 {
            predecessor[pos] = Some(tails[k - 1]);
        }
        if k == tails.len() {
            tails.push(pos);
        } else {
            tails[k] = pos;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(pos) = cursor {
        result.push(pos);
        cursor = predecessor[pos];
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{segment, DocumentSide};

    fn run(original: &str, revised: &str, config: &EngineConfig) -> Alignment {
        let o = segment(original, DocumentSide::Original);
        let r = segment(revised, DocumentSide::Revised);
        align(&o, &r, config)
    }

    #[test]
    fn test_identical_documents_pair_up() {
        let text = "Madde 1: Taraflar\n\nMadde 2: Ödeme\n\nMadde 3: Fesih";
        let alignment = run(text, text, &EngineConfig::default());

        assert_eq!(alignment.pairs.len(), 3);
        assert!(alignment.pairs.iter().all(|p| p.kind == MatchKind::Identical));
        assert!(alignment.pairs.iter().all(|p| !p.relocated));
        assert!(alignment.unmatched_original.is_empty());
        assert!(alignment.unmatched_revised.is_empty());
    }

    #[test]
    fn test_thresholds_classify_pairs() {
        let alignment = run(
            "Madde 1: Ödeme yapılacaktır.\n\nBu paragraf tamamen farklıdır.",
            "Madde 1: Ödeme 30 gün içinde yapılacaktır.\n\nXYZ 123 qwerty.",
            &EngineConfig::default(),
        );

        assert_eq!(alignment.pairs.len(), 1);
        assert_eq!(alignment.pairs[0].kind, MatchKind::Modified);
        assert_eq!(alignment.unmatched_original, vec![1]);
        assert_eq!(alignment.unmatched_revised, vec![1]);
    }

    #[test]
    fn test_near_identical() {
        let base = "Satıcı malları sözleşmede belirtilen adrese eksiksiz olarak teslim edecektir.";
        let tweaked = "Satıcı malları sözleşmede belirtilen adrese eksiksiz olarak teslim edecektir!";
        let alignment = run(base, tweaked, &EngineConfig::default());

        assert_eq!(alignment.pairs[0].kind, MatchKind::NearIdentical);
        assert!(alignment.pairs[0].similarity >= 0.95);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let alignment = run("abcd", "abcx\n\nabcy", &EngineConfig::default());
        assert_eq!(alignment.pairs[0].revised, 0);
        assert_eq!(alignment.unmatched_revised, vec![1]);
    }

    #[test]
    fn test_whitespace_only_difference_always_pairs() {
        // Edit-distance similarity is far below the match threshold here
        let alignment = run("Ödeme yapılır.", "Ödeme yapılır.          ", &EngineConfig::default());

        assert_eq!(alignment.pairs.len(), 1);
        assert_eq!(alignment.pairs[0].kind, MatchKind::NearIdentical);
        assert_eq!(alignment.pairs[0].similarity, 1.0);
        assert!(alignment.unmatched_original.is_empty());
        assert!(alignment.unmatched_revised.is_empty());
    }

    #[test]
    fn test_exact_text_preferred_over_earlier_equivalent() {
        let alignment = run("Madde 1.", "Madde   1.\n\nMadde 1.", &EngineConfig::default());

        assert_eq!(alignment.pairs[0].revised, 1);
        assert_eq!(alignment.pairs[0].kind, MatchKind::Identical);
        assert_eq!(alignment.unmatched_revised, vec![0]);
    }

    #[test]
    fn test_strict_one_to_one() {
        // Both originals prefer the single revised paragraph; only the first gets it
        let alignment = run("Madde 1.\n\nMadde 1.", "Madde 1.", &EngineConfig::default());
        assert_eq!(alignment.pairs.len(), 1);
        assert_eq!(alignment.unmatched_original, vec![1]);
    }

    #[test]
    fn test_empty_sides() {
        let alignment = run("", "A\n\nB", &EngineConfig::default());
        assert!(alignment.pairs.is_empty());
        assert_eq!(alignment.unmatched_revised, vec![0, 1]);

        let alignment = run("A\n\nB", "", &EngineConfig::default());
        assert_eq!(alignment.unmatched_original, vec![0, 1]);
    }

    #[test]
    fn test_relocation_detected() {
        let original = "Birinci paragraf.\n\nİkinci paragraf.\n\nÜçüncü paragraf.";
        let revised = "İkinci paragraf.\n\nÜçüncü paragraf.\n\nBirinci paragraf.";
        let alignment = run(original, revised, &EngineConfig::default());

        let relocated: Vec<_> = alignment
            .pairs
            .iter()
            .filter(|p| p.relocated)
            .map(|p| p.original)
            .collect();
        assert_eq!(relocated, vec![0]);
    }

    #[test]
    fn test_relocation_disabled() {
        let config = EngineConfig {
            detect_moves: false,
            ..EngineConfig::default()
        };
        let alignment = run("A para.\n\nB para.", "B para.\n\nA para.", &config);
        assert!(alignment.pairs.iter().all(|p| !p.relocated));
    }

    #[test]
    fn test_lis() {
        assert_eq!(longest_increasing_subsequence(&[]), Vec::<usize>::new());
        assert_eq!(longest_increasing_subsequence(&[0, 1, 2]), vec![0, 1, 2]);
        assert_eq!(longest_increasing_subsequence(&[2, 0, 1]), vec![1, 2]);
        assert_eq!(longest_increasing_subsequence(&[3, 1, 2, 0, 4]).len(), 3);
    }
}
