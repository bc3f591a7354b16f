//! Normalized text similarity in `[0, 1]`
//!
//! Short spans use Levenshtein distance over chars; long spans fall back to a
//! bag-of-words Jaccard index. Both branches honour the same contract:
//! symmetric, `1.0` for equal inputs, `0.0` when exactly one side is empty.

use std::collections::HashSet;

/// Spans up to this many chars are compared with edit distance
pub const EDIT_DISTANCE_MAX_CHARS: usize = 1000;

/// Similarity with the default edit-distance cut-over
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with_limit(a, b, EDIT_DISTANCE_MAX_CHARS)
}

pub fn similarity_with_limit(a: &str, b: &str, max_chars: usize) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let longest = a_chars.len().max(b_chars.len());

    let score = if longest <= max_chars {
        1.0 - edit_distance(&a_chars, &b_chars) as f64 / longest as f64
    } else {
        jaccard(a, b)
    };

    score.clamp(0.0, 1.0)
}

/// Equal after collapsing every whitespace run and trimming both ends
pub fn whitespace_normalized_eq(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

/// Levenshtein distance with unit costs, two rows of memory
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Jaccard index of lowercase whitespace-delimited word sets
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let a_words: HashSet<&str> = a_lower.split_whitespace().collect();
    let b_words: HashSet<&str> = b_lower.split_whitespace().collect();

    let union = a_words.union(&b_words).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = a_words.intersection(&b_words).count();
    intersection as f64 / union as f64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: similarity is bounded
        #[test]
        fn bounded(a in "\\PC{0,60}", b in "\\PC{0,60}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        /// Property: similarity is symmetric on both branches
        #[test]
        fn symmetric(a in "[a-c ]{0,40}", b in "[a-c ]{0,40}", limit in 1usize..50) {
            prop_assert_eq!(
                similarity_with_limit(&a, &b, limit),
                similarity_with_limit(&b, &a, limit)
            );
        }

        /// Property: a span is fully similar to itself
        #[test]
        fn reflexive(a in "\\PC{0,80}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }

        /// Property: a non-empty span has zero similarity to the empty span
        #[test]
        fn empty_is_zero(a in "\\PC{1,80}") {
            prop_assert_eq!(similarity(&a, ""), 0.0);
        }
    }
}
