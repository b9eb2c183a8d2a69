use std::collections::HashSet;

use crate::utils::Sequence;

/// Share of the reference's distinct characters that also occur in the
/// candidate.
///
/// This is a set-overlap stand-in for chrF: it ignores character n-grams,
/// counts and order, and weighs recall only.
pub fn char_overlap(candidate: &str, reference: &str) -> f64 {
    let reference_chars: HashSet<char> = reference.chars().collect();
    if reference_chars.is_empty() {
        return 0.0;
    }
    let candidate_chars: HashSet<char> = candidate.chars().collect();
    let common = reference_chars.intersection(&candidate_chars).count();
    common as f64 / reference_chars.len() as f64
}

/// Character overlap of the concatenated token sequences; whitespace
/// between tokens does not count.
pub fn chrf_score(candidate: &Sequence, reference: &Sequence) -> f64 {
    char_overlap(&candidate.concatenated(), &reference.concatenated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::WhitespaceSegmenter;

    fn seq(text: &str) -> Sequence {
        Sequence::new(text, &WhitespaceSegmenter)
    }

    #[test]
    fn test_identical_is_one() {
        assert_eq!(chrf_score(&seq("the cat sat"), &seq("the cat sat")), 1.0);
        assert_eq!(char_overlap("翻译", "翻译"), 1.0);
    }

    #[test]
    fn test_empty_reference_is_zero() {
        assert_eq!(chrf_score(&seq("the cat"), &seq("")), 0.0);
        assert_eq!(chrf_score(&seq(""), &seq("   ")), 0.0);
    }

    #[test]
    fn test_empty_candidate_is_zero() {
        assert_eq!(chrf_score(&seq(""), &seq("abc")), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // reference set {a, b, c, d}, candidate covers {a, b}
        let score = char_overlap("aab", "abcd");
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_order_insensitive() {
        assert_eq!(char_overlap("dcba", "abcd"), 1.0);
    }

    #[test]
    fn test_spaces_are_not_characters() {
        // "the cat" and "thecat" collapse to the same character set
        assert_eq!(chrf_score(&seq("thecat"), &seq("the cat")), 1.0);
    }
}
