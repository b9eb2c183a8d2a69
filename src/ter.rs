use crate::tfidf::TfidfPair;
use crate::utils::Sequence;

/// Mean squared error between the TF-IDF vectors of the two texts.
///
/// A vector-distance proxy for translation edit rate, not an edit count:
/// 0.0 means the texts share the same term distribution. Returns 0.0 when
/// the pair has no vocabulary or either text has no terms.
pub fn edit_proxy(candidate: &str, reference: &str) -> f64 {
    match TfidfPair::fit(candidate, reference) {
        Some(pair) if !pair.has_empty_document() => pair.mean_squared_error(),
        _ => 0.0,
    }
}

/// Edit proxy over the segmented texts, so Chinese is compared word by word.
pub fn ter_score(candidate: &Sequence, reference: &Sequence) -> f64 {
    edit_proxy(&candidate.joined(), &reference.joined())
}
