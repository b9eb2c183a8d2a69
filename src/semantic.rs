use crate::tfidf::TfidfPair;

/// Cosine similarity of the pair's TF-IDF vectors, computed on the raw
/// texts. Returns 0.0 when the pair has no vocabulary.
pub fn semantic_similarity(original: &str, translated: &str) -> f64 {
    TfidfPair::fit(original, translated)
        .map(|pair| pair.cosine_similarity())
        .unwrap_or(0.0)
}
