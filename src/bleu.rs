use crate::config::Weights;
use crate::utils::Sequence;
use std::collections::HashMap;

fn get_ngrams_from_word_vec(word_vec: &[String], ngrams: usize) -> Vec<String> {
    if ngrams == 1 {
        return word_vec.to_owned();
    }
    word_vec.windows(ngrams).map(|w| w.join(" ")).collect()
}

fn get_ngram_counts(ngrams_vec: &[String]) -> HashMap<&str, usize> {
    let mut hashmap: HashMap<&str, usize> = HashMap::new();
    for ngram in ngrams_vec {
        *hashmap.entry(ngram.as_str()).or_insert(0) += 1;
    }
    hashmap
}

fn get_matches_clipped(
    candidate_map: &HashMap<&str, usize>,
    reference_map: &HashMap<&str, usize>,
) -> usize {
    let mut matches: usize = 0;
    for (ng, candidate_count) in candidate_map {
        if let Some(reference_count) = reference_map.get(ng) {
            matches += candidate_count.min(reference_count);
        }
    }
    matches
}

/// Clipped precision of the candidate's n-grams of one order.
fn modified_precision(candidate: &[String], reference: &[String], ngrams: usize) -> f64 {
    let candidate_ngrams_vec = get_ngrams_from_word_vec(candidate, ngrams);
    let reference_ngrams_vec = get_ngrams_from_word_vec(reference, ngrams);

    let total_candidate_ngrams_count = candidate_ngrams_vec.len();
    if total_candidate_ngrams_count == 0 {
        return 0.0;
    }

    let candidate_counts = get_ngram_counts(&candidate_ngrams_vec);
    let reference_counts = get_ngram_counts(&reference_ngrams_vec);

    let matches = get_matches_clipped(&candidate_counts, &reference_counts) as f64;
    matches / total_candidate_ngrams_count as f64
}

fn brevity_penalty(candidate_len: usize, reference_len: usize) -> f64 {
    if candidate_len > reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    }
}

/// Sentence-level BLEU of `candidate` against a single `reference`.
///
/// Weight `i` applies to n-grams of order `i + 1`. Orders longer than either
/// sequence are skipped and the remaining positive weights renormalised, so
/// short sentences are scored on the orders they can actually contain.
/// Returns 0.0 when either side is empty, when no positive weight survives,
/// or when any weighted order has no match.
pub fn ngram_precision(candidate: &[String], reference: &[String], weights: &Weights) -> f64 {
    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }

    // Make sure we don't ask for more ngrams than the
    // two sequences can provide
    let max_ngrams = weights
        .max_order()
        .min(candidate.len())
        .min(reference.len());

    let mut total_weight = 0.0;
    let mut weighted_log_sum = 0.0;
    for (i, &weight) in weights.as_slice()[..max_ngrams].iter().enumerate() {
        if weight == 0.0 {
            continue;
        }
        let precision = modified_precision(candidate, reference, i + 1);
        if precision == 0.0 {
            return 0.0;
        }
        total_weight += weight;
        weighted_log_sum += weight * precision.ln();
    }

    if total_weight == 0.0 {
        return 0.0;
    }

    let mean = (weighted_log_sum / total_weight).exp();
    brevity_penalty(candidate.len(), reference.len()) * mean
}

pub fn bleu_score(candidate: &Sequence, reference: &Sequence, weights: &Weights) -> f64 {
    ngram_precision(&candidate.word_vector, &reference.word_vector, weights)
}
