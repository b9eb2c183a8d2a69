//! TF-IDF vectors for a two-document corpus.
//!
//! Each text pair is its own corpus: the vocabulary and the document
//! frequencies come from the candidate and the reference alone. Terms are
//! lowercased runs of Unicode word characters, weights are raw counts times
//! the smoothed idf `ln((1 + n) / (1 + df)) + 1`, and each document vector is
//! L2-normalised.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TERM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("term pattern is a valid regex"));

const N_DOCUMENTS: f64 = 2.0;

/// Lowercased word-character runs of `text`, in order.
pub fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn term_counts(terms: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }
    counts
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
}

/// Dense, aligned TF-IDF vectors of a candidate and a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfPair {
    pub vocabulary: Vec<String>,
    pub candidate: Vec<f64>,
    pub reference: Vec<f64>,
}

impl TfidfPair {
    /// Vectorizes the pair, or returns `None` when neither text has a single
    /// term (empty vocabulary).
    pub fn fit(candidate: &str, reference: &str) -> Option<Self> {
        let candidate_terms = terms(candidate);
        let reference_terms = terms(reference);
        let candidate_counts = term_counts(&candidate_terms);
        let reference_counts = term_counts(&reference_terms);

        let vocabulary: BTreeSet<&str> = candidate_counts
            .keys()
            .chain(reference_counts.keys())
            .copied()
            .collect();
        if vocabulary.is_empty() {
            debug!("TF-IDF vocabulary is empty; pair cannot be vectorized");
            return None;
        }

        let mut candidate_vec = Vec::with_capacity(vocabulary.len());
        let mut reference_vec = Vec::with_capacity(vocabulary.len());
        for term in &vocabulary {
            let in_candidate = candidate_counts.get(term).copied().unwrap_or(0);
            let in_reference = reference_counts.get(term).copied().unwrap_or(0);
            let df = (in_candidate > 0) as usize + (in_reference > 0) as usize;
            let idf = ((1.0 + N_DOCUMENTS) / (1.0 + df as f64)).ln() + 1.0;
            candidate_vec.push(in_candidate as f64 * idf);
            reference_vec.push(in_reference as f64 * idf);
        }
        l2_normalize(&mut candidate_vec);
        l2_normalize(&mut reference_vec);

        Some(Self {
            vocabulary: vocabulary.into_iter().map(str::to_string).collect(),
            candidate: candidate_vec,
            reference: reference_vec,
        })
    }

    /// True when one of the two documents contributed no terms.
    pub fn has_empty_document(&self) -> bool {
        self.candidate.iter().all(|v| *v == 0.0) || self.reference.iter().all(|v| *v == 0.0)
    }

    pub fn mean_squared_error(&self) -> f64 {
        let sum: f64 = self
            .candidate
            .iter()
            .zip(&self.reference)
            .map(|(c, r)| (c - r).powi(2))
            .sum();
        sum / self.vocabulary.len() as f64
    }

    /// Cosine of the angle between the two vectors; 0.0 if either is zero.
    pub fn cosine_similarity(&self) -> f64 {
        let dot: f64 = self
            .candidate
            .iter()
            .zip(&self.reference)
            .map(|(c, r)| c * r)
            .sum();
        let candidate_norm = self.candidate.iter().map(|v| v * v).sum::<f64>().sqrt();
        let reference_norm = self.reference.iter().map(|v| v * v).sum::<f64>().sqrt();
        if candidate_norm == 0.0 || reference_norm == 0.0 {
            return 0.0;
        }
        dot / (candidate_norm * reference_norm)
    }
}
