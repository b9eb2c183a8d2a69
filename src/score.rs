use crate::bleu::bleu_score;
use crate::chrf::chrf_score;
use crate::config::{Metric, Weights};
use crate::segment::{Segmentation, Segmenter};
use crate::semantic::semantic_similarity;
use crate::ter::ter_score;
use crate::utils::Sequence;
use serde::{Deserialize, Serialize};

/// A candidate (translated) text and the reference (original) it is scored
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPair {
    pub candidate: String,
    pub reference: String,
}

impl TextPair {
    pub fn new(candidate: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            reference: reference.into(),
        }
    }
}

/// The four scores of one text pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RowScores {
    #[serde(rename = "BLEU")]
    pub ngram_precision: f64,
    #[serde(rename = "CHRF")]
    pub char_overlap: f64,
    #[serde(rename = "TER")]
    pub edit_proxy: f64,
    #[serde(rename = "SemanticSim")]
    pub semantic_sim: f64,
}

impl RowScores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::NGramPrecision => self.ngram_precision,
            Metric::CharOverlap => self.char_overlap,
            Metric::EditProxy => self.edit_proxy,
            Metric::SemanticSim => self.semantic_sim,
        }
    }

    /// Scores in output column order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

/// One text pair, segmented once and shared by the token-based metrics.
pub struct PerformanceContext<'a> {
    pair: &'a TextPair,
    candidate: Sequence,
    reference: Sequence,
    segmented_words: bool,
}

impl<'a> PerformanceContext<'a> {
    pub fn new(pair: &'a TextPair, segmenter: &dyn Segmenter) -> Self {
        PerformanceContext {
            pair,
            candidate: Sequence::new(&pair.candidate, segmenter),
            reference: Sequence::new(&pair.reference, segmenter),
            segmented_words: segmenter.adds_word_boundaries(),
        }
    }

    // Unspaced Chinese would otherwise reach the vectorizer as one term per
    // sentence.
    fn semantic_sim(&self) -> f64 {
        if self.segmented_words {
            semantic_similarity(&self.reference.joined(), &self.candidate.joined())
        } else {
            semantic_similarity(&self.pair.reference, &self.pair.candidate)
        }
    }

    pub fn get_scores(&self, weights: &Weights) -> RowScores {
        RowScores {
            ngram_precision: bleu_score(&self.candidate, &self.reference, weights),
            char_overlap: chrf_score(&self.candidate, &self.reference),
            edit_proxy: ter_score(&self.candidate, &self.reference),
            semantic_sim: self.semantic_sim(),
        }
    }
}

/// Computes every metric for one pair, whatever the caller later selects.
pub fn evaluate(pair: &TextPair, segmenter: &dyn Segmenter, weights: &Weights) -> RowScores {
    PerformanceContext::new(pair, segmenter).get_scores(weights)
}

/// Scores `pairs` on tokio's blocking pool, `workers` contiguous chunks at a
/// time. Output order matches input order.
pub async fn score_pairs_concurrently(
    pairs: Vec<TextPair>,
    segmentation: Segmentation,
    weights: Weights,
    workers: usize,
) -> Vec<RowScores> {
    if pairs.is_empty() {
        return vec![];
    }
    let chunk_size = pairs.len().div_ceil(workers.max(1));

    let mut chunks: Vec<Vec<TextPair>> = vec![];
    let mut remaining = pairs.into_iter();
    loop {
        let chunk: Vec<TextPair> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    let tasks = chunks.into_iter().map(|chunk| {
        let segmentation = segmentation.clone();
        let weights = weights.clone();
        tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .map(|pair| evaluate(pair, &segmentation, &weights))
                .collect::<Vec<_>>()
        })
    });

    futures::future::join_all(tasks)
        .await
        .into_iter()
        .flat_map(|result| match result {
            Ok(scores) => scores,
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{JiebaSegmenter, WhitespaceSegmenter};
    use tokio::runtime::Runtime;

    fn score(candidate: &str, reference: &str) -> RowScores {
        evaluate(
            &TextPair::new(candidate, reference),
            &WhitespaceSegmenter,
            &Weights::default(),
        )
    }

    fn close_enough(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_identical_pair() {
        let s = score("the cat sat on the mat", "the cat sat on the mat");
        assert!(close_enough(s.ngram_precision, 1.0, 1e-9));
        assert_eq!(s.char_overlap, 1.0);
        assert_eq!(s.edit_proxy, 0.0);
        assert!(close_enough(s.semantic_sim, 1.0, 1e-9));
    }

    #[test]
    fn test_empty_reference() {
        let s = score("the cat sat", "");
        assert_eq!(s.ngram_precision, 0.0);
        assert_eq!(s.char_overlap, 0.0);
        assert_eq!(s.edit_proxy, 0.0);
        assert_eq!(s.semantic_sim, 0.0);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(score("", ""), RowScores::default());
    }

    #[test]
    fn test_shorter_candidate() {
        let s = score("the cat sat", "the cat sat on the mat");
        assert!(s.ngram_precision < 1.0);
        assert!(s.char_overlap > 0.0);
        assert!(s.semantic_sim > 0.0);
        assert!(s.edit_proxy > 0.0);
    }

    #[test]
    fn test_chinese_pair_with_dictionary() {
        let jieba = JiebaSegmenter::new();
        let pair = TextPair::new("我爱自然语言处理", "我爱自然语言处理");
        let s = evaluate(&pair, &jieba, &Weights::default());
        assert!(close_enough(s.ngram_precision, 1.0, 1e-9));
        assert_eq!(s.char_overlap, 1.0);
        assert_eq!(s.edit_proxy, 0.0);
        assert!(close_enough(s.semantic_sim, 1.0, 1e-9));
    }

    #[test]
    fn test_chinese_semantic_sim_sees_shared_words() {
        let jieba = JiebaSegmenter::new();
        let pair = TextPair::new("我爱机器学习", "我爱自然语言处理");
        let s = evaluate(&pair, &jieba, &Weights::default());
        assert!(s.semantic_sim > 0.0 && s.semantic_sim < 1.0, "got {}", s.semantic_sim);
        // unsegmented, each sentence is a single distinct term
        assert_eq!(semantic_similarity(&pair.reference, &pair.candidate), 0.0);
    }

    #[test]
    fn test_latin_semantic_sim_uses_raw_text() {
        let pair = TextPair::new("The cat, sat", "the cat sat on the mat!");
        let s = evaluate(&pair, &WhitespaceSegmenter, &Weights::default());
        let raw = semantic_similarity(&pair.reference, &pair.candidate);
        assert!(close_enough(s.semantic_sim, raw, 1e-12));
    }

    #[test]
    fn test_row_scores_iter_and_get() {
        let s = score("the cat sat", "the cat sat on the mat");
        let collected: Vec<(Metric, f64)> = s.iter().collect();
        assert_eq!(collected.len(), 4);
        assert_eq!(collected[0], (Metric::NGramPrecision, s.ngram_precision));
        assert_eq!(s.get(Metric::SemanticSim), s.semantic_sim);
    }

    #[test]
    fn test_row_scores_serialise_with_column_names() {
        let json = serde_json::to_value(RowScores::default()).unwrap();
        for metric in Metric::ALL {
            assert!(json.get(metric.column_name()).is_some());
        }
    }

    #[test]
    fn test_concurrent_scoring_preserves_order() {
        let pairs: Vec<TextPair> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    TextPair::new("the cat sat", "the cat sat")
                } else {
                    TextPair::new("", "the cat sat")
                }
            })
            .collect();
        let expected: Vec<RowScores> = pairs
            .iter()
            .map(|p| evaluate(p, &WhitespaceSegmenter, &Weights::default()))
            .collect();

        let rt = Runtime::new().expect("Failed to create async runtime");
        let scores = rt.block_on(score_pairs_concurrently(
            pairs,
            Segmentation::Whitespace(WhitespaceSegmenter),
            Weights::default(),
            3,
        ));

        assert_eq!(scores, expected);
    }

    #[test]
    fn test_concurrent_scoring_empty_batch() {
        let rt = Runtime::new().expect("Failed to create async runtime");
        let scores = rt.block_on(score_pairs_concurrently(
            vec![],
            Segmentation::Whitespace(WhitespaceSegmenter),
            Weights::default(),
            0,
        ));
        assert!(scores.is_empty());
    }
}
