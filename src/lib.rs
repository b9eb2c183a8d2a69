//! Translation quality scores for original/translated text pairs.
//!
//! Every row of a table gets four scores: sentence BLEU, a character-set
//! overlap stand-in for chrF, a TF-IDF distance stand-in for TER, and TF-IDF
//! cosine similarity. Batches containing Chinese are segmented with jieba
//! before the token-based scores run.

pub mod batch;
pub mod bleu;
pub mod chrf;
pub mod config;
pub mod error;
pub mod score;
pub mod script;
pub mod segment;
pub mod semantic;
pub mod table;
pub mod ter;
pub mod tfidf;
pub mod utils;

#[cfg(feature = "python")]
mod python;

pub use batch::{MetricsPipeline, SummaryStats};
pub use config::{Metric, MetricSelection, MetricsConfig, Weights};
pub use error::{MetricsError, Result};
pub use score::{evaluate, RowScores, TextPair};
pub use script::has_han;
pub use segment::{JiebaSegmenter, Segmentation, Segmenter, WhitespaceSegmenter};
pub use table::{ScoredTable, Table};
