//! Tokenization strategies.
//!
//! Space-delimited text is split on whitespace. Text containing Han
//! characters is segmented with jieba, whose dictionary is loaded the first
//! time a [`JiebaSegmenter`] is asked to cut something and shared by every
//! clone of that segmenter afterwards.

use std::sync::Arc;

use jieba_rs::Jieba;
use log::info;
use once_cell::sync::OnceCell;

use crate::script;

/// Splits text into an ordered token sequence.
///
/// Implementations are total: any input, including the empty string,
/// yields a (possibly empty) sequence.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;

    /// True when the strategy finds word boundaries the raw text does not
    /// mark, so word-level scoring must run on the joined tokens.
    fn adds_word_boundaries(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|s| s.to_string()).collect()
    }
}

/// Dictionary-based Chinese word segmentation.
#[derive(Clone, Default)]
pub struct JiebaSegmenter {
    model: Arc<OnceCell<Jieba>>,
}

impl JiebaSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dictionary has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    fn model(&self) -> &Jieba {
        self.model.get_or_init(|| {
            info!("Loading jieba dictionary for Chinese segmentation");
            Jieba::new()
        })
    }
}

impl std::fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiebaSegmenter")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return vec![];
        }
        self.model()
            .cut(text, true)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .map(|word| word.to_string())
            .collect()
    }

    fn adds_word_boundaries(&self) -> bool {
        true
    }
}

/// The strategy chosen for one batch.
#[derive(Debug, Clone)]
pub enum Segmentation {
    Whitespace(WhitespaceSegmenter),
    Dictionary(JiebaSegmenter),
}

impl Segmentation {
    /// Picks dictionary segmentation when any cell holds a Han character,
    /// whitespace splitting otherwise.
    pub fn for_cells<I, S>(cells: I, dictionary: &JiebaSegmenter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if script::has_han(cells) {
            Segmentation::Dictionary(dictionary.clone())
        } else {
            Segmentation::Whitespace(WhitespaceSegmenter)
        }
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Segmentation::Dictionary(_))
    }
}

impl Segmenter for Segmentation {
    fn segment(&self, text: &str) -> Vec<String> {
        match self {
            Segmentation::Whitespace(s) => s.segment(text),
            Segmentation::Dictionary(s) => s.segment(text),
        }
    }

    fn adds_word_boundaries(&self) -> bool {
        self.is_dictionary()
    }
}
