use crate::segment::Segmenter;

/// The token sequence the batch's segmenter produced for one text.
pub struct Sequence {
    pub word_vector: Vec<String>,
}

impl Sequence {
    pub fn new(text: &str, segmenter: &dyn Segmenter) -> Self {
        Sequence {
            word_vector: segmenter.segment(text),
        }
    }

    /// Tokens glued together with no separator, for character-level scoring.
    pub fn concatenated(&self) -> String {
        self.word_vector.concat()
    }

    /// Tokens joined with single spaces, so segmented Chinese reaches the
    /// vectorizer as separate words.
    pub fn joined(&self) -> String {
        self.word_vector.join(" ")
    }
}
