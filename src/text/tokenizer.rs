//! Tokenization of utterance text.

use crate::config::TextConfig;
use crate::text::Normalizer;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenizer that splits utterances into normalized word tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    normalizer: Normalizer,
}

impl Tokenizer {
    /// Creates a new tokenizer with the given configuration.
    pub fn new(config: TextConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config),
        }
    }

    /// Splits text on Unicode word boundaries and keeps the normalized words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter_map(|word| self.normalizer.normalize_token(word))
            .collect()
    }

    /// Splits a token sequence into contiguous n-grams.
    ///
    /// A sequence shorter than `n` (but not empty) yields itself as a single
    /// shorter n-gram so that short utterances still carry content.
    pub fn ngrams<'a>(tokens: &'a [String], n: usize) -> Vec<&'a [String]> {
        if tokens.is_empty() || n == 0 {
            return Vec::new();
        }
        if tokens.len() < n {
            return vec![tokens];
        }
        tokens.windows(n).collect()
    }
}
