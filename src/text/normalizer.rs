//! Token normalization for transcribed speech.

use crate::config::TextConfig;
use unicode_normalization::UnicodeNormalization;

/// Disfluencies that carry no topical content in meeting transcripts.
const FILLER_WORDS: &[&str] = &[
    "uh", "um", "uhm", "hmm", "mm", "mmm", "mhm", "mmhmm", "uhhuh", "ah", "eh", "er", "erm", "oh",
];

/// Token normalizer that applies the configured transformations.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: TextConfig,
}

impl Normalizer {
    /// Creates a new normalizer with the given configuration.
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Normalizes a single token.
    ///
    /// Returns `None` if the token should be filtered out.
    pub fn normalize_token(&self, token: &str) -> Option<String> {
        let mut result = if self.config.unicode_normalize {
            token.nfc().collect::<String>()
        } else {
            token.to_string()
        };

        if self.config.lowercase {
            result = result.to_lowercase();
        }

        if self.config.remove_punctuation {
            result = result.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        }

        if result.is_empty() {
            return None;
        }

        if self.config.remove_numbers && result.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        if self.config.remove_fillers && is_filler(&result) {
            return None;
        }

        let chars = result.chars().count();
        if chars < self.config.min_token_length || chars > self.config.max_token_length {
            return None;
        }

        Some(result)
    }
}

fn is_filler(token: &str) -> bool {
    FILLER_WORDS.contains(&token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(TextConfig::default())
    }

    #[test]
    fn test_lowercase() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize_token("REMOTE"), Some("remote".to_string()));
    }

    #[test]
    fn test_remove_punctuation() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize_token("button,"), Some("button".to_string()));
        assert_eq!(normalizer.normalize_token("okay?"), Some("okay".to_string()));
        assert_eq!(normalizer.normalize_token("..."), None);
    }

    #[test]
    fn test_fillers_dropped() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize_token("Um,"), None);
        assert_eq!(normalizer.normalize_token("uh"), None);
        assert_eq!(normalizer.normalize_token("Mm-hmm."), None);

        let mut config = TextConfig::default();
        config.remove_fillers = false;
        let keep = Normalizer::new(config);
        assert_eq!(keep.normalize_token("um"), Some("um".to_string()));
    }

    #[test]
    fn test_min_length_counts_chars() {
        let mut config = TextConfig::default();
        config.min_token_length = 2;
        let normalizer = Normalizer::new(config);
        assert_eq!(normalizer.normalize_token("a"), None);
        assert_eq!(normalizer.normalize_token("é"), None);
        assert_eq!(normalizer.normalize_token("ab"), Some("ab".to_string()));
    }

    #[test]
    fn test_unicode_composition() {
        let normalizer = normalizer();
        let decomposed = "cafe\u{301}";
        assert_eq!(normalizer.normalize_token(decomposed), Some("café".to_string()));
    }

    #[test]
    fn test_remove_numbers() {
        let mut config = TextConfig::default();
        config.remove_numbers = true;
        let normalizer = Normalizer::new(config);
        assert_eq!(normalizer.normalize_token("25"), None);
        assert_eq!(normalizer.normalize_token("mp3"), Some("mp3".to_string()));
    }
}
