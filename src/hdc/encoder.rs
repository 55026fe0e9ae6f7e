//! Item memory and n-gram encoding of utterances.

use crate::config::{HdcConfig, TextConfig};
use crate::error::Result;
use crate::hdc::Hypervector;
use crate::text::Tokenizer;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// An item memory mapping tokens to fixed random hypervectors.
///
/// Each token's vector is drawn from a ChaCha8 stream keyed by
/// `SHA-256(seed || token)`, so the same token and seed give the same vector
/// in every run and on every platform, regardless of insertion order.
pub struct ItemMemory {
    /// Cached items: token -> hypervector.
    items: HashMap<String, Hypervector>,
    /// Dimension of hypervectors.
    dimension: usize,
    /// Seed mixed into every token key.
    seed: u64,
}

impl ItemMemory {
    /// Create a new item memory.
    pub fn new(dimension: usize, seed: u64) -> Self {
        Self {
            items: HashMap::new(),
            dimension,
            seed,
        }
    }

    /// Get (or generate and cache) the hypervector of a token.
    pub fn get_or_create(&mut self, token: &str) -> &Hypervector {
        let (dimension, seed) = (self.dimension, self.seed);
        self.items
            .entry(token.to_string())
            .or_insert_with(|| Self::generate(token, dimension, seed))
    }

    fn generate(token: &str, dimension: usize, seed: u64) -> Hypervector {
        let mut hasher = Sha256::new();
        hasher.update(seed.to_le_bytes());
        hasher.update(token.as_bytes());
        let key: [u8; 32] = hasher.finalize().into();

        let mut rng = ChaCha8Rng::from_seed(key);
        Hypervector::random(dimension, &mut rng)
    }

    /// Dimension of stored hypervectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of items in memory.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if memory is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Encodes utterances as bundles of bound n-gram hypervectors.
///
/// An n-gram `(t_0, ..., t_{n-1})` is encoded as `ρ^0(t_0) ⊗ ρ^1(t_1) ⊗ ... ⊗ ρ^{n-1}(t_{n-1})`
/// and an utterance as the majority bundle of its n-grams.
pub struct HyperEncoder {
    memory: ItemMemory,
    tokenizer: Tokenizer,
    ngram_size: usize,
}

impl HyperEncoder {
    /// Create an encoder from configuration.
    ///
    /// Fails with [`SegmentError::Config`](crate::SegmentError::Config) when
    /// the dimension or n-gram size is out of range.
    pub fn new(config: &HdcConfig, text: TextConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            memory: ItemMemory::new(config.dimension, config.seed),
            tokenizer: Tokenizer::new(text),
            ngram_size: config.ngram_size,
        })
    }

    /// Encode a single n-gram.
    pub fn encode_ngram(&mut self, ngram: &[String]) -> Hypervector {
        let dimension = self.memory.dimension();
        let mut tokens = ngram.iter();
        let Some(first) = tokens.next() else {
            return Hypervector::zeros(dimension);
        };

        let mut result = self.memory.get_or_create(first).clone();
        for (i, token) in tokens.enumerate() {
            let permuted = self.memory.get_or_create(token).permute(i + 1);
            result = result.bind(&permuted);
        }
        result
    }

    /// Encode a token sequence as the bundle of its n-grams.
    pub fn encode_tokens(&mut self, tokens: &[String]) -> Hypervector {
        let ngrams: Vec<Hypervector> = Tokenizer::ngrams(tokens, self.ngram_size)
            .into_iter()
            .map(|gram| self.encode_ngram(gram))
            .collect();

        let refs: Vec<&Hypervector> = ngrams.iter().collect();
        Hypervector::bundle(&refs, self.memory.dimension())
    }

    /// Encode one utterance.
    pub fn encode_utterance(&mut self, text: &str) -> Hypervector {
        let tokens = self.tokenizer.tokenize(text);
        self.encode_tokens(&tokens)
    }

    /// Encode every utterance of a meeting, in order.
    pub fn encode_all(&mut self, texts: &[String]) -> Vec<Hypervector> {
        let encoded: Vec<Hypervector> = texts.iter().map(|t| self.encode_utterance(t)).collect();
        let empty = encoded.iter().filter(|hv| hv.is_zero()).count();
        debug!(
            "Encoded {} utterances into {}-d hypervectors ({} tokens in memory, {} without content)",
            encoded.len(),
            self.memory.dimension(),
            self.memory.len(),
            empty
        );
        encoded
    }
}
