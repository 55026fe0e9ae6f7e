//! Configuration for meeting segmentation runs.
//!
//! Every value here is passed explicitly into the component that needs it.
//! Credentials for the embedding provider live in [`EmbeddingConfig`] and are
//! filled in by the caller; nothing is read from the environment in the library.

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for a segmentation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cohesion signal configuration.
    pub signal: SignalConfig,

    /// Hyperdimensional encoder configuration.
    pub hdc: HdcConfig,

    /// Text processing configuration.
    pub text: TextConfig,

    /// Segment pruning configuration.
    pub pruning: PruningConfig,

    /// Evaluation configuration.
    pub evaluation: EvaluationConfig,

    /// Embedding provider configuration.
    pub embeddings: EmbeddingConfig,
}

impl Config {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SegmentError::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that would otherwise make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        self.signal.validate()?;
        self.hdc.validate()
    }
}

/// Default sliding window size W.
pub const DEFAULT_WINDOW: usize = 2;

/// Default minimum segment length L.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 10;

/// Default hypervector dimensionality.
pub const DEFAULT_HDC_DIMENSION: usize = 10_000;

/// Smallest hypervector dimension that keeps bundles of a meeting window distinguishable.
pub const MIN_HDC_DIMENSION: usize = 1000;

/// How the per-gap boundary strength is derived from block dissimilarity.
///
/// Both variants follow the same sign convention: higher means a stronger
/// topic shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthMetric {
    /// `1 - cosine(left, right)` taken directly.
    #[default]
    Distance,
    /// TextTiling depth of the cohesion curve `1 - distance` at each gap.
    Depth,
}

/// Cohesion signal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Number of utterances on each side of a gap.
    /// Default: 2.
    pub window: usize,

    /// Strength metric.
    /// Default: distance.
    pub metric: StrengthMetric,

    /// Number of moving-average passes over the signal.
    /// Default: 0 (raw signal).
    pub smoothing_passes: usize,

    /// Half-width of the moving-average window.
    /// Default: 1.
    pub smoothing_window: usize,
}

impl SignalConfig {
    /// Rejects an empty window.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(SegmentError::Config("signal window must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            metric: StrengthMetric::Distance,
            smoothing_passes: 0,
            smoothing_window: 1,
        }
    }
}

/// Hyperdimensional encoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HdcConfig {
    /// Hypervector dimensionality.
    /// Default: 10,000.
    pub dimension: usize,

    /// Tokens per n-gram.
    /// Default: 3.
    pub ngram_size: usize,

    /// Seed for the item memory.
    /// Default: 42.
    pub seed: u64,
}

impl HdcConfig {
    /// Rejects dimensions below [`MIN_HDC_DIMENSION`] and empty n-grams.
    pub fn validate(&self) -> Result<()> {
        if self.dimension < MIN_HDC_DIMENSION {
            return Err(SegmentError::Config(format!(
                "hypervector dimension {} is below the minimum of {}",
                self.dimension, MIN_HDC_DIMENSION
            )));
        }
        if self.ngram_size == 0 {
            return Err(SegmentError::Config("n-gram size must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for HdcConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_HDC_DIMENSION,
            ngram_size: 3,
            seed: 42,
        }
    }
}

/// Text processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Convert all text to lowercase.
    /// Default: true.
    pub lowercase: bool,

    /// Minimum token length to include.
    /// Default: 1.
    pub min_token_length: usize,

    /// Maximum token length to include.
    /// Default: 50.
    pub max_token_length: usize,

    /// Remove punctuation from tokens.
    /// Default: true.
    pub remove_punctuation: bool,

    /// Remove numeric tokens.
    /// Default: false.
    pub remove_numbers: bool,

    /// Apply Unicode normalization (NFC).
    /// Default: true.
    pub unicode_normalize: bool,

    /// Drop spoken fillers ("um", "uh", "mm-hmm", ...).
    /// Default: true.
    pub remove_fillers: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_length: 1,
            max_token_length: 50,
            remove_punctuation: true,
            remove_numbers: false,
            unicode_normalize: true,
            remove_fillers: true,
        }
    }
}

/// Segment pruning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PruningConfig {
    /// Minimum utterances per segment, applied to reference and prediction alike.
    /// Default: 10.
    pub min_segment_length: usize,
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
        }
    }
}

/// Evaluation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Boundary matching tolerance in utterances.
    /// Default: None (half the mean reference segment length).
    pub tolerance: Option<usize>,
}

/// Embedding provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embeddings endpoint URL.
    /// Default: OpenAI embeddings API.
    pub endpoint: String,

    /// Model name sent with each request.
    /// Default: "text-embedding-3-small".
    pub model: String,

    /// Bearer token. Never serialized.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    /// Default: 60.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
