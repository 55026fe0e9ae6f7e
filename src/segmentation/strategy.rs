//! Interchangeable meeting segmenters.
//!
//! Both content-based algorithms reduce a meeting to a boundary strength
//! signal ([`SignalStrategy`]) and then share rank-based selection. The
//! baselines skip the signal and place boundaries directly.

use crate::config::{HdcConfig, SignalConfig, TextConfig};
use crate::embedding::{embed_all, EmbeddingSource};
use crate::error::Result;
use crate::hdc::HyperEncoder;
use crate::meeting::Meeting;
use crate::segmentation::baseline::{equidistant_segmentation, random_segmentation};
use crate::segmentation::selector::select_boundaries;
use crate::segmentation::{Segmentation, SignalBuilder};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Turns a meeting into one boundary strength per gap (higher = stronger shift).
pub trait SignalStrategy {
    /// Computes the signal; element `j` belongs to gap `j + 1`.
    fn boundary_strength(&self, meeting: &Meeting) -> Result<Vec<f64>>;
}

/// Cohesion over dense embeddings fetched from an [`EmbeddingSource`].
pub struct EmbeddingCohesion {
    source: Box<dyn EmbeddingSource>,
    signal: SignalBuilder,
}

impl EmbeddingCohesion {
    /// Create a strategy over the given provider.
    pub fn new(source: Box<dyn EmbeddingSource>, signal: SignalConfig) -> Self {
        Self {
            source,
            signal: SignalBuilder::new(signal),
        }
    }
}

impl SignalStrategy for EmbeddingCohesion {
    fn boundary_strength(&self, meeting: &Meeting) -> Result<Vec<f64>> {
        let vectors = embed_all(&self.source, &meeting.texts())?;
        self.signal.build(&vectors)
    }
}

/// Cohesion over hyperdimensional n-gram encodings.
///
/// A fresh item memory is built for every meeting; with a fixed seed the
/// token vectors are identical across meetings anyway.
pub struct HyperdimensionalCohesion {
    hdc: HdcConfig,
    text: TextConfig,
    signal: SignalBuilder,
}

impl HyperdimensionalCohesion {
    /// Create a strategy from configuration.
    pub fn new(hdc: HdcConfig, text: TextConfig, signal: SignalConfig) -> Self {
        Self {
            hdc,
            text,
            signal: SignalBuilder::new(signal),
        }
    }
}

impl SignalStrategy for HyperdimensionalCohesion {
    fn boundary_strength(&self, meeting: &Meeting) -> Result<Vec<f64>> {
        let mut encoder = HyperEncoder::new(&self.hdc, self.text.clone())?;
        let vectors = encoder.encode_all(&meeting.texts());
        self.signal.build(&vectors)
    }
}

/// Segmentation algorithm names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Dense embedding cohesion.
    Embedding,
    /// Hyperdimensional cohesion.
    Hyperdimensional,
    /// Uniformly random boundaries.
    Random,
    /// Evenly spaced boundaries.
    Equidistant,
}

impl Algorithm {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Embedding => "embedding",
            Algorithm::Hyperdimensional => "hyperdimensional",
            Algorithm::Random => "random",
            Algorithm::Equidistant => "equidistant",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "embedding" | "bertseg" => Ok(Algorithm::Embedding),
            "hyperdimensional" | "hdc" | "hyperseg" => Ok(Algorithm::Hyperdimensional),
            "random" => Ok(Algorithm::Random),
            "equidistant" | "equi" => Ok(Algorithm::Equidistant),
            other => Err(format!("unknown algorithm: {}", other)),
        }
    }
}

/// A configured segmenter.
pub enum Segmenter {
    /// Dense embedding cohesion with rank selection.
    Embedding(EmbeddingCohesion),
    /// Hyperdimensional cohesion with rank selection.
    Hyperdimensional(HyperdimensionalCohesion),
    /// Random baseline with an explicit seed.
    Random {
        /// Seed of the boundary draw.
        seed: u64,
    },
    /// Equidistant baseline.
    Equidistant,
}

impl Segmenter {
    /// Which algorithm this is.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Segmenter::Embedding(_) => Algorithm::Embedding,
            Segmenter::Hyperdimensional(_) => Algorithm::Hyperdimensional,
            Segmenter::Random { .. } => Algorithm::Random,
            Segmenter::Equidistant => Algorithm::Equidistant,
        }
    }

    /// Segments a meeting into exactly `k` segments.
    pub fn segment(&self, meeting: &Meeting, k: usize) -> Result<Segmentation> {
        let n = meeting.len();
        let segmentation = match self {
            Segmenter::Embedding(strategy) => select_boundaries(&strategy.boundary_strength(meeting)?, k)?,
            Segmenter::Hyperdimensional(strategy) => {
                select_boundaries(&strategy.boundary_strength(meeting)?, k)?
            }
            Segmenter::Random { seed } => random_segmentation(n, k, *seed)?,
            Segmenter::Equidistant => equidistant_segmentation(n, k)?,
        };

        info!(
            "{}: {} segmented into {} segments",
            self.algorithm(),
            meeting.id,
            segmentation.num_segments()
        );
        Ok(segmentation)
    }
}
