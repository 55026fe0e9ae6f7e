//! Fixed-K topic segmentation of meetings.
//!
//! The pipeline for the content-based algorithms is:
//!
//! 1. per-utterance vectors (dense embeddings or hypervectors),
//! 2. a sliding-window cohesion signal with one strength per gap
//!    ([`SignalBuilder`]),
//! 3. rank selection of the K−1 strongest gaps ([`select_boundaries`]),
//! 4. minimum-length pruning ([`prune`]) before evaluation.
//!
//! The signal construction follows TextTiling (Hearst, 1997), but boundaries
//! are chosen by rank rather than by a depth threshold so the segment count
//! always matches the requested K.

mod baseline;
mod boundaries;
mod pruner;
mod selector;
mod signal;
mod strategy;

pub use baseline::{equidistant_segmentation, random_segmentation};
pub use boundaries::Segmentation;
pub use pruner::{prune, prune_boundaries};
pub use selector::{check_k, select_boundaries};
pub use signal::{cohesion_signal, depth_scores, smooth, SignalBuilder};
pub use strategy::{
    Algorithm, EmbeddingCohesion, HyperdimensionalCohesion, Segmenter, SignalStrategy,
};
