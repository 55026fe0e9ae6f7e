//! # meetseg - Unsupervised Meeting Topic Segmentation
//!
//! meetseg splits a transcribed multi-party meeting into exactly K
//! contiguous topical segments and scores the result against a
//! human-annotated reference.
//!
//! ## Overview
//!
//! Every utterance is turned into a vector, either a dense embedding from a
//! remote model or a bipolar hypervector built locally from token n-grams.
//! A sliding window compares the blocks on both sides of every gap and
//! yields a topic-shift signal; the K−1 strongest gaps become boundaries.
//! Prediction and reference are both pruned to a minimum segment length
//! before they are compared.
//!
//! ## Key Features
//!
//! - **Embedding cohesion** over any [`EmbeddingSource`]
//! - **Hyperdimensional cohesion** with a seeded item memory ([`hdc`])
//! - **Random and equidistant baselines** for comparison
//! - **Boundary F1 and WindowDiff** evaluation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meetseg::{build_segmenter, evaluate_meeting, Algorithm, Config, MeetingLoader};
//!
//! let config = Config::default();
//! let meeting = MeetingLoader::new().load_one("ami_test.json", 0)?;
//!
//! let segmenter = build_segmenter(Algorithm::Hyperdimensional, &config, 42, None)?;
//! let report = evaluate_meeting(&meeting, &segmenter, None, &config)?;
//! println!("{}", report.summary());
//! ```
//!
//! ## Architecture
//!
//! - [`meeting`] - Meeting data model and JSON loader
//! - [`text`] - Tokenization and normalization for the encoder
//! - [`hdc`] - Hypervectors and the n-gram encoder
//! - [`embedding`] - Dense embedding sources
//! - [`similarity`] - Block aggregation and cosine measures
//! - [`segmentation`] - Signal, selection, pruning and baselines
//! - [`evaluation`] - Boundary matching, WindowDiff and reports
//! - [`pipeline`] - One meeting end to end

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod embedding;
pub mod error;
pub mod evaluation;
pub mod hdc;
pub mod meeting;
pub mod pipeline;
pub mod segmentation;
pub mod similarity;
pub mod text;

// Re-export commonly used types
pub use config::{
    Config, EmbeddingConfig, EvaluationConfig, HdcConfig, PruningConfig, SignalConfig,
    StrengthMetric, TextConfig, DEFAULT_HDC_DIMENSION, DEFAULT_MIN_SEGMENT_LENGTH,
    DEFAULT_WINDOW,
};
pub use embedding::{EmbeddingSource, OpenAiEmbeddings, PrecomputedEmbeddings};
pub use error::{Result, SegmentError};
pub use evaluation::{render_transcript, EvaluationReport};
pub use hdc::{HyperEncoder, Hypervector};
pub use meeting::{Meeting, MeetingLoader, Utterance};
pub use pipeline::{build_segmenter, evaluate_meeting};
pub use segmentation::{Algorithm, Segmentation, Segmenter};
pub use text::{Normalizer, Tokenizer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
