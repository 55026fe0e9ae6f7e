//! Scoring predicted segmentations against the reference.
//!
//! Both sides are pruned to the same minimum segment length before they get
//! here. Boundaries are matched one-to-one within a tolerance window and
//! reported as precision, recall and F1; WindowDiff is reported alongside.

mod metrics;
mod report;

pub use metrics::{
    default_tolerance, match_boundaries, window_diff, window_diff_k, BoundaryScore,
};
pub use report::{evaluate, render_transcript, EvaluationInput, EvaluationReport};
