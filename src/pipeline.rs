//! One meeting, end to end.
//!
//! Validates the meeting, prunes the reference, segments with the requested
//! (or reference-derived) K, prunes the prediction with the same minimum
//! length and scores it.

use crate::config::Config;
use crate::embedding::EmbeddingSource;
use crate::error::{Result, SegmentError};
use crate::evaluation::{evaluate, EvaluationInput, EvaluationReport};
use crate::meeting::Meeting;
use crate::segmentation::{
    prune, Algorithm, EmbeddingCohesion, HyperdimensionalCohesion, Segmentation, Segmenter,
};
use log::{debug, info};
use std::time::Instant;

/// Builds a segmenter for `algorithm` from configuration.
///
/// `source` is required for [`Algorithm::Embedding`] and ignored otherwise.
/// `seed` drives the random baseline. The configuration is validated first.
pub fn build_segmenter(
    algorithm: Algorithm,
    config: &Config,
    seed: u64,
    source: Option<Box<dyn EmbeddingSource>>,
) -> Result<Segmenter> {
    config.validate()?;
    let segmenter = match algorithm {
        Algorithm::Embedding => {
            let source = source.ok_or_else(|| {
                SegmentError::Config("the embedding algorithm needs an embedding source".to_string())
            })?;
            Segmenter::Embedding(EmbeddingCohesion::new(source, config.signal.clone()))
        }
        Algorithm::Hyperdimensional => Segmenter::Hyperdimensional(HyperdimensionalCohesion::new(
            config.hdc.clone(),
            config.text.clone(),
            config.signal.clone(),
        )),
        Algorithm::Random => Segmenter::Random { seed },
        Algorithm::Equidistant => Segmenter::Equidistant,
    };
    Ok(segmenter)
}

/// Segments and scores one meeting.
///
/// When `k` is `None` the segment count of the pruned reference is used.
pub fn evaluate_meeting(
    meeting: &Meeting,
    segmenter: &Segmenter,
    k: Option<usize>,
    config: &Config,
) -> Result<EvaluationReport> {
    let start = Instant::now();
    config.validate()?;
    meeting.validate()?;

    let n = meeting.len();
    let min_len = config.pruning.min_segment_length;

    let original_reference = Segmentation::new(meeting.reference.clone(), n)?;
    let pruned_reference = prune(&original_reference, min_len);
    debug!(
        "{}: reference {:?} pruned to {:?}",
        meeting.id,
        original_reference.boundaries(),
        pruned_reference.boundaries()
    );

    let k = k.unwrap_or_else(|| pruned_reference.num_segments());
    let predicted = segmenter.segment(meeting, k)?;
    let pruned_predicted = prune(&predicted, min_len);

    let report = evaluate(EvaluationInput {
        meeting,
        algorithm: segmenter.algorithm(),
        k,
        min_segment_length: min_len,
        original_reference: &original_reference,
        pruned_reference: &pruned_reference,
        predicted: &predicted,
        pruned_predicted: &pruned_predicted,
        tolerance: config.evaluation.tolerance,
    })?;

    info!(
        "{}: {} K={} F1={:.3} WindowDiff={:.4} in {:?}",
        meeting.id,
        report.algorithm,
        k,
        report.f1,
        report.window_diff,
        start.elapsed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::Utterance;

    fn meeting(n: usize, reference: Vec<usize>) -> Meeting {
        let utterances = (0..n).map(|i| Utterance::new(i, "A", format!("turn {}", i))).collect();
        Meeting::new("IS1009d", utterances, reference)
    }

    #[test]
    fn test_reference_is_pruned_before_scoring() {
        let m = meeting(30, vec![8, 19]);
        let segmenter = Segmenter::Equidistant;
        let report = evaluate_meeting(&m, &segmenter, None, &Config::default()).unwrap();

        assert_eq!(report.original_reference, vec![8, 19]);
        assert_eq!(report.pruned_reference, vec![19]);
        assert_eq!(report.k, 2);
        assert_eq!(report.predicted, vec![15]);
        assert_eq!(report.pruned_predicted, vec![15]);
    }

    #[test]
    fn test_explicit_k() {
        let m = meeting(40, vec![20]);
        let report = evaluate_meeting(&m, &Segmenter::Equidistant, Some(4), &Config::default()).unwrap();
        assert_eq!(report.k, 4);
        assert_eq!(report.predicted, vec![10, 20, 30]);
        assert!((report.precision - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.recall, 1.0);
        assert!((report.f1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let config = Config::default();
        assert!(matches!(
            evaluate_meeting(&meeting(0, vec![]), &Segmenter::Equidistant, None, &config),
            Err(SegmentError::EmptyMeeting(_))
        ));
        assert!(matches!(
            evaluate_meeting(&meeting(10, vec![12]), &Segmenter::Equidistant, None, &config),
            Err(SegmentError::InvalidReference(_))
        ));
        assert!(matches!(
            evaluate_meeting(&meeting(10, vec![]), &Segmenter::Equidistant, Some(11), &config),
            Err(SegmentError::InvalidK { k: 11, n: 10 })
        ));
    }

    #[test]
    fn test_build_segmenter() {
        let config = Config::default();
        assert!(matches!(
            build_segmenter(Algorithm::Embedding, &config, 0, None),
            Err(SegmentError::Config(_))
        ));
        let random = build_segmenter(Algorithm::Random, &config, 9, None).unwrap();
        assert!(matches!(random, Segmenter::Random { seed: 9 }));
        let hdc = build_segmenter(Algorithm::Hyperdimensional, &config, 0, None).unwrap();
        assert_eq!(hdc.algorithm(), Algorithm::Hyperdimensional);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut tiny = Config::default();
        tiny.hdc.dimension = 8;
        assert!(matches!(
            build_segmenter(Algorithm::Hyperdimensional, &tiny, 0, None),
            Err(SegmentError::Config(_))
        ));

        let mut no_window = Config::default();
        no_window.signal.window = 0;
        assert!(matches!(
            build_segmenter(Algorithm::Equidistant, &no_window, 0, None),
            Err(SegmentError::Config(_))
        ));

        // A segmenter built earlier cannot bypass validation at evaluation time
        let segmenter = build_segmenter(Algorithm::Equidistant, &Config::default(), 0, None).unwrap();
        assert!(matches!(
            evaluate_meeting(&meeting(30, vec![15]), &segmenter, None, &no_window),
            Err(SegmentError::Config(_))
        ));
    }
}
