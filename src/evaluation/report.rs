//! Structured evaluation results and transcript rendering.

use crate::error::{Result, SegmentError};
use crate::evaluation::metrics::{default_tolerance, match_boundaries, window_diff, window_diff_k};
use crate::meeting::Meeting;
use crate::segmentation::{Algorithm, Segmentation};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Everything a renderer or plotter needs about one evaluated meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Meeting identifier.
    pub meeting_id: String,
    /// Algorithm that produced the prediction.
    pub algorithm: Algorithm,
    /// Number of utterances.
    pub num_utterances: usize,
    /// Requested segment count.
    pub k: usize,
    /// Minimum segment length used for pruning.
    pub min_segment_length: usize,
    /// Reference boundaries as annotated.
    pub original_reference: Vec<usize>,
    /// Reference boundaries after pruning.
    pub pruned_reference: Vec<usize>,
    /// Predicted boundaries as selected.
    pub predicted: Vec<usize>,
    /// Predicted boundaries after pruning.
    pub pruned_predicted: Vec<usize>,
    /// Matching tolerance in utterances.
    pub tolerance: usize,
    /// Matched `(predicted, reference)` pairs.
    pub matches: Vec<(usize, usize)>,
    /// Boundary precision.
    pub precision: f64,
    /// Boundary recall.
    pub recall: f64,
    /// Boundary F1; the agreement score (1.0 is a perfect match).
    pub f1: f64,
    /// WindowDiff window size.
    pub window_diff_k: usize,
    /// WindowDiff error (0.0 is a perfect match).
    pub window_diff: f64,
}

/// Inputs to [`evaluate`], all over the same meeting.
pub struct EvaluationInput<'a> {
    /// The meeting being evaluated.
    pub meeting: &'a Meeting,
    /// Algorithm that produced the prediction.
    pub algorithm: Algorithm,
    /// Requested segment count.
    pub k: usize,
    /// Minimum segment length used for pruning.
    pub min_segment_length: usize,
    /// Reference before pruning.
    pub original_reference: &'a Segmentation,
    /// Reference after pruning.
    pub pruned_reference: &'a Segmentation,
    /// Prediction before pruning.
    pub predicted: &'a Segmentation,
    /// Prediction after pruning.
    pub pruned_predicted: &'a Segmentation,
    /// Matching tolerance; `None` derives it from the pruned reference.
    pub tolerance: Option<usize>,
}

/// Checks that a segmentation spans exactly the meeting's utterances.
fn check_covers(meeting: &Meeting, segmentation: &Segmentation) -> Result<()> {
    if segmentation.len() != meeting.len() {
        return Err(SegmentError::LengthMismatch {
            expected: meeting.len(),
            found: segmentation.len(),
        });
    }
    Ok(())
}

/// Compares pruned prediction with pruned reference.
///
/// All four segmentations must cover the meeting's utterances, otherwise
/// [`SegmentError::LengthMismatch`] is returned and nothing is scored.
pub fn evaluate(input: EvaluationInput<'_>) -> Result<EvaluationReport> {
    for segmentation in [
        input.original_reference,
        input.pruned_reference,
        input.predicted,
        input.pruned_predicted,
    ] {
        check_covers(input.meeting, segmentation)?;
    }

    let n = input.meeting.len();
    let reference = input.pruned_reference.boundaries();
    let predicted = input.pruned_predicted.boundaries();

    let tolerance = input
        .tolerance
        .unwrap_or_else(|| default_tolerance(n, reference.len()));
    let score = match_boundaries(predicted, reference, tolerance);

    let wd_k = window_diff_k(n, reference.len());
    let wd = window_diff(
        &input.pruned_reference.transitions(),
        &input.pruned_predicted.transitions(),
        wd_k,
    )?;

    Ok(EvaluationReport {
        meeting_id: input.meeting.id.clone(),
        algorithm: input.algorithm,
        num_utterances: n,
        k: input.k,
        min_segment_length: input.min_segment_length,
        original_reference: input.original_reference.boundaries().to_vec(),
        pruned_reference: reference.to_vec(),
        predicted: input.predicted.boundaries().to_vec(),
        pruned_predicted: predicted.to_vec(),
        tolerance,
        matches: score.matches,
        precision: score.precision,
        recall: score.recall,
        f1: score.f1,
        window_diff_k: wd_k,
        window_diff: wd,
    })
}

impl EvaluationReport {
    /// Human-readable summary lines.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Meeting:            {}", self.meeting_id);
        let _ = writeln!(out, "Algorithm:          {}", self.algorithm);
        let _ = writeln!(out, "Utterances:         {}", self.num_utterances);
        let _ = writeln!(out, "K:                  {}", self.k);
        let _ = writeln!(out, "Reference:          {:?}", self.original_reference);
        let _ = writeln!(
            out,
            "Pruned reference:   {:?} (min length {})",
            self.pruned_reference, self.min_segment_length
        );
        let _ = writeln!(out, "Predicted:          {:?}", self.predicted);
        let _ = writeln!(out, "Pruned predicted:   {:?}", self.pruned_predicted);
        let _ = writeln!(
            out,
            "Boundary P/R/F1:    {:.3} / {:.3} / {:.3} (tolerance {})",
            self.precision, self.recall, self.f1, self.tolerance
        );
        let _ = write!(out, "WindowDiff:         {:.4} (k={})", self.window_diff, self.window_diff_k);
        out
    }
}

/// Renders a meeting transcript with a separator before every segment.
pub fn render_transcript(meeting: &Meeting, segmentation: &Segmentation) -> Result<String> {
    check_covers(meeting, segmentation)?;
    let timed = meeting.is_timed();
    let mut out = String::new();

    for (i, range) in segmentation.segments().into_iter().enumerate() {
        let _ = writeln!(
            out,
            "==== Segment {} (utterances {}-{}) ====",
            i + 1,
            range.start,
            range.end.saturating_sub(1)
        );
        for utterance in &meeting.utterances[range] {
            let _ = writeln!(out, "{}", utterance.composite(timed));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::Utterance;

    fn meeting(n: usize) -> Meeting {
        let utterances = (0..n).map(|i| Utterance::new(i, "A", format!("u{}", i))).collect();
        Meeting::new("ES2004c", utterances, vec![])
    }

    #[test]
    fn test_perfect_prediction() {
        let m = meeting(40);
        let seg = Segmentation::new(vec![12, 27], 40).unwrap();
        let report = evaluate(EvaluationInput {
            meeting: &m,
            algorithm: Algorithm::Equidistant,
            k: 3,
            min_segment_length: 10,
            original_reference: &seg,
            pruned_reference: &seg,
            predicted: &seg,
            pruned_predicted: &seg,
            tolerance: None,
        })
        .unwrap();

        assert_eq!(report.f1, 1.0);
        assert_eq!(report.window_diff, 0.0);
        assert_eq!(report.tolerance, 7);
        assert!(report.summary().contains("1.000 / 1.000 / 1.000"));
    }

    #[test]
    fn test_report_serializes() {
        let m = meeting(20);
        let reference = Segmentation::new(vec![10], 20).unwrap();
        let predicted = Segmentation::new(vec![4], 20).unwrap();
        let report = evaluate(EvaluationInput {
            meeting: &m,
            algorithm: Algorithm::Random,
            k: 2,
            min_segment_length: 1,
            original_reference: &reference,
            pruned_reference: &reference,
            predicted: &predicted,
            pruned_predicted: &predicted,
            tolerance: Some(2),
        })
        .unwrap();

        assert_eq!(report.f1, 0.0);
        assert!(report.window_diff > 0.0);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"algorithm\":\"random\""));
        let back: EvaluationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pruned_predicted, vec![4]);
        assert_eq!(back.window_diff_k, report.window_diff_k);
    }

    #[test]
    fn test_render_transcript() {
        let m = meeting(4);
        let seg = Segmentation::new(vec![1, 3], 4).unwrap();
        let text = render_transcript(&m, &seg).unwrap();
        let expected = "==== Segment 1 (utterances 0-0) ====\n-u0\n\
                        ==== Segment 2 (utterances 1-2) ====\n-u1\n-u2\n\
                        ==== Segment 3 (utterances 3-3) ====\n-u3\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_segmentation_over_other_meeting_rejected() {
        let m = meeting(40);
        let reference = Segmentation::new(vec![20], 40).unwrap();
        let short = Segmentation::new(vec![1, 2], 4).unwrap();

        let result = evaluate(EvaluationInput {
            meeting: &m,
            algorithm: Algorithm::Random,
            k: 3,
            min_segment_length: 1,
            original_reference: &reference,
            pruned_reference: &reference,
            predicted: &short,
            pruned_predicted: &short,
            tolerance: None,
        });
        assert!(matches!(
            result,
            Err(SegmentError::LengthMismatch { expected: 40, found: 4 })
        ));

        let long = Segmentation::new(vec![20], 60).unwrap();
        assert!(matches!(
            render_transcript(&m, &long),
            Err(SegmentError::LengthMismatch { expected: 40, found: 60 })
        ));
    }
}
