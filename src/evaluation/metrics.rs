//! Boundary agreement metrics.

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};

/// Result of matching predicted against reference boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryScore {
    /// Matched `(predicted, reference)` pairs, ordered by predicted position.
    pub matches: Vec<(usize, usize)>,
    /// Number of predicted boundaries.
    pub predicted: usize,
    /// Number of reference boundaries.
    pub reference: usize,
    /// Matched / predicted.
    pub precision: f64,
    /// Matched / reference.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl BoundaryScore {
    /// Number of matched pairs.
    pub fn matched(&self) -> usize {
        self.matches.len()
    }
}

/// One-to-one nearest matching of boundaries within `tolerance` utterances.
///
/// Candidate pairs are accepted closest first; equal distances are resolved by
/// the smaller position in the pair, so swapping the arguments yields the same
/// pairs with precision and recall exchanged. Unmatched boundaries on either
/// side count as misses. Two empty sets agree perfectly.
pub fn match_boundaries(predicted: &[usize], reference: &[usize], tolerance: usize) -> BoundaryScore {
    let mut candidates: Vec<(usize, usize, usize, usize, usize)> = Vec::new();
    for (pi, &p) in predicted.iter().enumerate() {
        for (ri, &r) in reference.iter().enumerate() {
            let distance = p.abs_diff(r);
            if distance <= tolerance {
                candidates.push((distance, p.min(r), p.max(r), pi, ri));
            }
        }
    }
    candidates.sort_unstable();

    let mut used_predicted = vec![false; predicted.len()];
    let mut used_reference = vec![false; reference.len()];
    let mut matches = Vec::new();
    for (_, _, _, pi, ri) in candidates {
        if !used_predicted[pi] && !used_reference[ri] {
            used_predicted[pi] = true;
            used_reference[ri] = true;
            matches.push((predicted[pi], reference[ri]));
        }
    }
    matches.sort_unstable();

    let matched = matches.len() as f64;
    let precision = ratio(matched, predicted.len(), reference.is_empty());
    let recall = ratio(matched, reference.len(), predicted.is_empty());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    BoundaryScore {
        matches,
        predicted: predicted.len(),
        reference: reference.len(),
        precision,
        recall,
        f1,
    }
}

fn ratio(matched: f64, total: usize, other_empty: bool) -> f64 {
    if total == 0 {
        if other_empty {
            1.0
        } else {
            0.0
        }
    } else {
        matched / total as f64
    }
}

/// Default matching tolerance: half the mean reference segment length, at least 1.
pub fn default_tolerance(len: usize, reference_boundaries: usize) -> usize {
    let segments = reference_boundaries + 1;
    ((len as f64 / (2.0 * segments as f64)).round() as usize).max(1)
}

/// WindowDiff window: half the mean segment length implied by the reference
/// boundary count, clamped to `[1, len]`.
pub fn window_diff_k(len: usize, reference_boundaries: usize) -> usize {
    let k = (len as f64 / (2.0 * reference_boundaries.max(1) as f64)).round() as usize;
    k.clamp(1, len.max(1))
}

/// WindowDiff (Pevzner & Hearst, 2002) between two 0/1 transition vectors.
///
/// Slides a window of `k` positions and counts windows whose boundary counts
/// differ. 0.0 is perfect agreement, 1.0 the worst. Vectors of different
/// length fail with [`SegmentError::LengthMismatch`] and a `k` outside
/// `[1, len]` with [`SegmentError::Config`].
pub fn window_diff(reference: &[u8], hypothesis: &[u8], k: usize) -> Result<f64> {
    let len = reference.len();
    if hypothesis.len() != len {
        return Err(SegmentError::LengthMismatch {
            expected: len,
            found: hypothesis.len(),
        });
    }
    if k == 0 || k > len {
        return Err(SegmentError::Config(format!(
            "WindowDiff window k={} must be within [1, {}]",
            k, len
        )));
    }

    let windows = len - k + 1;
    let mut errors = 0usize;
    for i in 0..windows {
        let r = reference[i..i + k].iter().filter(|&&t| t != 0).count();
        let h = hypothesis[i..i + k].iter().filter(|&&t| t != 0).count();
        if r != h {
            errors += 1;
        }
    }

    Ok(errors as f64 / windows as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sets_are_perfect() {
        let score = match_boundaries(&[12, 40, 77], &[12, 40, 77], 3);
        assert_eq!(score.precision, 1.0);
        assert_eq!(score.recall, 1.0);
        assert_eq!(score.f1, 1.0);
        assert_eq!(score.matches, vec![(12, 12), (40, 40), (77, 77)]);
    }

    #[test]
    fn test_empty_sets() {
        assert_eq!(match_boundaries(&[], &[], 2).f1, 1.0);
        let miss = match_boundaries(&[], &[10], 2);
        assert_eq!(miss.recall, 0.0);
        assert_eq!(miss.f1, 0.0);
        let extra = match_boundaries(&[10], &[], 2);
        assert_eq!(extra.precision, 0.0);
        assert_eq!(extra.f1, 0.0);
    }

    #[test]
    fn test_tolerance_and_nearest() {
        let score = match_boundaries(&[5], &[3, 6], 2);
        assert_eq!(score.matches, vec![(5, 6)]);
        assert_eq!(score.precision, 1.0);
        assert_eq!(score.recall, 0.5);

        let far = match_boundaries(&[5], &[9], 2);
        assert_eq!(far.matched(), 0);
    }

    #[test]
    fn test_one_to_one() {
        let score = match_boundaries(&[10, 11], &[10], 3);
        assert_eq!(score.matched(), 1);
        assert_eq!(score.precision, 0.5);
        assert_eq!(score.recall, 1.0);
    }

    #[test]
    fn test_symmetric() {
        let p = [4, 6, 20, 31];
        let r = [5, 8, 29];
        let forward = match_boundaries(&p, &r, 2);
        let backward = match_boundaries(&r, &p, 2);
        assert_eq!(forward.matched(), backward.matched());
        assert_eq!(forward.precision, backward.recall);
        assert_eq!(forward.recall, backward.precision);
        assert_eq!(forward.f1, backward.f1);
    }

    #[test]
    fn test_default_tolerance() {
        assert_eq!(default_tolerance(30, 1), 8);
        assert_eq!(default_tolerance(5, 4), 1);
    }

    #[test]
    fn test_window_diff() {
        let reference = [0, 0, 0, 1, 0, 0, 0, 1, 0, 0];
        assert_eq!(window_diff(&reference, &reference, 3).unwrap(), 0.0);

        let shifted = [0, 0, 0, 0, 1, 0, 0, 1, 0, 0];
        let wd = window_diff(&reference, &shifted, 3).unwrap();
        // windows starting at 1 and 4 disagree
        assert!((wd - 2.0 / 8.0).abs() < 1e-12);

        assert!(matches!(
            window_diff(&reference, &shifted[..9], 3),
            Err(SegmentError::LengthMismatch { expected: 10, found: 9 })
        ));
        assert!(matches!(window_diff(&reference, &shifted, 11), Err(SegmentError::Config(_))));
        assert!(window_diff(&reference, &shifted, 0).is_err());
    }

    #[test]
    fn test_window_diff_k() {
        assert_eq!(window_diff_k(30, 1), 15);
        assert_eq!(window_diff_k(30, 0), 15);
        assert_eq!(window_diff_k(4, 10), 1);
    }
}
