//! Fixed-count boundary selection.
//!
//! Rather than thresholding depth scores, the K−1 strongest gaps are taken by
//! rank so that every run yields exactly K segments.

use crate::error::{Result, SegmentError};
use crate::segmentation::Segmentation;
use std::cmp::Ordering;

/// Checks `1 <= k <= n`.
pub fn check_k(k: usize, n: usize) -> Result<()> {
    if k == 0 || k > n {
        return Err(SegmentError::InvalidK { k, n });
    }
    Ok(())
}

/// Picks the `k - 1` gaps with the highest strength.
///
/// `signal[j]` is the strength of gap `j + 1`, so the meeting has
/// `signal.len() + 1` utterances. Ties go to the lower gap index.
pub fn select_boundaries(signal: &[f64], k: usize) -> Result<Segmentation> {
    let n = signal.len() + 1;
    check_k(k, n)?;

    let mut ranked: Vec<usize> = (0..signal.len()).collect();
    ranked.sort_by(|&a, &b| match signal[b].total_cmp(&signal[a]) {
        Ordering::Equal => a.cmp(&b),
        other => other,
    });

    let mut boundaries: Vec<usize> = ranked.into_iter().take(k - 1).map(|j| j + 1).collect();
    boundaries.sort_unstable();

    Segmentation::new(boundaries, n)
}
