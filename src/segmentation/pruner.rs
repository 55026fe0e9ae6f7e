//! Minimum-length segment pruning.
//!
//! Applied identically to reference and predicted boundaries before they
//! are compared.

use crate::segmentation::Segmentation;

/// Drops boundaries until every segment has at least `min_len` utterances.
///
/// Boundaries are scanned left to right; a boundary survives only if the
/// segment it closes (measured from the last surviving boundary) is at least
/// `min_len` long, otherwise that segment merges into the next one. If the
/// trailing segment is then too short, the last surviving boundary is dropped
/// so that it merges backward. The result never has more boundaries than the
/// input and pruning a pruned set changes nothing.
pub fn prune_boundaries(boundaries: &[usize], len: usize, min_len: usize) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(boundaries.len());
    let mut last = 0usize;

    for &b in boundaries {
        if b.saturating_sub(last) >= min_len {
            kept.push(b);
            last = b;
        }
    }

    if let Some(&tail_start) = kept.last() {
        if len.saturating_sub(tail_start) < min_len {
            kept.pop();
        }
    }

    kept
}

/// Prunes a segmentation; see [`prune_boundaries`].
pub fn prune(segmentation: &Segmentation, min_len: usize) -> Segmentation {
    let kept = prune_boundaries(segmentation.boundaries(), segmentation.len(), min_len);
    Segmentation::from_subset(kept, segmentation.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(boundaries: &[usize], len: usize) -> Segmentation {
        Segmentation::new(boundaries.to_vec(), len).unwrap()
    }

    #[test]
    fn test_short_leading_segment_merges_forward() {
        let pruned = prune(&seg(&[8, 19], 30), 10);
        assert_eq!(pruned.boundaries(), &[19]);
        assert_eq!(pruned.segment_lengths(), vec![19, 11]);
    }

    #[test]
    fn test_short_trailing_segment_merges_backward() {
        let pruned = prune(&seg(&[10, 25], 30), 10);
        assert_eq!(pruned.boundaries(), &[10]);
    }

    #[test]
    fn test_min_len_larger_than_meeting() {
        let pruned = prune(&seg(&[3, 6], 8), 10);
        assert!(pruned.boundaries().is_empty());
        assert_eq!(pruned.num_segments(), 1);
    }

    #[test]
    fn test_all_segments_long_enough() {
        let original = seg(&[2, 5, 11, 12, 18, 23, 31, 33, 40], 44);
        let pruned = prune(&original, 5);
        assert!(pruned.segment_lengths().iter().all(|&l| l >= 5));
        assert!(pruned.boundaries().len() <= original.boundaries().len());
    }

    #[test]
    fn test_idempotent() {
        let cases: Vec<(Vec<usize>, usize)> = vec![
            (vec![8, 19], 30),
            (vec![1, 2, 3, 4, 5, 6, 7, 8, 9], 10),
            (vec![4, 9, 14, 21, 27, 33, 36], 40),
            (vec![], 12),
        ];
        for min_len in [0, 1, 3, 5, 10, 50] {
            for (boundaries, len) in &cases {
                let once = prune(&seg(boundaries, *len), min_len);
                let twice = prune(&once, min_len);
                assert_eq!(once, twice, "boundaries {:?}, L={}", boundaries, min_len);
                assert!(once.boundaries().len() <= boundaries.len());
            }
        }
    }

    #[test]
    fn test_zero_min_len_keeps_everything() {
        let original = seg(&[1, 2, 3], 4);
        assert_eq!(prune(&original, 0), original);
        assert_eq!(prune(&original, 1), original);
    }
}
