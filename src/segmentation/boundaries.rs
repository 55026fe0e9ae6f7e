//! Validated boundary sets over a meeting.

use crate::error::{Result, SegmentError};
use crate::meeting::validate_boundaries;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A partition of `len` utterances into contiguous, non-empty segments.
///
/// Stored as strictly increasing gap indices in `[1, len - 1]`; boundary `b`
/// means utterance `b` starts a new segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    boundaries: Vec<usize>,
    len: usize,
}

impl Segmentation {
    /// Creates a segmentation, rejecting out-of-range or unordered boundaries.
    pub fn new(boundaries: Vec<usize>, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SegmentError::EmptyMeeting("segmentation over zero utterances".to_string()));
        }
        validate_boundaries(&boundaries, len).map_err(SegmentError::InvalidReference)?;
        Ok(Self { boundaries, len })
    }

    /// Wraps boundaries derived from an already valid segmentation.
    pub(crate) fn from_subset(boundaries: Vec<usize>, len: usize) -> Self {
        debug_assert!(validate_boundaries(&boundaries, len).is_ok());
        Self { boundaries, len }
    }

    /// Boundary positions.
    #[inline]
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of utterances covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the segmentation covers no utterances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments.
    #[inline]
    pub fn num_segments(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Segments as half-open utterance ranges, in order.
    pub fn segments(&self) -> Vec<Range<usize>> {
        let mut segments = Vec::with_capacity(self.num_segments());
        let mut start = 0;
        for &b in &self.boundaries {
            segments.push(start..b);
            start = b;
        }
        segments.push(start..self.len);
        segments
    }

    /// Length of each segment.
    pub fn segment_lengths(&self) -> Vec<usize> {
        self.segments().iter().map(|r| r.len()).collect()
    }

    /// 0/1 vector with a `1` at every utterance that opens a new segment.
    pub fn transitions(&self) -> Vec<u8> {
        let mut transitions = vec![0u8; self.len];
        for &b in &self.boundaries {
            transitions[b] = 1;
        }
        transitions
    }
}
