//! Meeting transcripts and their reference segmentation.
//!
//! A [`Meeting`] is produced by a corpus loader and is immutable afterwards.
//! Boundary positions are gap indices: boundary `b` means utterance `b`
//! opens a new segment, so valid positions lie in `[1, n - 1]`.

mod loader;

pub use loader::MeetingLoader;

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};

/// One speaker turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Position in the meeting (0-based).
    pub index: usize,
    /// Speaker identifier.
    pub speaker: String,
    /// Transcribed text.
    pub text: String,
    /// Start time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// End time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl Utterance {
    /// Creates an untimed utterance.
    pub fn new(index: usize, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            speaker: speaker.into(),
            text: text.into(),
            start: None,
            end: None,
        }
    }

    /// Attaches a time range.
    pub fn with_times(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Renders the utterance as a transcript line.
    ///
    /// Timed utterances render as `[hh:mm:ss.mmm-hh:mm:ss.mmm] Speaker X: text`,
    /// untimed ones as `-text`.
    pub fn composite(&self, timed: bool) -> String {
        match (timed, self.start, self.end) {
            (true, Some(start), Some(end)) => format!(
                "[{}-{}] Speaker {}: {}",
                to_hhmmss(start),
                to_hhmmss(end),
                self.speaker,
                self.text
            ),
            _ => format!("-{}", self.text),
        }
    }
}

fn to_hhmmss(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let (h, rem) = (millis / 3_600_000, millis % 3_600_000);
    let (m, rem) = (rem / 60_000, rem % 60_000);
    format!("{:02}:{:02}:{:02}.{:03}", h, m, rem / 1000, rem % 1000)
}

/// A meeting transcript with its human-annotated topic boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    /// Meeting identifier (e.g. `ES2002a`).
    pub id: String,
    /// Ordered utterances.
    pub utterances: Vec<Utterance>,
    /// Reference boundaries, strictly increasing gap indices.
    #[serde(default)]
    pub reference: Vec<usize>,
}

impl Meeting {
    /// Creates a meeting.
    pub fn new(id: impl Into<String>, utterances: Vec<Utterance>, reference: Vec<usize>) -> Self {
        Self {
            id: id.into(),
            utterances,
            reference,
        }
    }

    /// Number of utterances.
    #[inline]
    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    /// Whether the meeting has no utterances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Utterance texts in order, as sent to an embedding source.
    pub fn texts(&self) -> Vec<String> {
        self.utterances.iter().map(|u| u.text.clone()).collect()
    }

    /// Whether every utterance carries a time range.
    pub fn is_timed(&self) -> bool {
        !self.utterances.is_empty()
            && self.utterances.iter().all(|u| u.start.is_some() && u.end.is_some())
    }

    /// Rejects empty meetings and malformed reference boundaries.
    pub fn validate(&self) -> Result<()> {
        if self.utterances.is_empty() {
            return Err(SegmentError::EmptyMeeting(self.id.clone()));
        }
        validate_boundaries(&self.reference, self.len())
            .map_err(|msg| SegmentError::InvalidReference(format!("{}: {}", self.id, msg)))
    }

    /// Number of reference segments.
    pub fn reference_k(&self) -> usize {
        self.reference.len() + 1
    }
}

/// Checks that boundaries are strictly increasing and within `[1, n - 1]`.
pub(crate) fn validate_boundaries(boundaries: &[usize], n: usize) -> std::result::Result<(), String> {
    let mut previous = 0usize;
    for &b in boundaries {
        if b == 0 || b >= n {
            return Err(format!("boundary {} outside [1, {}]", b, n.saturating_sub(1)));
        }
        if b <= previous {
            return Err(format!("boundary {} does not follow {}", b, previous));
        }
        previous = b;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(n: usize, reference: Vec<usize>) -> Meeting {
        let utterances = (0..n).map(|i| Utterance::new(i, "A", format!("line {}", i))).collect();
        Meeting::new("TS3003a", utterances, reference)
    }

    #[test]
    fn test_valid_meeting() {
        let m = meeting(30, vec![8, 19]);
        assert!(m.validate().is_ok());
        assert_eq!(m.reference_k(), 3);
    }

    #[test]
    fn test_empty_meeting_rejected() {
        let m = meeting(0, vec![]);
        assert!(matches!(m.validate(), Err(SegmentError::EmptyMeeting(_))));
    }

    #[test]
    fn test_out_of_range_reference_rejected() {
        assert!(matches!(
            meeting(10, vec![0]).validate(),
            Err(SegmentError::InvalidReference(_))
        ));
        assert!(matches!(
            meeting(10, vec![10]).validate(),
            Err(SegmentError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_non_increasing_reference_rejected() {
        assert!(matches!(
            meeting(10, vec![4, 4]).validate(),
            Err(SegmentError::InvalidReference(_))
        ));
        assert!(matches!(
            meeting(10, vec![6, 3]).validate(),
            Err(SegmentError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_composite() {
        let u = Utterance::new(0, "B", "Let's start.").with_times(3725.5, 3727.25);
        assert_eq!(u.composite(true), "[01:02:05.500-01:02:07.250] Speaker B: Let's start.");
        assert_eq!(u.composite(false), "-Let's start.");
        assert_eq!(Utterance::new(1, "C", "Yes").composite(true), "-Yes");
    }
}
