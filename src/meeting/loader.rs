//! JSON meeting files.
//!
//! A meeting file holds either a single meeting object or an array of them:
//!
//! ```json
//! {
//!   "id": "ES2002a",
//!   "utterances": [
//!     {"index": 0, "speaker": "A", "text": "Okay, let's start.", "start": 12.3, "end": 13.1}
//!   ],
//!   "reference": [14, 52]
//! }
//! ```

use crate::error::{Result, SegmentError};
use crate::meeting::Meeting;
use log::{debug, info};
use std::path::Path;

/// Loads meetings from JSON files.
#[derive(Debug, Clone, Default)]
pub struct MeetingLoader {
    /// Keep only the first few meetings, like the restricted dataset mode.
    pub restrict_to: Option<usize>,
}

impl MeetingLoader {
    /// Creates a loader that keeps every meeting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader that keeps only the first `count` meetings.
    pub fn restricted(count: usize) -> Self {
        Self {
            restrict_to: Some(count),
        }
    }

    /// Parses meetings from a JSON string.
    ///
    /// A document starting with `[` is read as an array of meetings and
    /// anything else as one meeting, so a parse error names the line and
    /// column of the offending value.
    pub fn parse_str(&self, raw: &str) -> Result<Vec<Meeting>> {
        let mut meetings = if raw.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Meeting>>(raw)?
        } else {
            vec![serde_json::from_str::<Meeting>(raw)?]
        };

        if let Some(limit) = self.restrict_to {
            meetings.truncate(limit);
        }

        for meeting in &mut meetings {
            reindex(meeting);
        }

        Ok(meetings)
    }

    /// Reads meetings from a JSON file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Meeting>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SegmentError::FileNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let meetings = self.parse_str(&raw)?;
        info!("Loaded {} meeting(s) from {}", meetings.len(), path.display());
        Ok(meetings)
    }

    /// Reads the meeting at position `mid` of a file.
    pub fn load_one(&self, path: impl AsRef<Path>, mid: usize) -> Result<Meeting> {
        let mut meetings = self.load(path)?;
        if mid >= meetings.len() {
            return Err(SegmentError::Config(format!(
                "meeting index {} out of range ({} meetings)",
                mid,
                meetings.len()
            )));
        }
        Ok(meetings.swap_remove(mid))
    }
}

/// Utterance indices follow sequence order regardless of what the file says.
fn reindex(meeting: &mut Meeting) {
    for (i, utterance) in meeting.utterances.iter_mut().enumerate() {
        if utterance.index != i {
            debug!("{}: renumbering utterance {} -> {}", meeting.id, utterance.index, i);
            utterance.index = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "id": "IS1000a",
        "utterances": [
            {"index": 0, "speaker": "A", "text": "hello"},
            {"index": 5, "speaker": "B", "text": "hi", "start": 1.0, "end": 1.5}
        ],
        "reference": [1]
    }"#;

    #[test]
    fn test_single_meeting() {
        let meetings = MeetingLoader::new().parse_str(SINGLE).unwrap();
        assert_eq!(meetings.len(), 1);
        assert_eq!(meetings[0].utterances[1].index, 1);
        assert_eq!(meetings[0].utterances[1].start, Some(1.0));
        assert_eq!(meetings[0].reference, vec![1]);
    }

    #[test]
    fn test_restricted() {
        let raw = format!("[{0}, {0}, {0}]", SINGLE);
        assert_eq!(MeetingLoader::new().parse_str(&raw).unwrap().len(), 3);
        assert_eq!(MeetingLoader::restricted(2).parse_str(&raw).unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        let err = MeetingLoader::new().parse_str("{\"id\": 3}").unwrap_err();
        assert!(matches!(err, SegmentError::Serialization(_)));
    }

    #[test]
    fn test_parse_error_points_at_bad_value() {
        let bad_reference = SINGLE.replace("\"reference\": [1]", "\"reference\": [\"one\"]");
        let message = MeetingLoader::new().parse_str(&bad_reference).unwrap_err().to_string();
        assert!(message.contains("line 7"), "{}", message);
        assert!(message.contains("invalid type"), "{}", message);

        let array = format!("[\n{}\n]", bad_reference);
        let message = MeetingLoader::new().parse_str(&array).unwrap_err().to_string();
        assert!(message.contains("line 8"), "{}", message);
    }
}
