// ============================================================
// Layer 3 — Segment Domain Type
// ============================================================
// A segment is one slice of a lecture video, cut wherever the
// screen content changes significantly. The segmenter emits one
// JSON array of segments per video, sorted by `start_time`.
//
// Example element:
//   {
//       "start_time": 12.5,
//       "transcript": "so today we look at ...",
//       "screen_text": "Lecture 3 - Hash Tables",
//       "title": "Introduction"
//   }
//
// `start_time` is kept as a serde_json::Number so that the exact
// textual form from the input file ("5" vs "5.0") survives into
// the rendered prompt and the output key.
//
// Reference: Rust Book §5 (Structs)
//            serde_json documentation (Number)

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One segment of a video as produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Seconds after video start, as written in the source file
    pub start_time: Number,

    /// Speech-to-text transcript of this slice
    pub transcript: String,

    /// OCR text detected on screen
    pub screen_text: String,

    /// Label the model should learn to predict.
    /// Required by the time packing runs; `null` counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Segment {
    #[cfg(test)]
    pub fn new(
        start_time:  impl Into<Number>,
        transcript:  impl Into<String>,
        screen_text: impl Into<String>,
        title:       Option<&str>,
    ) -> Self {
        Self {
            start_time:  start_time.into(),
            transcript:  transcript.into(),
            screen_text: screen_text.into(),
            title:       title.map(str::to_string),
        }
    }

    /// Start time as seconds, NaN if the number cannot be represented
    pub fn start_seconds(&self) -> f64 {
        self.start_time.as_f64().unwrap_or(f64::NAN)
    }

    /// Start time formatted the way it appears as a JSON object key
    pub fn start_key(&self) -> String {
        self.start_time.to_string()
    }

    /// The model-input view of this segment (everything but the title)
    pub fn as_input(&self) -> SegmentInput<'_> {
        SegmentInput {
            start_time:  &self.start_time,
            transcript:  &self.transcript,
            screen_text: &self.screen_text,
        }
    }
}

/// Borrowed view serialised into `json_input`.
/// Field order here is the key order in the rendered prompt.
#[derive(Debug, Serialize)]
pub struct SegmentInput<'a> {
    pub start_time:  &'a Number,
    pub transcript:  &'a str,
    pub screen_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_number_form() {
        let seg: Segment = serde_json::from_str(
            r#"{"start_time": 5.0, "transcript": "", "screen_text": ""}"#,
        ).unwrap();
        assert_eq!(seg.start_key(), "5.0");

        let seg: Segment = serde_json::from_str(
            r#"{"start_time": 12, "transcript": "", "screen_text": ""}"#,
        ).unwrap();
        assert_eq!(seg.start_key(), "12");
        assert_eq!(seg.start_seconds(), 12.0);
    }

    #[test]
    fn test_null_title_is_absent() {
        let seg: Segment = serde_json::from_str(
            r#"{"start_time": 0, "transcript": "a", "screen_text": "b", "title": null}"#,
        ).unwrap();
        assert!(seg.title.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let seg: Segment = serde_json::from_str(
            r#"{"start_time": 1, "transcript": "a", "screen_text": "b", "end_time": 4}"#,
        ).unwrap();
        assert_eq!(seg.transcript, "a");
    }

    #[test]
    fn test_string_start_time_is_rejected() {
        let res: Result<Segment, _> = serde_json::from_str(
            r#"{"start_time": "1", "transcript": "a", "screen_text": "b"}"#,
        );
        assert!(res.is_err());
    }
}
