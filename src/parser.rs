use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TranscriptError};

/// One caption cue: the concatenated text of an event and when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSegment {
    pub text: String,
    pub start: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimedText {
    events: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<Value>,
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimedTextSeg {
    utf8: Option<String>,
}

/// Parser for the `json3` timed-text payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscriptParser;

impl TranscriptParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, payload: &str) -> Result<Vec<CaptionSegment>> {
        let timed_text: TimedText = serde_json::from_str(payload).map_err(|e| {
            TranscriptError::TranscriptUnavailable(format!("caption payload is not valid JSON: {}", e))
        })?;

        let Some(events) = timed_text.events else {
            return Ok(Vec::new());
        };

        let segments = events
            .iter()
            .filter_map(|raw| TimedTextEvent::deserialize(raw).ok())
            .filter_map(|event| {
                let text: String = event
                    .segs?
                    .into_iter()
                    .filter_map(|seg| seg.utf8)
                    .collect();
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }

                Some(CaptionSegment {
                    text: text.to_string(),
                    start: event.start_ms.as_ref().and_then(millis_to_duration),
                })
            })
            .collect();

        Ok(segments)
    }
}

fn millis_to_duration(value: &Value) -> Option<Duration> {
    if let Some(ms) = value.as_u64() {
        return Some(Duration::from_millis(ms));
    }
    value
        .as_f64()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok())
}
