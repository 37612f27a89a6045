//! Caption metadata scraped from the watch page.
//!
//! The page embeds the player configuration as
//! `var ytInitialPlayerResponse = {...};`. Everything that depends on that
//! layout lives in [`find_player_response`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TranscriptError};
use crate::track::CaptionTrack;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

static PLAYER_RESPONSE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").expect("assignment pattern is valid")
});

#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub tracks: Vec<CaptionTrack>,
    pub playability: Option<Playability>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Playability {
    pub status: Option<String>,
    pub reason: Option<String>,
}

impl Playability {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == "OK")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCaptionTrack {
    base_url: Option<String>,
    language_code: Option<String>,
    kind: Option<String>,
    is_translatable: Option<bool>,
}

impl RawCaptionTrack {
    fn into_track(self) -> Result<CaptionTrack> {
        let base_url = self.base_url.filter(|u| !u.is_empty()).ok_or_else(|| {
            TranscriptError::NoCaptionsAvailable(
                "encountered caption track without a base URL".to_string(),
            )
        })?;

        Ok(CaptionTrack {
            base_url,
            language_code: self.language_code,
            kind: self.kind.unwrap_or_default(),
            translatable: self.is_translatable.unwrap_or(false),
        })
    }
}

/// Pull the title and caption track list out of a watch page.
///
/// Only a missing or undecodable player object is `MetadataNotFound`. The
/// caption list and title are read separately so that a malformed part
/// degrades to its own error or default.
pub fn extract_metadata(html: &str) -> Result<VideoMetadata> {
    let player = find_player_response(html).ok_or_else(|| {
        TranscriptError::MetadataNotFound(
            "player response payload is missing from the watch page".to_string(),
        )
    })?;

    let playability = player
        .get("playabilityStatus")
        .and_then(|v| Playability::deserialize(v).ok());
    if let Some(status) = playability.as_ref().filter(|p| !p.is_ok()) {
        tracing::debug!(
            status = status.status.as_deref().unwrap_or_default(),
            reason = status.reason.as_deref().unwrap_or_default(),
            "video is not reported as playable"
        );
    }

    let title = player
        .pointer("/videoDetails/title")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    let raw_tracks = player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .ok_or_else(|| {
            TranscriptError::NoCaptionsAvailable(
                "no captions are published for this video".to_string(),
            )
        })?;

    let tracks = Vec::<RawCaptionTrack>::deserialize(raw_tracks)
        .map_err(|e| {
            TranscriptError::NoCaptionsAvailable(format!("caption track list is malformed: {}", e))
        })?
        .into_iter()
        .map(RawCaptionTrack::into_track)
        .collect::<Result<Vec<_>>>()?;

    Ok(VideoMetadata {
        title,
        tracks,
        playability,
    })
}

/// Locate the player response assignment and decode exactly one JSON object
/// from its opening brace. The streaming deserializer stops at the matching
/// closing brace, so nested objects and `};` inside strings are safe.
fn find_player_response(html: &str) -> Option<Value> {
    PLAYER_RESPONSE_ASSIGNMENT.find_iter(html).find_map(|m| {
        let json = &html[m.end() - 1..];
        serde_json::Deserializer::from_str(json)
            .into_iter::<Value>()
            .next()?
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(player_json: &str) -> String {
        format!(
            "<html><head><script>var ytcfg = {{}};</script></head><body>\
             <script nonce=\"x\">var ytInitialPlayerResponse = {player_json};var meta = {{}};</script>\
             </body></html>"
        )
    }

    #[test]
    fn test_extract_title_and_tracks() {
        let html = page(
            r#"{"videoDetails":{"title":"Never Gonna Give You Up","videoId":"dQw4w9WgXcQ"},
                "captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[
                  {"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=en","languageCode":"en","kind":"asr","isTranslatable":true,
                   "name":{"runs":[{"text":"English (auto-generated)"}]}},
                  {"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ&lang=fr","languageCode":"fr"}
                ]}}}"#,
        );

        let meta = extract_metadata(&html).unwrap();
        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.tracks.len(), 2);
        assert_eq!(meta.tracks[0].kind, "asr");
        assert!(meta.tracks[0].translatable);
        assert_eq!(meta.tracks[1].language_code.as_deref(), Some("fr"));
        assert_eq!(meta.tracks[1].kind, "");
        assert!(!meta.tracks[1].translatable);
    }

    #[test]
    fn test_extract_handles_nested_braces_and_semicolons_in_strings() {
        let html = page(
            r#"{"videoDetails":{"title":"a };b {c}","shortDescription":"x};\ny"},
                "captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"U"}]}}}"#,
        );

        let meta = extract_metadata(&html).unwrap();
        assert_eq!(meta.title, "a };b {c}");
        assert_eq!(meta.tracks[0].base_url, "U");
    }

    #[test]
    fn test_extract_missing_title_uses_placeholder() {
        let html = page(r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[]}}}"#);
        let meta = extract_metadata(&html).unwrap();
        assert_eq!(meta.title, UNKNOWN_TITLE);
        assert!(meta.tracks.is_empty());
    }

    #[test]
    fn test_extract_without_assignment_is_metadata_not_found() {
        let err = extract_metadata("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, TranscriptError::MetadataNotFound(_)));
    }

    #[test]
    fn test_extract_with_broken_json_is_metadata_not_found() {
        let err = extract_metadata("ytInitialPlayerResponse = {\"captions\": ;").unwrap_err();
        assert!(matches!(err, TranscriptError::MetadataNotFound(_)));
    }

    #[test]
    fn test_extract_without_caption_path_is_no_captions() {
        let html = page(r#"{"videoDetails":{"title":"t"},"playabilityStatus":{"status":"OK"}}"#);
        let err = extract_metadata(&html).unwrap_err();
        assert!(matches!(err, TranscriptError::NoCaptionsAvailable(_)));
    }

    #[test]
    fn test_extract_track_without_base_url_is_no_captions() {
        let html = page(
            r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[
                {"baseUrl":"U","languageCode":"en"},{"languageCode":"de","baseUrl":""}]}}}"#,
        );
        let err = extract_metadata(&html).unwrap_err();
        assert!(matches!(err, TranscriptError::NoCaptionsAvailable(_)));
    }

    #[test]
    fn test_extract_mistyped_base_url_is_no_captions() {
        let html = page(r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":7}]}}}"#);
        let err = extract_metadata(&html).unwrap_err();
        assert!(matches!(err, TranscriptError::NoCaptionsAvailable(_)), "{err:?}");
    }

    #[test]
    fn test_extract_track_list_not_an_array_is_no_captions() {
        let html = page(r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":{"x":1}}}}"#);
        let err = extract_metadata(&html).unwrap_err();
        assert!(matches!(err, TranscriptError::NoCaptionsAvailable(_)), "{err:?}");
    }

    #[test]
    fn test_extract_non_string_title_uses_placeholder() {
        let html = page(
            r#"{"videoDetails":{"title":5,"lengthSeconds":"212"},"playabilityStatus":{"status":[]},
                "captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"U","languageCode":"en"}]}}}"#,
        );
        let meta = extract_metadata(&html).unwrap();
        assert_eq!(meta.title, UNKNOWN_TITLE);
        assert_eq!(meta.tracks[0].base_url, "U");
        assert!(meta.playability.is_none());
    }

    #[test]
    fn test_extract_surfaces_playability() {
        let html = page(
            r#"{"playabilityStatus":{"status":"LOGIN_REQUIRED","reason":"Sign in"},
                "captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"U"}]}}}"#,
        );
        let meta = extract_metadata(&html).unwrap();
        let playability = meta.playability.unwrap();
        assert!(!playability.is_ok());
        assert_eq!(playability.reason.as_deref(), Some("Sign in"));
    }
}
