use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TranscriptError};

pub const VIDEO_ID_LEN: usize = 11;

static EMBEDDED_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("embedded id pattern is valid")
});

/// An 11 character YouTube video id. Only built through validation, so any
/// value of this type is safe to splice into a watch URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(candidate: &str) -> Option<Self> {
        is_valid_video_id(candidate).then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_video_id(candidate: &str) -> bool {
    candidate.chars().count() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve a URL or raw id into a canonical video id.
///
/// Accepts bare ids, `watch?v=` URLs, short links (`youtu.be/<id>`), and any
/// URL whose last path segment ends in an id (`/embed/<id>`, `/shorts/<id>`).
/// As a last resort the whole input is scanned for `v=<id>` or `/<id>`.
pub fn resolve_video_id(raw: &str) -> Result<VideoId> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(TranscriptError::InvalidLocator(
            "a video URL or id is required".to_string(),
        ));
    }

    if let Some(id) = VideoId::parse(input) {
        return Ok(id);
    }

    if let Some(id) = url::Url::parse(input).ok().and_then(|url| from_url(&url)) {
        return Ok(id);
    }

    if let Some(id) = EMBEDDED_ID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
    {
        return Ok(id);
    }

    Err(TranscriptError::InvalidLocator(format!(
        "{} (YouTube video IDs must be 11 characters, or a valid YouTube URL)",
        raw
    )))
}

fn from_url(url: &url::Url) -> Option<VideoId> {
    // Standard watch URL: ?v=VIDEO_ID
    if let Some(id) = url
        .query_pairs()
        .find(|(k, _)| k == "v")
        .and_then(|(_, v)| VideoId::parse(&v))
    {
        return Some(id);
    }

    // Short links and embeds carry the id at the end of the path
    let last = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let chars: Vec<char> = last.chars().collect();
    if chars.len() < VIDEO_ID_LEN {
        return None;
    }
    let tail: String = chars[chars.len() - VIDEO_ID_LEN..].iter().collect();
    VideoId::parse(&tail)
}
