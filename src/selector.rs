use crate::error::{Result, TranscriptError};
use crate::track::CaptionTrack;

/// Pick one caption track, first matching rule wins:
///
/// 1. a track in the preferred language (case-insensitive),
/// 2. with a preference but no native track, the first translatable track
///    re-targeted at the preferred language,
/// 3. the first manually authored track,
/// 4. the first track.
pub fn select_track(tracks: &[CaptionTrack], preferred_language: Option<&str>) -> Result<CaptionTrack> {
    let first = tracks.first().ok_or_else(|| {
        TranscriptError::NoCaptionsAvailable("caption metadata is empty".to_string())
    })?;

    if let Some(language) = preferred_language.map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(track) = tracks.iter().find(|t| {
            t.language_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(language))
        }) {
            return Ok(track.clone());
        }

        if let Some(track) = tracks.iter().find(|t| t.translatable) {
            tracing::debug!(
                source = track.language_code.as_deref().unwrap_or("unknown"),
                target = language,
                "no native track in preferred language, requesting translation"
            );
            return Ok(track.with_translation(language));
        }
    }

    let track = tracks
        .iter()
        .find(|t| !t.kind.eq_ignore_ascii_case("asr"))
        .unwrap_or(first);

    Ok(track.clone())
}
