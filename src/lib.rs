mod chunker;
mod cleaner;
pub mod config;
mod error;
pub mod fetch;
pub mod format;
mod metadata;
mod parser;
mod selector;
mod track;
mod video_id;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub use chunker::{chunk_paragraphs, DEFAULT_PARAGRAPH_TARGET};
pub use cleaner::clean_fragment;
pub use config::ClientConfig;
pub use error::{ErrorKind, Result, TranscriptError};
pub use fetch::{HttpFetcher, PageFetcher};
pub use metadata::{extract_metadata, Playability, VideoMetadata, UNKNOWN_TITLE};
pub use parser::{CaptionSegment, TranscriptParser};
pub use selector::select_track;
pub use track::CaptionTrack;
pub use video_id::{is_valid_video_id, resolve_video_id, VideoId};

pub const UNKNOWN_LANGUAGE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Auto,
    Manual,
}

impl TrackType {
    pub fn label(self) -> &'static str {
        match self {
            TrackType::Auto => "Auto-generated captions",
            TrackType::Manual => "Manual captions",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackType::Auto => f.write_str("auto"),
            TrackType::Manual => f.write_str("manual"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    pub video_id: String,
    pub title: String,
    pub source_language: String,
    pub track_type: TrackType,
    pub paragraphs: Vec<String>,
    pub full_text: String,
    pub retrieved_at: DateTime<Utc>,
}

/// Pipeline position, reported in logs when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingLocator,
    FetchingPage,
    ExtractingMetadata,
    SelectingTrack,
    FetchingCaptions,
    ParsingSegments,
    Cleaning,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolvingLocator => "resolving_locator",
            Stage::FetchingPage => "fetching_page",
            Stage::ExtractingMetadata => "extracting_metadata",
            Stage::SelectingTrack => "selecting_track",
            Stage::FetchingCaptions => "fetching_captions",
            Stage::ParsingSegments => "parsing_segments",
            Stage::Cleaning => "cleaning",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Turns a video URL or id into a paragraphed transcript.
///
/// Each call runs the whole pipeline from scratch: resolve the id, scrape the
/// watch page for caption tracks, pick one, download its timed text and chunk
/// it into paragraphs. Nothing is cached between calls and a single failed
/// request fails the call.
pub struct TranscriptFetcher<F = HttpFetcher> {
    fetcher: F,
    config: ClientConfig,
}

impl TranscriptFetcher<HttpFetcher> {
    pub fn new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: PageFetcher> TranscriptFetcher<F> {
    pub fn with_fetcher(fetcher: F, config: ClientConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch the transcript for `locator`, preferring `preferred_language`
    /// when the video offers it. Cancelling `cancel` aborts the request at
    /// either network call with [`TranscriptError::Cancelled`].
    pub async fn fetch_transcript(
        &self,
        locator: &str,
        preferred_language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<TranscriptResult> {
        let mut stage = Stage::ResolvingLocator;
        let result = self
            .run(locator, preferred_language, cancel, &mut stage)
            .await;

        if let Err(e) = &result {
            tracing::warn!(%stage, kind = %e.kind(), error = %e, "transcript request failed");
        }
        result
    }

    async fn run(
        &self,
        locator: &str,
        preferred_language: Option<&str>,
        cancel: &CancellationToken,
        stage: &mut Stage,
    ) -> Result<TranscriptResult> {
        let video_id = resolve_video_id(locator)?;
        tracing::debug!(%video_id, "resolved locator");

        *stage = Stage::FetchingPage;
        let html = self
            .fetch(&self.config.watch_url(video_id.as_str()), cancel)
            .await?;

        *stage = Stage::ExtractingMetadata;
        let metadata = extract_metadata(&html)?;
        tracing::debug!(
            title = %metadata.title,
            tracks = metadata.tracks.len(),
            "found caption metadata"
        );

        *stage = Stage::SelectingTrack;
        let track = select_track(&metadata.tracks, preferred_language)?;
        tracing::debug!(
            language = track.language_code.as_deref().unwrap_or(UNKNOWN_LANGUAGE),
            kind = %track.kind,
            "selected caption track"
        );

        *stage = Stage::FetchingCaptions;
        let payload = self.fetch(&track.caption_url(), cancel).await?;

        *stage = Stage::ParsingSegments;
        let segments = TranscriptParser::new().parse(&payload)?;
        if segments.is_empty() {
            return Err(TranscriptError::TranscriptUnavailable(
                "no transcript segments were returned for this video".to_string(),
            ));
        }

        *stage = Stage::Cleaning;
        let paragraphs = chunk_paragraphs(&segments, self.config.paragraph_target);
        if paragraphs.is_empty() {
            return Err(TranscriptError::TranscriptUnavailable(
                "transcript text could not be cleaned".to_string(),
            ));
        }

        *stage = Stage::Done;
        tracing::info!(
            %video_id,
            segments = segments.len(),
            paragraphs = paragraphs.len(),
            "transcript ready"
        );

        let track_type = if track.is_generated() {
            TrackType::Auto
        } else {
            TrackType::Manual
        };
        let full_text = paragraphs.join("\n\n");

        Ok(TranscriptResult {
            video_id: video_id.into_string(),
            title: metadata.title,
            source_language: track
                .language_code
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            track_type,
            paragraphs,
            full_text,
            retrieved_at: Utc::now(),
        })
    }

    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<String> {
        if cancel.is_cancelled() {
            return Err(TranscriptError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TranscriptError::Cancelled),
            body = self.fetcher.fetch_text(url) => body,
        }
    }
}
