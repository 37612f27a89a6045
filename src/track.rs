/// One caption stream advertised by the watch page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: Option<String>,
    /// `"asr"` for auto-generated captions, anything else is manual.
    pub kind: String,
    pub translatable: bool,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind == "asr"
    }

    /// A copy of this track that asks the platform to translate into
    /// `language`. The original descriptor is left untouched.
    pub fn with_translation(&self, language: &str) -> Self {
        let param = format!("tlang={}", urlencoding::encode(language));
        Self {
            base_url: append_query(&self.base_url, &param),
            ..self.clone()
        }
    }

    /// URL for the timed-text download, forcing the `json3` format unless the
    /// track already pins one.
    pub fn caption_url(&self) -> String {
        if self.base_url.to_ascii_lowercase().contains("fmt=") {
            self.base_url.clone()
        } else {
            append_query(&self.base_url, "fmt=json3")
        }
    }
}

pub(crate) fn append_query(url: &str, param: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{param}")
}
