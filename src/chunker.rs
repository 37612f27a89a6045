use crate::cleaner::clean_fragment;
use crate::parser::CaptionSegment;

pub const DEFAULT_PARAGRAPH_TARGET: usize = 900;

/// Group cleaned caption text into paragraphs of roughly `target_len`
/// characters.
///
/// A fragment that would bring the buffer to `target_len` or beyond starts
/// the next paragraph, so every paragraph except the last stays below the
/// target. Fragments are never split.
pub fn chunk_paragraphs(segments: &[CaptionSegment], target_len: usize) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0usize;

    for segment in segments {
        let cleaned = clean_fragment(&segment.text);
        if cleaned.is_empty() {
            continue;
        }

        let cleaned_len = cleaned.chars().count();
        if !buffer.is_empty() && buffer_len + cleaned_len >= target_len {
            paragraphs.push(buffer.trim().to_string());
            buffer.clear();
            buffer_len = 0;
        }

        buffer.push_str(&cleaned);
        buffer.push(' ');
        buffer_len += cleaned_len + 1;
    }

    if !buffer.is_empty() {
        paragraphs.push(buffer.trim().to_string());
    }

    paragraphs
}
