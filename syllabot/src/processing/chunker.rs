use unicode_segmentation::UnicodeSegmentation;

use crate::config::ProcessingConfig;

/// Splits normalized text into overlapping, bounded-length windows.
///
/// Windows are measured in grapheme clusters so a window boundary never lands
/// inside a user-perceived character. Every character of the input appears in
/// at least one chunk, and consecutive chunks overlap by at most `overlap`
/// graphemes (less when a window was shortened to end on a sentence boundary).
pub struct Chunker {
    max_chars: usize,
    overlap: usize,
}

impl Chunker {
    /// `overlap` must be smaller than `max_chars`; out-of-range values are
    /// clamped with a warning rather than rejected.
    pub fn new(config: &ProcessingConfig) -> Self {
        let max_chars = config.max_chars.max(1);
        let mut overlap = config.overlap;
        if overlap >= max_chars {
            tracing::warn!(
                "chunk overlap {} >= max_chars {}; clamping",
                overlap,
                max_chars
            );
            overlap = max_chars - 1;
        }
        Self { max_chars, overlap }
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let units: Vec<&str> = text.graphemes(true).collect();
        if units.len() <= self.max_chars {
            // Covers empty input too: a record always yields at least one
            // chunk, even if its body is empty.
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let hard_end = (start + self.max_chars).min(units.len());
            let mut end = hard_end;

            if hard_end < units.len() {
                // Prefer to cut at the last period strictly past the window
                // midpoint, so windows do not end mid-sentence.
                let midpoint = start + self.max_chars / 2;
                if let Some(offset) = units[midpoint + 1..hard_end]
                    .iter()
                    .rposition(|g| *g == ".")
                {
                    end = midpoint + 1 + offset + 1;
                }
            }

            chunks.push(units[start..end].concat());

            if end >= units.len() {
                break;
            }

            // Next window starts `overlap` graphemes back. The guard keeps
            // windows advancing when overlap is close to the window size.
            let next = end.saturating_sub(self.overlap);
            start = if next > start { next } else { end };
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            overlap: 200,
        }
    }
}
