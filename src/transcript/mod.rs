use std::path::Path;

use crate::error::CaptionError;
use crate::pipeline::traits::TranscriptSource;
use crate::types::TranscribedWord;

mod whisper_json;

pub use whisper_json::{parse_whisper_json, WhisperJsonTranscript};

/// Serves the same precomputed word list for any audio file.
#[derive(Debug, Clone, Default)]
pub struct StaticTranscript {
    words: Vec<TranscribedWord>,
}

impl StaticTranscript {
    pub fn new(words: Vec<TranscribedWord>) -> Self {
        Self { words }
    }
}

impl TranscriptSource for StaticTranscript {
    fn transcribe(&self, _audio: &Path) -> Result<Vec<TranscribedWord>, CaptionError> {
        Ok(self.words.clone())
    }
}

/// Drops entries whose times are not finite; they cannot be ordered against anything.
pub(crate) fn retain_finite(mut words: Vec<TranscribedWord>) -> Vec<TranscribedWord> {
    let before = words.len();
    words.retain(|w| w.start.is_finite() && w.end.is_finite());
    let dropped = before - words.len();
    if dropped > 0 {
        tracing::warn!(dropped, "transcript: discarded words with non-finite timestamps");
    }
    words
}
