//! Word timestamps in the JSON layout written by Whisper-family recognizers.
//!
//! Two shapes are accepted:
//!
//! ```json
//! { "segments": [ { "words": [ { "word": " Hi", "start": 0.0, "end": 0.3 } ] } ] }
//! ```
//!
//! or a flat array of the word objects. `text` is accepted in place of `word`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::retain_finite;
use crate::alignment::tokenization::normalize_transcribed_text;
use crate::error::CaptionError;
use crate::pipeline::traits::TranscriptSource;
use crate::types::TranscribedWord;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTranscript {
    Segmented { segments: Vec<RawSegment> },
    Flat(Vec<RawWord>),
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    #[serde(alias = "text")]
    word: String,
    start: f64,
    end: f64,
}

pub fn parse_whisper_json(json: &str) -> Result<Vec<TranscribedWord>, CaptionError> {
    let raw: RawTranscript =
        serde_json::from_str(json).map_err(|e| CaptionError::json("parse transcript", e))?;
    let raw_words = match raw {
        RawTranscript::Segmented { segments } => {
            segments.into_iter().flat_map(|segment| segment.words).collect()
        }
        RawTranscript::Flat(words) => words,
    };

    let words = raw_words
        .into_iter()
        .filter_map(|raw| {
            let text = normalize_transcribed_text(&raw.word);
            (!text.is_empty()).then(|| TranscribedWord::new(text, raw.start, raw.end))
        })
        .collect();
    Ok(retain_finite(words))
}

/// Reads recognizer output saved next to the audio (`speech.wav` -> `speech.json`)
/// or from a fixed file.
#[derive(Debug, Clone, Default)]
pub struct WhisperJsonTranscript {
    path: Option<PathBuf>,
}

impl WhisperJsonTranscript {
    pub fn sidecar() -> Self {
        Self { path: None }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    fn json_path(&self, audio: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| audio.with_extension("json"))
    }
}

impl TranscriptSource for WhisperJsonTranscript {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscribedWord>, CaptionError> {
        let json_path = self.json_path(audio);
        let data = std::fs::read_to_string(&json_path)
            .map_err(|e| CaptionError::io("read transcript json", e))?;
        let words = parse_whisper_json(&data)?;
        tracing::debug!(
            path = %json_path.display(),
            word_count = words.len(),
            "transcript: loaded word timestamps"
        );
        Ok(words)
    }
}
