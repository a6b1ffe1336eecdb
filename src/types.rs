use serde::{Deserialize, Serialize};

/// One recognized word from the speech transcript. Times are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscribedWord {
    /// Lowercased with trailing `.,!?` removed.
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl TranscribedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub speaker: Option<String>,
    /// Tokens as written, punctuation included.
    pub words: Vec<String>,
}

/// Which evidence produced a word's interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingSource {
    ExactMatch,
    Interpolated,
    NeighborBridged,
    Fallback,
}

impl TimingSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactMatch => "exact_match",
            Self::Interpolated => "interpolated",
            Self::NeighborBridged => "neighbor_bridged",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    /// Clamped display length. `end` is `start + duration`; subtracting them back
    /// can land one ulp outside the clamp bounds.
    pub duration: f64,
    pub source: TimingSource,
}

/// One word's on-screen display interval. `duration` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionEvent {
    pub word: String,
    pub start: f64,
    pub duration: f64,
}

impl CaptionEvent {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Pixel geometry and length of the composed video the captions are drawn onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub duration: f64,
}
