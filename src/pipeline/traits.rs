use std::path::Path;

use crate::config::CaptionTimingConfig;
use crate::error::CaptionError;
use crate::types::{RenderTarget, ScriptLine, TranscribedWord, WordTiming};

pub trait ScriptTokenizer: Send + Sync {
    fn tokenize(&self, script: &str) -> Result<Vec<ScriptLine>, CaptionError>;
}

pub trait TimingResolver: Send + Sync {
    fn resolve(
        &self,
        lines: &[ScriptLine],
        transcript: &[TranscribedWord],
        config: &CaptionTimingConfig,
    ) -> Vec<WordTiming>;
}

pub trait IntervalNormalizer: Send + Sync {
    fn normalize(&self, timings: &[WordTiming], config: &CaptionTimingConfig) -> Vec<WordTiming>;
}

/// Speech recognizer producing word-level timestamps for an audio file.
///
/// An empty result is valid; errors are logged by the synchronizer and treated
/// as an empty transcript.
pub trait TranscriptSource: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscribedWord>, CaptionError>;
}

/// Composition stage that turns each caption into a timed visual overlay.
pub trait CaptionRenderer {
    type Overlay;

    /// Called once before the first overlay with the composed video's geometry.
    fn prepare(&mut self, _target: &RenderTarget) -> Result<(), CaptionError> {
        Ok(())
    }

    fn overlay(&mut self, text: &str, start: f64, duration: f64)
        -> Result<Self::Overlay, CaptionError>;
}
