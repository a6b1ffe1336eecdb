use std::path::Path;

use crate::alignment::caption_track::CaptionTrack;
use crate::alignment::report::{compute_track_report, TrackReport};
use crate::alignment::tokenization::total_word_count;
use crate::config::CaptionTimingConfig;
use crate::error::CaptionError;
use crate::pipeline::traits::{IntervalNormalizer, ScriptTokenizer, TimingResolver, TranscriptSource};
use crate::transcript::retain_finite;
use crate::types::{ScriptLine, TranscribedWord, WordTiming};

/// Turns a script plus its rendered speech into a caption track.
///
/// Holds no state between calls; every invocation owns its running clock.
pub struct CaptionSynchronizer {
    config: CaptionTimingConfig,
    transcript_source: Box<dyn TranscriptSource>,
    tokenizer: Box<dyn ScriptTokenizer>,
    resolver: Box<dyn TimingResolver>,
    normalizer: Box<dyn IntervalNormalizer>,
}

pub(crate) struct CaptionSynchronizerParts {
    pub config: CaptionTimingConfig,
    pub transcript_source: Box<dyn TranscriptSource>,
    pub tokenizer: Box<dyn ScriptTokenizer>,
    pub resolver: Box<dyn TimingResolver>,
    pub normalizer: Box<dyn IntervalNormalizer>,
}

impl CaptionSynchronizer {
    pub(crate) fn from_parts(parts: CaptionSynchronizerParts) -> Self {
        Self {
            config: parts.config,
            transcript_source: parts.transcript_source,
            tokenizer: parts.tokenizer,
            resolver: parts.resolver,
            normalizer: parts.normalizer,
        }
    }

    pub fn config(&self) -> &CaptionTimingConfig {
        &self.config
    }

    /// Transcribes `audio` once and synchronizes `script` against it.
    ///
    /// A failed transcription is not an error: every word falls back to
    /// synthetic timing instead.
    pub fn synchronize(&self, script: &str, audio: &Path) -> Result<CaptionTrack, CaptionError> {
        let lines = self.tokenizer.tokenize(script)?;
        let transcript = match self.transcript_source.transcribe(audio) {
            Ok(words) => words,
            Err(err) => {
                tracing::warn!(
                    audio = %audio.display(),
                    error = %err,
                    "transcription failed; using fallback timing for every word"
                );
                Vec::new()
            }
        };
        let (_, track) = self.run(&lines, retain_finite(transcript));
        Ok(track)
    }

    pub fn synchronize_with_transcript(
        &self,
        script: &str,
        transcript: &[TranscribedWord],
    ) -> Result<CaptionTrack, CaptionError> {
        let lines = self.tokenizer.tokenize(script)?;
        let (_, track) = self.run(&lines, retain_finite(transcript.to_vec()));
        Ok(track)
    }

    /// Like [`Self::synchronize_with_transcript`], also summarizing how each word was timed.
    pub fn synchronize_with_report(
        &self,
        script: &str,
        transcript: &[TranscribedWord],
    ) -> Result<(CaptionTrack, TrackReport), CaptionError> {
        let lines = self.tokenizer.tokenize(script)?;
        let (resolved, track) = self.run(&lines, retain_finite(transcript.to_vec()));
        let report = compute_track_report(&resolved, &track, &self.config);
        Ok((track, report))
    }

    fn run(
        &self,
        lines: &[ScriptLine],
        transcript: Vec<TranscribedWord>,
    ) -> (Vec<WordTiming>, CaptionTrack) {
        let resolved = self.resolver.resolve(lines, &transcript, &self.config);
        let normalized = self.normalizer.normalize(&resolved, &self.config);
        let track = CaptionTrack::from_normalized(normalized);
        debug_assert_eq!(
            track.len(),
            total_word_count(lines),
            "caption track must hold one event per script word"
        );

        tracing::info!(
            lines = lines.len(),
            words = track.len(),
            transcript_words = transcript.len(),
            track_end = format!("{:.3}", track.end_time()),
            "caption track synchronized"
        );
        (resolved, track)
    }
}
