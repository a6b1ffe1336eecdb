use crate::alignment::normalizer::normalize_intervals;
use crate::alignment::resolver::resolve_word_timings;
use crate::alignment::tokenization::tokenize_script;
use crate::config::CaptionTimingConfig;
use crate::error::CaptionError;
use crate::pipeline::traits::{IntervalNormalizer, ScriptTokenizer, TimingResolver};
use crate::types::{ScriptLine, TranscribedWord, WordTiming};

pub struct BracketTagTokenizer;

impl ScriptTokenizer for BracketTagTokenizer {
    fn tokenize(&self, script: &str) -> Result<Vec<ScriptLine>, CaptionError> {
        tokenize_script(script)
    }
}

pub struct WindowedTimingResolver;

impl TimingResolver for WindowedTimingResolver {
    fn resolve(
        &self,
        lines: &[ScriptLine],
        transcript: &[TranscribedWord],
        config: &CaptionTimingConfig,
    ) -> Vec<WordTiming> {
        resolve_word_timings(lines, transcript, config)
    }
}

pub struct ForwardPassNormalizer;

impl IntervalNormalizer for ForwardPassNormalizer {
    fn normalize(&self, timings: &[WordTiming], config: &CaptionTimingConfig) -> Vec<WordTiming> {
        normalize_intervals(timings, config)
    }
}
