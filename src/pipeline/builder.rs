use crate::config::CaptionTimingConfig;
use crate::error::CaptionError;
use crate::pipeline::defaults::{BracketTagTokenizer, ForwardPassNormalizer, WindowedTimingResolver};
use crate::pipeline::runtime::{CaptionSynchronizer, CaptionSynchronizerParts};
use crate::pipeline::traits::{IntervalNormalizer, ScriptTokenizer, TimingResolver, TranscriptSource};
use crate::transcript::WhisperJsonTranscript;

pub struct CaptionSyncBuilder {
    config: CaptionTimingConfig,
    transcript_source: Option<Box<dyn TranscriptSource>>,
    tokenizer: Option<Box<dyn ScriptTokenizer>>,
    resolver: Option<Box<dyn TimingResolver>>,
    normalizer: Option<Box<dyn IntervalNormalizer>>,
}

impl CaptionSyncBuilder {
    pub fn new(config: CaptionTimingConfig) -> Self {
        Self {
            config,
            transcript_source: None,
            tokenizer: None,
            resolver: None,
            normalizer: None,
        }
    }

    pub fn with_transcript_source(mut self, transcript_source: Box<dyn TranscriptSource>) -> Self {
        self.transcript_source = Some(transcript_source);
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn ScriptTokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_resolver(mut self, resolver: Box<dyn TimingResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn IntervalNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn build(self) -> Result<CaptionSynchronizer, CaptionError> {
        self.config.validate()?;

        Ok(CaptionSynchronizer::from_parts(CaptionSynchronizerParts {
            config: self.config,
            transcript_source: self
                .transcript_source
                .unwrap_or_else(|| Box::new(WhisperJsonTranscript::sidecar())),
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(BracketTagTokenizer)),
            resolver: self
                .resolver
                .unwrap_or_else(|| Box::new(WindowedTimingResolver)),
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(ForwardPassNormalizer)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::transcript::StaticTranscript;
    use crate::types::{ScriptLine, TimingSource, TranscribedWord};

    struct FailingSource;

    impl TranscriptSource for FailingSource {
        fn transcribe(&self, _audio: &Path) -> Result<Vec<TranscribedWord>, CaptionError> {
            Err(CaptionError::transcription("mock recognizer", "model not loaded"))
        }
    }

    struct SingleLineTokenizer;

    impl ScriptTokenizer for SingleLineTokenizer {
        fn tokenize(&self, script: &str) -> Result<Vec<ScriptLine>, CaptionError> {
            let words: Vec<String> = script.split_whitespace().map(str::to_string).collect();
            if words.is_empty() {
                return Err(CaptionError::EmptyScript);
            }
            Ok(vec![ScriptLine {
                speaker: None,
                words,
            }])
        }
    }

    #[test]
    fn build_rejects_invalid_config() {
        let config = CaptionTimingConfig {
            max_word_duration: 0.1,
            ..CaptionTimingConfig::default()
        };
        assert!(CaptionSyncBuilder::new(config).build().is_err());
    }

    #[test]
    fn build_defaults_read_sidecar_transcript() {
        let dir = std::env::temp_dir();
        let audio = dir.join("caption_sync_builder_default.wav");
        std::fs::write(
            dir.join("caption_sync_builder_default.json"),
            r#"[{ "word": "hi", "start": 0.0, "end": 0.3 }]"#,
        )
        .expect("write sidecar");
        let synchronizer = CaptionSyncBuilder::new(CaptionTimingConfig::default())
            .build()
            .expect("build should succeed");
        let track = synchronizer.synchronize("[Boy] hi", &audio).unwrap();
        assert_eq!(track.timings[0].source, TimingSource::ExactMatch);
        let _ = std::fs::remove_file(dir.join("caption_sync_builder_default.json"));
    }

    #[test]
    fn failing_transcription_degrades_to_fallback() {
        let synchronizer = CaptionSyncBuilder::new(CaptionTimingConfig::default())
            .with_transcript_source(Box::new(FailingSource))
            .build()
            .unwrap();
        let track = synchronizer
            .synchronize("[A] one two three", Path::new("speech.wav"))
            .unwrap();
        assert_eq!(track.len(), 3);
        assert!(track
            .timings
            .iter()
            .all(|t| t.source == TimingSource::Fallback));
    }

    #[test]
    fn empty_script_fails_before_transcription() {
        let synchronizer = CaptionSyncBuilder::new(CaptionTimingConfig::default())
            .with_transcript_source(Box::new(StaticTranscript::default()))
            .build()
            .unwrap();
        let result = synchronizer.synchronize("\n[Boy]\n", Path::new("speech.wav"));
        assert!(matches!(result, Err(CaptionError::EmptyScript)));
    }

    #[test]
    fn custom_tokenizer_is_used() {
        let synchronizer = CaptionSyncBuilder::new(CaptionTimingConfig::default())
            .with_tokenizer(Box::new(SingleLineTokenizer))
            .build()
            .unwrap();
        // the bracket is kept as a word by this tokenizer
        let track = synchronizer
            .synchronize_with_transcript("[Boy] hi", &[])
            .unwrap();
        assert_eq!(track.events[0].word, "[Boy]");
        assert_eq!(track.len(), 2);
    }
}
