pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod transcript;
pub mod types;

pub use alignment::caption_track::CaptionTrack;
pub use alignment::report::{compute_track_report, write_report, TrackReport};
pub use alignment::tokenization::tokenize_script;
pub use config::CaptionTimingConfig;
pub use error::CaptionError;
pub use pipeline::builder::CaptionSyncBuilder;
pub use pipeline::runtime::CaptionSynchronizer;
pub use pipeline::traits::{
    CaptionRenderer, IntervalNormalizer, ScriptTokenizer, TimingResolver, TranscriptSource,
};
pub use render::JsonOverlayRenderer;
pub use transcript::{StaticTranscript, WhisperJsonTranscript};
pub use types::{
    CaptionEvent, RenderTarget, ScriptLine, TimingSource, TranscribedWord, WordTiming,
};
