use std::path::Path;

use serde::Deserialize;

use crate::error::CaptionError;

/// Timing constraints shared by the resolver and the normalizer. All values are seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaptionTimingConfig {
    pub min_word_duration: f64,
    pub max_word_duration: f64,
    /// Minimum spacing between the end of one caption and the start of the next.
    pub word_gap: f64,
    /// Pause inserted after every script line before the next line is resolved.
    pub line_break_duration: f64,
    /// How far from the running clock a transcript word may start and still count as a neighbor.
    pub search_window: f64,
    /// Fall back to the timings of adjacent script words before synthesizing a timing.
    pub neighbor_bridging: bool,
}

impl CaptionTimingConfig {
    pub const DEFAULT_MIN_WORD_DURATION: f64 = 0.25;
    pub const DEFAULT_MAX_WORD_DURATION: f64 = 0.8;
    pub const DEFAULT_WORD_GAP: f64 = 0.08;
    pub const DEFAULT_LINE_BREAK_DURATION: f64 = 0.4;
    pub const DEFAULT_SEARCH_WINDOW: f64 = 2.0;

    pub fn load(path: &Path) -> Result<Self, CaptionError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| CaptionError::io("read timing config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| CaptionError::json("parse timing config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CaptionError> {
        let fields = [
            ("min_word_duration", self.min_word_duration),
            ("max_word_duration", self.max_word_duration),
            ("word_gap", self.word_gap),
            ("line_break_duration", self.line_break_duration),
            ("search_window", self.search_window),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CaptionError::invalid_input(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.min_word_duration <= 0.0 {
            return Err(CaptionError::invalid_input(format!(
                "min_word_duration must be positive, got {}",
                self.min_word_duration
            )));
        }
        if self.max_word_duration < self.min_word_duration {
            return Err(CaptionError::invalid_input(format!(
                "max_word_duration {} is below min_word_duration {}",
                self.max_word_duration, self.min_word_duration
            )));
        }
        if self.word_gap < 0.0 || self.line_break_duration < 0.0 {
            return Err(CaptionError::invalid_input(
                "word_gap and line_break_duration must not be negative",
            ));
        }
        if self.search_window <= 0.0 {
            return Err(CaptionError::invalid_input(format!(
                "search_window must be positive, got {}",
                self.search_window
            )));
        }
        Ok(())
    }

    /// Panics when `min_word_duration > max_word_duration`; see [`Self::validate`].
    pub(crate) fn clamp_duration(&self, duration: f64) -> f64 {
        duration.clamp(self.min_word_duration, self.max_word_duration)
    }
}

impl Default for CaptionTimingConfig {
    fn default() -> Self {
        Self {
            min_word_duration: Self::DEFAULT_MIN_WORD_DURATION,
            max_word_duration: Self::DEFAULT_MAX_WORD_DURATION,
            word_gap: Self::DEFAULT_WORD_GAP,
            line_break_duration: Self::DEFAULT_LINE_BREAK_DURATION,
            search_window: Self::DEFAULT_SEARCH_WINDOW,
            neighbor_bridging: false,
        }
    }
}
