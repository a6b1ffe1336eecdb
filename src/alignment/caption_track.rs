use serde::Serialize;

use crate::error::CaptionError;
use crate::pipeline::traits::CaptionRenderer;
use crate::types::{CaptionEvent, RenderTarget, WordTiming};

/// One event per normalized word, in order. No merging or filtering.
///
/// Durations are taken from [`WordTiming::duration`] as clamped, never
/// recomputed from `end - start`.
pub fn build_caption_events(normalized: &[WordTiming]) -> Vec<CaptionEvent> {
    normalized
        .iter()
        .map(|timing| {
            debug_assert!(timing.duration > 0.0, "non-positive duration for {:?}", timing.word);
            CaptionEvent {
                word: timing.word.clone(),
                start: timing.start,
                duration: timing.duration,
            }
        })
        .collect()
}

/// Result of one synchronization: display events plus the normalized timings
/// they were built from (with provenance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionTrack {
    pub events: Vec<CaptionEvent>,
    pub timings: Vec<WordTiming>,
}

impl CaptionTrack {
    pub fn from_normalized(timings: Vec<WordTiming>) -> Self {
        Self {
            events: build_caption_events(&timings),
            timings,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// End of the last event, or zero for an empty track.
    pub fn end_time(&self) -> f64 {
        self.events.last().map(CaptionEvent::end).unwrap_or(0.0)
    }

    /// Events that fit within `total_duration` seconds. Events starting at or
    /// after it are dropped and the one straddling it is cut short, so the last
    /// event may fall below the minimum duration.
    pub fn clipped_to(&self, total_duration: f64) -> Vec<CaptionEvent> {
        self.events
            .iter()
            .filter(|event| event.start < total_duration)
            .map(|event| CaptionEvent {
                word: event.word.clone(),
                start: event.start,
                duration: event.duration.min(total_duration - event.start),
            })
            .collect()
    }

    /// Hands every event that fits the target duration to `renderer`, in order.
    pub fn render<R>(
        &self,
        renderer: &mut R,
        target: &RenderTarget,
    ) -> Result<Vec<R::Overlay>, CaptionError>
    where
        R: CaptionRenderer + ?Sized,
    {
        if !target.duration.is_finite() || target.duration <= 0.0 {
            return Err(CaptionError::invalid_input(format!(
                "render target duration must be positive, got {}",
                target.duration
            )));
        }

        let events = self.clipped_to(target.duration);
        if events.len() < self.events.len() {
            tracing::warn!(
                dropped = self.events.len() - events.len(),
                track_end = format!("{:.3}", self.end_time()),
                target_duration = format!("{:.3}", target.duration),
                "caption track runs past the render target; clipping"
            );
        }

        renderer.prepare(target)?;
        events
            .iter()
            .map(|event| renderer.overlay(&event.word, event.start, event.duration))
            .collect()
    }
}
