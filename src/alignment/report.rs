use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::alignment::caption_track::CaptionTrack;
use crate::config::CaptionTimingConfig;
use crate::error::CaptionError;
use crate::types::{TimingSource, WordTiming};

const REPORT_SCHEMA_VERSION: u32 = 1;
const EPS_DURATION_SEC: f64 = 1e-6;

#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub schema_version: u32,
    pub word_count: u32,
    pub sources: SourceCounts,
    pub structural: StructuralMetrics,
    pub span_sec: f64,
    /// Mean distance the normalizer moved a resolved start forward.
    pub mean_shift_sec: f64,
    pub max_shift_sec: f64,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceCounts {
    pub exact_match: u32,
    pub interpolated: u32,
    pub neighbor_bridged: u32,
    pub fallback: u32,
}

impl SourceCounts {
    fn record(&mut self, source: TimingSource) {
        match source {
            TimingSource::ExactMatch => self.exact_match += 1,
            TimingSource::Interpolated => self.interpolated += 1,
            TimingSource::NeighborBridged => self.neighbor_bridged += 1,
            TimingSource::Fallback => self.fallback += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralMetrics {
    pub overlap_event_count: u32,
    pub non_monotonic_event_count: u32,
    pub out_of_bounds_duration_count: u32,
    /// Share of the track span with no caption on screen.
    pub gap_ratio: f32,
}

/// Summarizes a synchronized track against the resolver output it came from.
pub fn compute_track_report(
    resolved: &[WordTiming],
    track: &CaptionTrack,
    config: &CaptionTimingConfig,
) -> TrackReport {
    let mut sources = SourceCounts::default();
    for timing in &track.timings {
        sources.record(timing.source);
    }

    let structural = compute_structural_metrics(track, config);

    let shifts: Vec<f64> = resolved
        .iter()
        .zip(&track.timings)
        .map(|(before, after)| (after.start - before.start).max(0.0))
        .collect();
    let mean_shift_sec = if shifts.is_empty() {
        0.0
    } else {
        shifts.iter().sum::<f64>() / shifts.len() as f64
    };
    let max_shift_sec = shifts.iter().copied().fold(0.0, f64::max);

    let mut notes = Vec::new();
    if track.is_empty() {
        notes.push("no_events".to_string());
    } else if sources.fallback as usize == track.len() {
        notes.push("all_fallback".to_string());
    }
    if resolved.len() != track.timings.len() {
        notes.push(format!(
            "resolved_count_mismatch:resolved={} track={}",
            resolved.len(),
            track.timings.len()
        ));
    }
    if structural.overlap_event_count > 0 {
        notes.push(format!("overlaps={}", structural.overlap_event_count));
    }

    TrackReport {
        schema_version: REPORT_SCHEMA_VERSION,
        word_count: to_u32(track.len()),
        sources,
        structural,
        span_sec: track.end_time(),
        mean_shift_sec,
        max_shift_sec,
        notes,
    }
}

fn compute_structural_metrics(track: &CaptionTrack, config: &CaptionTimingConfig) -> StructuralMetrics {
    let events = &track.events;
    let mut overlap_event_count = 0u32;
    let mut non_monotonic_event_count = 0u32;
    let mut gap_total = events.first().map(|e| e.start.max(0.0)).unwrap_or(0.0);

    for pair in events.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start < prev.start {
            non_monotonic_event_count += 1;
        }
        if next.start + EPS_DURATION_SEC < prev.end() {
            overlap_event_count += 1;
        }
        gap_total += (next.start - prev.end()).max(0.0);
    }

    let out_of_bounds_duration_count = events
        .iter()
        .filter(|event| {
            event.duration < config.min_word_duration - EPS_DURATION_SEC
                || event.duration > config.max_word_duration + EPS_DURATION_SEC
        })
        .count();

    let span = track.end_time();
    let gap_ratio = if span > 0.0 {
        (gap_total / span) as f32
    } else {
        0.0
    };

    StructuralMetrics {
        overlap_event_count,
        non_monotonic_event_count,
        out_of_bounds_duration_count: to_u32(out_of_bounds_duration_count),
        gap_ratio,
    }
}

pub fn write_report(path: &Path, report: &TrackReport) -> Result<(), CaptionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CaptionError::io("create report directory", e))?;
    }
    let mut file = File::create(path).map_err(|e| CaptionError::io("create report file", e))?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|e| CaptionError::json("serialize track report", e))?;
    file.write_all(b"\n")
        .map_err(|e| CaptionError::io("finalize report file", e))?;
    Ok(())
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
