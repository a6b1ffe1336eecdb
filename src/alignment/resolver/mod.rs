use crate::alignment::tokenization::{normalize_for_match, total_word_count};
use crate::config::CaptionTimingConfig;
use crate::types::{ScriptLine, TimingSource, TranscribedWord, WordTiming};

mod bridging;
mod window;

use window::WindowNeighbors;

/// An interval located from transcript evidence, before ordering and clamping.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Located {
    start: f64,
    end: f64,
    source: TimingSource,
}

/// Assigns an interval to every script word, in script order.
///
/// The running clock starts at zero and advances to each resolved word's end,
/// plus `line_break_duration` after every line. Transcript entries must have
/// finite times; ordering by start is used only as a search aid.
///
/// # Panics
///
/// Panics if `config.min_word_duration > config.max_word_duration`. Configs
/// that pass [`CaptionTimingConfig::validate`] never do.
pub fn resolve_word_timings(
    lines: &[ScriptLine],
    transcript: &[TranscribedWord],
    config: &CaptionTimingConfig,
) -> Vec<WordTiming> {
    let mut timings = Vec::with_capacity(total_word_count(lines));
    let mut current_time = 0.0f64;

    for (line_idx, line) in lines.iter().enumerate() {
        let keys: Vec<String> = line.words.iter().map(|w| normalize_for_match(w)).collect();
        let mut previous_end: Option<f64> = None;

        for (word_idx, word) in line.words.iter().enumerate() {
            let located = locate_in_transcript(
                &keys[word_idx],
                current_time,
                transcript,
                config.search_window,
            )
            .or_else(|| {
                if !config.neighbor_bridging {
                    return None;
                }
                let prev_key = word_idx.checked_sub(1).map(|i| keys[i].as_str());
                let next_key = keys.get(word_idx + 1).map(String::as_str);
                bridging::bridge_from_script_neighbors(
                    prev_key,
                    next_key,
                    current_time,
                    transcript,
                    config,
                )
                .map(|(start, end)| Located {
                    start,
                    end,
                    source: TimingSource::NeighborBridged,
                })
            })
            .unwrap_or_else(|| {
                let start = current_time + config.word_gap;
                Located {
                    start,
                    end: start + config.min_word_duration,
                    source: TimingSource::Fallback,
                }
            });

            let start = match previous_end {
                Some(prev_end) => located.start.max(prev_end + config.word_gap),
                None => located.start,
            };
            let duration = config.clamp_duration(located.end - start);
            let end = start + duration;
            debug_assert!(duration > 0.0, "non-positive duration for {word:?}");

            tracing::debug!(
                line = line_idx,
                word = word.as_str(),
                source = located.source.as_str(),
                start = format!("{start:.3}"),
                end = format!("{end:.3}"),
                "resolver: word timing"
            );

            timings.push(WordTiming {
                word: word.clone(),
                start,
                end,
                duration,
                source: located.source,
            });
            previous_end = Some(end);
            current_time = end;
        }

        current_time += config.line_break_duration;
    }

    timings
}

/// Exact match anywhere in the transcript (first occurrence wins), otherwise
/// interpolation between window neighbors of `current_time`.
pub(crate) fn locate_in_transcript(
    key: &str,
    current_time: f64,
    transcript: &[TranscribedWord],
    search_window: f64,
) -> Option<Located> {
    if !key.is_empty() {
        // First occurrence regardless of distance to the clock: repeated words
        // all map onto the earliest utterance.
        if let Some(hit) = transcript
            .iter()
            .find(|candidate| normalize_for_match(&candidate.text) == key)
        {
            return Some(Located {
                start: hit.start,
                end: hit.end,
                source: TimingSource::ExactMatch,
            });
        }
    }

    let window = WindowNeighbors::collect(transcript, current_time, search_window)?;
    let (start, end) = window.interpolate();
    Some(Located {
        start,
        end,
        source: TimingSource::Interpolated,
    })
}
