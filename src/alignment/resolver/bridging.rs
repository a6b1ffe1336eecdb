use super::{locate_in_transcript, Located};
use crate::config::CaptionTimingConfig;
use crate::types::TranscribedWord;

/// Borrows timing from the adjacent script words of the same line.
///
/// Only consulted once the word itself has neither an exact match nor window
/// candidates; returns `None` when neither neighbor can be located either.
pub(crate) fn bridge_from_script_neighbors(
    prev_key: Option<&str>,
    next_key: Option<&str>,
    current_time: f64,
    transcript: &[TranscribedWord],
    config: &CaptionTimingConfig,
) -> Option<(f64, f64)> {
    let lookup = |key: Option<&str>| -> Option<Located> {
        key.and_then(|key| locate_in_transcript(key, current_time, transcript, config.search_window))
    };
    let prev = lookup(prev_key);
    let next = lookup(next_key);

    match (prev, next) {
        (Some(prev), Some(next)) => {
            let start = prev.end + config.word_gap;
            let end = next.start - config.word_gap;
            let duration = (end - start).min(config.max_word_duration);
            Some((start, start + duration))
        }
        (Some(prev), None) => {
            let start = prev.end + config.word_gap;
            Some((start, start + config.min_word_duration))
        }
        (None, Some(next)) => {
            let end = next.start - config.word_gap;
            Some((end - config.min_word_duration, end))
        }
        (None, None) => None,
    }
}
