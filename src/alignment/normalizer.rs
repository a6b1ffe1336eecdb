use crate::config::CaptionTimingConfig;
use crate::types::WordTiming;

/// Single forward pass that removes overlaps left across line boundaries.
///
/// Every interval after the first starts no earlier than the previous
/// normalized end plus `word_gap`, and keeps its resolved duration clamped to
/// the configured bounds. Later words absorb any shift.
///
/// The first interval's floor is `0.0`, not `0.0 + word_gap`: this departs
/// from seeding the pass with a last end of zero, so a track whose first word
/// is heard at the very start of the audio keeps starting at `0.0`.
///
/// # Panics
///
/// Panics if `config.min_word_duration > config.max_word_duration`. Configs
/// that pass [`CaptionTimingConfig::validate`] never do.
pub fn normalize_intervals(timings: &[WordTiming], config: &CaptionTimingConfig) -> Vec<WordTiming> {
    let mut normalized = Vec::with_capacity(timings.len());
    let mut last_end_time: Option<f64> = None;

    for timing in timings {
        let floor = match last_end_time {
            Some(last_end) => last_end + config.word_gap,
            None => 0.0,
        };
        let start = timing.start.max(floor);
        let duration = config.clamp_duration(timing.end - timing.start);
        debug_assert!(duration > 0.0, "non-positive duration for {:?}", timing.word);

        if start > timing.start {
            tracing::debug!(
                word = timing.word.as_str(),
                shift = format!("{:.3}", start - timing.start),
                "normalizer: shifted word to avoid overlap"
            );
        }

        let end = start + duration;
        normalized.push(WordTiming {
            word: timing.word.clone(),
            start,
            end,
            duration,
            source: timing.source,
        });
        last_end_time = Some(end);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimingSource;

    fn timing(word: &str, start: f64, end: f64) -> WordTiming {
        WordTiming {
            word: word.to_string(),
            start,
            end,
            duration: end - start,
            source: TimingSource::ExactMatch,
        }
    }

    #[test]
    fn regression_across_lines_is_pushed_forward() {
        let config = CaptionTimingConfig::default();
        // second line's first word was matched earlier than the previous line ended
        let timings = vec![timing("late", 1.0, 1.5), timing("early", 0.2, 0.6)];
        let out = normalize_intervals(&timings, &config);
        assert!((out[1].start - 1.58).abs() < 1e-9);
        assert!((out[1].end - 1.98).abs() < 1e-9);
    }

    #[test]
    fn first_interval_is_not_delayed_by_gap() {
        let config = CaptionTimingConfig::default();
        let out = normalize_intervals(&[timing("hi", 0.0, 0.3)], &config);
        assert_eq!(out[0].start, 0.0);
        assert!((out[0].end - 0.3).abs() < 1e-9);
    }

    #[test]
    fn negative_start_is_lifted_to_zero() {
        let config = CaptionTimingConfig::default();
        let out = normalize_intervals(&[timing("hi", -0.2, 0.1)], &config);
        assert_eq!(out[0].start, 0.0);
        assert!((out[0].end - 0.3).abs() < 1e-9);
    }

    #[test]
    fn duration_uses_resolved_span_not_shifted_span() {
        let config = CaptionTimingConfig::default();
        let timings = vec![timing("a", 0.0, 0.8), timing("b", 0.5, 1.0)];
        let out = normalize_intervals(&timings, &config);
        assert!((out[1].start - 0.88).abs() < 1e-9);
        assert!((out[1].end - out[1].start - 0.5).abs() < 1e-9);
    }

    #[test]
    fn already_ordered_sequence_is_unchanged() {
        let config = CaptionTimingConfig::default();
        let timings = vec![timing("a", 0.0, 0.3), timing("b", 0.5, 0.9)];
        let out = normalize_intervals(&timings, &config);
        assert_eq!(out, timings);
    }

    #[test]
    fn duration_field_holds_the_clamped_value() {
        let config = CaptionTimingConfig::default();
        let timings = vec![timing("tiny", 0.1, 0.15), timing("huge", 1.0, 5.0)];
        let out = normalize_intervals(&timings, &config);
        assert_eq!(out[0].duration, config.min_word_duration);
        assert_eq!(out[1].duration, config.max_word_duration);
        assert_eq!(out[1].end, out[1].start + out[1].duration);
    }

    #[test]
    #[should_panic]
    fn inverted_duration_bounds_panic() {
        let config = CaptionTimingConfig {
            min_word_duration: 1.0,
            max_word_duration: 0.5,
            ..CaptionTimingConfig::default()
        };
        assert!(config.validate().is_err());
        normalize_intervals(&[timing("a", 0.0, 0.3)], &config);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_intervals(&[], &CaptionTimingConfig::default()).is_empty());
    }
}
