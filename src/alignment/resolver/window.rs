use crate::types::TranscribedWord;

/// Transcript words starting within the search window of the running clock.
pub(crate) struct WindowNeighbors<'a> {
    before: Option<&'a TranscribedWord>,
    after: Option<&'a TranscribedWord>,
    mean_duration: f64,
}

impl<'a> WindowNeighbors<'a> {
    /// Returns `None` when no transcript word starts within `search_window` of `current_time`.
    ///
    /// Candidates are scanned in transcript order: `before` is the last candidate
    /// starting strictly before the clock ahead of the first candidate at or after it.
    pub(crate) fn collect(
        transcript: &'a [TranscribedWord],
        current_time: f64,
        search_window: f64,
    ) -> Option<Self> {
        let candidates: Vec<&TranscribedWord> = transcript
            .iter()
            .filter(|word| (word.start - current_time).abs() < search_window)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let mean_duration =
            candidates.iter().map(|word| word.duration()).sum::<f64>() / candidates.len() as f64;

        let mut before = None;
        let mut after = None;
        for candidate in candidates {
            if candidate.start < current_time {
                before = Some(candidate);
            } else {
                after = Some(candidate);
                break;
            }
        }

        Some(Self {
            before,
            after,
            mean_duration,
        })
    }

    pub(crate) fn mean_duration(&self) -> f64 {
        self.mean_duration
    }

    /// Places a word between its transcript neighbors as `(start, end)`.
    pub(crate) fn interpolate(&self) -> (f64, f64) {
        let mean = self.mean_duration();
        match (self.before, self.after) {
            (Some(before), Some(after)) => {
                let start = before.end + (after.start - before.end) / 2.0;
                (start, start + mean)
            }
            (Some(before), None) => (before.end, before.end + mean),
            (None, Some(after)) => (after.start - mean, after.start),
            // collect() never builds a window without at least one candidate
            (None, None) => unreachable!("window without candidates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, start: f64, end: f64) -> TranscribedWord {
        TranscribedWord::new(text, start, end)
    }

    #[test]
    fn empty_window_yields_none() {
        let transcript = vec![w("far", 10.0, 10.3)];
        assert!(WindowNeighbors::collect(&transcript, 0.0, 2.0).is_none());
        assert!(WindowNeighbors::collect(&[], 0.0, 2.0).is_none());
    }

    #[test]
    fn window_bound_is_exclusive() {
        let transcript = vec![w("edge", 2.0, 2.2)];
        assert!(WindowNeighbors::collect(&transcript, 0.0, 2.0).is_none());
        assert!(WindowNeighbors::collect(&transcript, 0.01, 2.0).is_some());
    }

    #[test]
    fn interpolates_at_gap_midpoint_with_mean_duration() {
        let transcript = vec![w("a", 0.0, 0.4), w("b", 1.4, 1.6)];
        let window = WindowNeighbors::collect(&transcript, 0.5, 2.0).unwrap();
        assert!((window.mean_duration() - 0.3).abs() < 1e-9);
        let (start, end) = window.interpolate();
        assert!((start - 0.9).abs() < 1e-9);
        assert!((end - 1.2).abs() < 1e-9);
    }

    #[test]
    fn only_before_starts_at_its_end() {
        let transcript = vec![w("a", 0.0, 0.2), w("b", 0.3, 0.7)];
        let window = WindowNeighbors::collect(&transcript, 1.0, 2.0).unwrap();
        let (start, end) = window.interpolate();
        assert!((start - 0.7).abs() < 1e-9);
        assert!((end - 1.0).abs() < 1e-9);
    }

    #[test]
    fn only_after_ends_at_its_start() {
        let transcript = vec![w("a", 1.0, 1.2), w("b", 1.5, 1.9)];
        let window = WindowNeighbors::collect(&transcript, 0.5, 2.0).unwrap();
        let (start, end) = window.interpolate();
        assert!((end - 1.0).abs() < 1e-9);
        assert!((start - 0.7).abs() < 1e-9);
    }

    #[test]
    fn first_after_stops_the_scan() {
        // "c" starts before the clock but comes after the first "after" in transcript order.
        let transcript = vec![w("a", 0.2, 0.4), w("b", 1.2, 1.4), w("c", 0.6, 0.8)];
        let window = WindowNeighbors::collect(&transcript, 1.0, 2.0).unwrap();
        let (start, _) = window.interpolate();
        // midpoint of a.end (0.4) and b.start (1.2)
        assert!((start - 0.8).abs() < 1e-9);
    }
}
