use chrono::Duration;

/// One "word" is five characters of input, regardless of whitespace.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Speed and accuracy snapshot, recomputed after every keystroke or tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveMetrics {
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
}

impl Default for LiveMetrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            raw_wpm: 0,
            accuracy: 100,
        }
    }
}

/// Compute metrics from the number of matched characters, the number of
/// mismatched keystrokes and the typing time measured from the first keystroke.
///
/// `elapsed` is `None` before typing begins. A zero or negative elapsed time
/// yields 0 wpm, and no attempts at all yields 100% accuracy.
pub fn compute(cursor: usize, errors: usize, elapsed: Option<Duration>) -> LiveMetrics {
    let elapsed_minutes = elapsed
        .map(|d| d.num_milliseconds() as f64 / 60_000.0)
        .unwrap_or(0.0);

    let words_typed = cursor as f64 / CHARS_PER_WORD;
    let raw_words_typed = (cursor + errors) as f64 / CHARS_PER_WORD;

    let (wpm, raw_wpm) = if elapsed_minutes > 0.0 {
        (
            (words_typed / elapsed_minutes).round() as u32,
            (raw_words_typed / elapsed_minutes).round() as u32,
        )
    } else {
        (0, 0)
    };

    LiveMetrics {
        wpm,
        raw_wpm,
        accuracy: accuracy(cursor, errors),
    }
}

/// Percentage of attempted keystrokes that matched, rounded to the nearest integer.
pub fn accuracy(correct: usize, incorrect: usize) -> u32 {
    let attempts = correct + incorrect;
    if attempts == 0 {
        return 100;
    }
    (100.0 * correct as f64 / attempts as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_elapsed_time_is_zero_wpm() {
        let m = compute(10, 2, None);
        assert_eq!(m.wpm, 0);
        assert_eq!(m.raw_wpm, 0);
        assert_eq!(m.accuracy, 83);
    }

    #[test]
    fn test_zero_duration_is_guarded() {
        let m = compute(10, 0, Some(Duration::zero()));
        assert_eq!(m.wpm, 0);
        assert_eq!(m.raw_wpm, 0);
    }

    #[test]
    fn test_negative_duration_is_guarded() {
        let m = compute(10, 0, Some(Duration::seconds(-5)));
        assert_eq!(m.wpm, 0);
    }

    #[test]
    fn test_no_attempts_is_full_accuracy() {
        assert_eq!(compute(0, 0, Some(Duration::seconds(30))).accuracy, 100);
    }

    #[test]
    fn test_three_chars_in_one_minute() {
        let m = compute(3, 0, Some(Duration::minutes(1)));
        // 0.6 words rounds up to 1
        assert_eq!(m.wpm, 1);
        assert_eq!(m.raw_wpm, 1);
        assert_eq!(m.accuracy, 100);
    }

    #[test]
    fn test_raw_wpm_counts_errors() {
        // 50 correct + 10 wrong in 30 seconds
        let m = compute(50, 10, Some(Duration::seconds(30)));
        assert_eq!(m.wpm, 20);
        assert_eq!(m.raw_wpm, 24);
        assert_eq!(m.accuracy, 83);
    }

    #[test]
    fn test_accuracy_bounds() {
        assert_eq!(accuracy(0, 7), 0);
        assert_eq!(accuracy(7, 0), 100);
        assert_eq!(accuracy(3, 1), 75);
        assert_eq!(accuracy(1, 2), 33);
    }

    #[test]
    fn test_default_metrics() {
        let m = LiveMetrics::default();
        assert_eq!(m.wpm, 0);
        assert_eq!(m.accuracy, 100);
    }
}
