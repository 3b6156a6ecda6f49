use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

/// Persisted streak state: consecutive active days and the last time a
/// session was completed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreakRecord {
    #[serde(rename = "streak")]
    pub count: u32,
    #[serde(rename = "lastDate")]
    pub last_active: DateTime<Local>,
}

/// How long after the last completed session a streak stays alive.
pub fn continuation_window() -> Duration {
    Duration::hours(24)
}

impl StreakRecord {
    pub fn first(now: DateTime<Local>) -> Self {
        Self {
            count: 1,
            last_active: now,
        }
    }

    fn same_day(&self, now: DateTime<Local>) -> bool {
        self.last_active.date_naive() == now.date_naive()
    }

    /// Whether `now` still falls inside the rolling window after the last
    /// activity. A last activity in the future counts as inside.
    fn within_window(&self, now: DateTime<Local>) -> bool {
        now - self.last_active <= continuation_window()
    }

    /// Streak to show on the dashboard; a streak that has lapsed shows 0.
    pub fn displayed(&self, now: DateTime<Local>) -> u32 {
        if self.same_day(now) || self.within_window(now) {
            self.count
        } else {
            0
        }
    }

    /// Record after completing a session at `now`.
    pub fn advanced(&self, now: DateTime<Local>) -> Self {
        let count = if self.same_day(now) {
            self.count.max(1)
        } else if self.within_window(now) {
            self.count.saturating_add(1)
        } else {
            1
        };
        Self {
            count,
            last_active: now,
        }
    }
}

/// Streak after completing a session, starting fresh when nothing was stored.
pub fn advance(previous: Option<&StreakRecord>, now: DateTime<Local>) -> StreakRecord {
    match previous {
        Some(record) => record.advanced(now),
        None => StreakRecord::first(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn record(count: u32, last_active: DateTime<Local>) -> StreakRecord {
        StreakRecord { count, last_active }
    }

    #[test]
    fn test_displayed_same_day() {
        assert_eq!(record(4, at(12, 8)).displayed(at(12, 22)), 4);
    }

    #[test]
    fn test_displayed_within_window() {
        assert_eq!(record(4, at(11, 22)).displayed(at(12, 20)), 4);
    }

    #[test]
    fn test_displayed_lapsed_after_thirty_hours() {
        let now = at(12, 18);
        let last = now - Duration::hours(30);
        assert_eq!(record(5, last).displayed(now), 0);
    }

    #[test]
    fn test_advance_same_day_keeps_count() {
        let next = record(3, at(12, 8)).advanced(at(12, 21));
        assert_eq!(next.count, 3);
        assert_eq!(next.last_active, at(12, 21));
    }

    #[test]
    fn test_advance_within_window_increments() {
        let next = record(3, at(11, 21)).advanced(at(12, 9));
        assert_eq!(next.count, 4);
    }

    #[test]
    fn test_advance_after_gap_restarts_at_one() {
        let now = at(12, 18);
        let next = record(9, now - Duration::hours(30)).advanced(now);
        assert_eq!(next.count, 1);
    }

    #[test]
    fn test_advance_from_nothing() {
        let next = advance(None, at(12, 9));
        assert_eq!(next, StreakRecord::first(at(12, 9)));
    }

    #[test]
    fn test_zero_count_same_day_becomes_one() {
        assert_eq!(record(0, at(12, 8)).advanced(at(12, 9)).count, 1);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&record(2, at(12, 9))).unwrap();
        assert!(json.contains("\"streak\":2"));
        assert!(json.contains("\"lastDate\":"));
    }

    #[test]
    fn test_reads_utc_timestamps() {
        let parsed: StreakRecord =
            serde_json::from_str(r#"{"streak":7,"lastDate":"2024-06-12T09:30:00.000Z"}"#).unwrap();
        assert_eq!(parsed.count, 7);
        assert_eq!(parsed.last_active.timestamp(), 1_718_184_600);
    }
}
