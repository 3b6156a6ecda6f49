use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Most recent results kept in history.
pub const MAX_HISTORY: usize = 50;

/// Final record of a completed session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub errors: u32,
    pub mode: String,
    pub date: String,
    /// Completion time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl TestResult {
    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Format used for [`TestResult::date`], e.g. `6/12/2024, 2:05:09 PM`.
pub fn display_date(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Completed results, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<TestResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<TestResult>) -> Self {
        entries.truncate(MAX_HISTORY);
        Self { entries }
    }

    /// Insert at the front and drop anything past [`MAX_HISTORY`].
    pub fn record(&mut self, result: TestResult) {
        self.entries.insert(0, result);
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn entries(&self) -> &[TestResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&TestResult> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_tests(&self) -> usize {
        self.entries.len()
    }

    pub fn best_wpm(&self) -> u32 {
        self.entries.iter().map(|r| r.wpm).max().unwrap_or(0)
    }

    pub fn avg_wpm(&self) -> u32 {
        rounded_mean(self.entries.iter().map(|r| r.wpm)).unwrap_or(0)
    }

    pub fn avg_accuracy(&self) -> u32 {
        rounded_mean(self.entries.iter().map(|r| r.accuracy)).unwrap_or(100)
    }

    /// Results completed on the same local calendar date as `now`.
    pub fn today_count(&self, now: DateTime<Local>) -> usize {
        let today = now.date_naive();
        self.entries
            .iter()
            .filter_map(TestResult::completed_at)
            .filter(|at| at.date_naive() == today)
            .count()
    }
}

fn rounded_mean(values: impl Iterator<Item = u32>) -> Option<u32> {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v as u64, count + 1));
    match count {
        0 => None,
        n => Some((sum as f64 / n as f64).round() as u32),
    }
}
