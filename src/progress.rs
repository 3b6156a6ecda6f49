use chrono::{DateTime, Local};

use crate::history::{History, TestResult};
use crate::store::{load_json, save_json, KeyValueStore, HISTORY_KEY, STREAK_KEY};
use crate::streak::{self, StreakRecord};

/// Result history and daily streak, backed by a key-value store.
///
/// Storage failures never surface to the caller: they are logged and the
/// in-memory state carries on.
#[derive(Debug)]
pub struct Progress<S> {
    store: S,
    history: History,
    streak: Option<StreakRecord>,
}

impl<S: KeyValueStore> Progress<S> {
    /// Load persisted history and streak. Missing or malformed values start empty.
    pub fn open(store: S) -> Self {
        let history = load_json::<Vec<TestResult>, _>(&store, HISTORY_KEY)
            .map(History::from_entries)
            .unwrap_or_default();
        let streak = load_json::<StreakRecord, _>(&store, STREAK_KEY);

        log::info!(
            "loaded {} past results, streak {:?}",
            history.len(),
            streak.as_ref().map(|s| s.count)
        );

        Self {
            store,
            history,
            streak,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn streak_record(&self) -> Option<&StreakRecord> {
        self.streak.as_ref()
    }

    /// Streak as shown on the dashboard; lapsed streaks show as 0.
    pub fn streak_count(&self, now: DateTime<Local>) -> u32 {
        self.streak
            .as_ref()
            .map(|record| record.displayed(now))
            .unwrap_or(0)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a finished session and bump the streak. Returns the new streak count.
    pub fn record_result(&mut self, result: TestResult, now: DateTime<Local>) -> u32 {
        self.history.record(result);
        if let Err(e) = save_json(&self.store, HISTORY_KEY, &self.history) {
            log::warn!("failed to save history: {e}");
        }

        self.update_streak(now)
    }

    /// Advance the streak from the record loaded at `open`. Never reads the
    /// store, so a queued backend does not stall the caller.
    pub fn update_streak(&mut self, now: DateTime<Local>) -> u32 {
        let next = streak::advance(self.streak.as_ref(), now);
        if let Err(e) = save_json(&self.store, STREAK_KEY, &next) {
            log::warn!("failed to save streak: {e}");
        }

        let count = next.count;
        self.streak = Some(next);
        count
    }
}
