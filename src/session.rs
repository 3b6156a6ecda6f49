use chrono::{DateTime, Local};
use thiserror::Error;

use crate::catalog::{Lesson, PracticeMode};
use crate::history::{display_date, TestResult};
use crate::metrics::{self, LiveMetrics};
use crate::timer::Countdown;

/// What the user chose to type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Timed(PracticeMode),
    Lesson(Lesson),
    /// User-supplied text, untimed
    Custom,
}

impl SessionKind {
    /// Label stored with the result
    pub fn mode_label(&self) -> String {
        match self {
            SessionKind::Timed(mode) => mode.full_name.to_string(),
            SessionKind::Lesson(lesson) => format!("Lesson: {}", lesson.name),
            SessionKind::Custom => "Lesson: Custom".to_string(),
        }
    }

    pub fn time_budget_secs(&self) -> Option<u32> {
        match self {
            SessionKind::Timed(mode) => Some(mode.duration_secs),
            SessionKind::Lesson(_) | SessionKind::Custom => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first keystroke
    Idle,
    Active,
    Completed,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Cancelled)
    }
}

/// Engine input. Modifier and special keys never get this far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Result of feeding one event into a session
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Nothing changed
    Ignored,
    Typed {
        outcome: Outcome,
        metrics: LiveMetrics,
    },
    Ticked {
        remaining_secs: u32,
        metrics: LiveMetrics,
    },
    /// Emitted exactly once per session
    Completed(TestResult),
    Cancelled,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a session with empty text")]
    EmptyText,
}

/// One run of a timed test or lesson.
///
/// Tracks the cursor through the target text and the number of mismatched
/// keystrokes. A mismatch never moves the cursor; the expected character
/// must be typed before the session advances. Once completed or cancelled
/// the session ignores further input.
#[derive(Debug)]
pub struct Session {
    text: String,
    target: Vec<char>,
    kind: SessionKind,
    cursor: usize,
    errors: usize,
    created_at: DateTime<Local>,
    started_at: Option<DateTime<Local>>,
    completed_at: Option<DateTime<Local>>,
    countdown: Option<Countdown>,
    metrics: LiveMetrics,
    result: Option<TestResult>,
    cancelled: bool,
}

impl Session {
    pub fn new(
        text: impl Into<String>,
        kind: SessionKind,
        now: DateTime<Local>,
    ) -> Result<Self, SessionError> {
        let text = text.into();
        if text.is_empty() {
            return Err(SessionError::EmptyText);
        }

        log::info!("starting session: {}", kind.mode_label());

        Ok(Self {
            target: text.chars().collect(),
            text,
            countdown: kind
                .time_budget_secs()
                .map(|secs| Countdown::new(secs, now)),
            kind,
            cursor: 0,
            errors: 0,
            created_at: now,
            started_at: None,
            completed_at: None,
            metrics: LiveMetrics::default(),
            result: None,
            cancelled: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    pub fn phase(&self) -> Phase {
        if self.cancelled {
            Phase::Cancelled
        } else if self.completed_at.is_some() {
            Phase::Completed
        } else if self.started_at.is_some() {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    /// Character expected next, if any
    pub fn expected_char(&self) -> Option<char> {
        self.target.get(self.cursor).copied()
    }

    /// Already matched part of the text
    pub fn typed(&self) -> &[char] {
        &self.target[..self.cursor]
    }

    /// Part of the text after the expected character
    pub fn upcoming(&self) -> &[char] {
        let start = (self.cursor + 1).min(self.target.len());
        &self.target[start..]
    }

    /// Metrics as of the last keystroke or tick
    pub fn metrics(&self) -> LiveMetrics {
        self.metrics
    }

    /// Metrics recomputed at `now`; frozen at completion time once finished
    pub fn live_metrics(&self, now: DateTime<Local>) -> LiveMetrics {
        let until = self.completed_at.unwrap_or(now);
        metrics::compute(
            self.cursor,
            self.errors,
            self.started_at.map(|start| until - start),
        )
    }

    /// Seconds left for timed sessions
    pub fn remaining_secs(&self, now: DateTime<Local>) -> Option<u32> {
        let countdown = self.countdown.as_ref()?;
        match self.completed_at {
            Some(done) => Some(countdown.remaining_secs(done)),
            None => Some(countdown.remaining_secs(now)),
        }
    }

    pub fn submit(&mut self, key: Keystroke, now: DateTime<Local>) -> Step {
        if self.phase().is_terminal() {
            return Step::Ignored;
        }

        let c = match key {
            Keystroke::Cancel => return self.cancel(),
            Keystroke::Char(c) if c.is_control() => return Step::Ignored,
            Keystroke::Char(c) => c,
        };

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        let outcome = if self.expected_char() == Some(c) {
            self.cursor += 1;
            if self.cursor == self.target.len() {
                return match self.finish(now) {
                    Some(result) => Step::Completed(result),
                    None => Step::Ignored,
                };
            }
            Outcome::Correct
        } else {
            self.errors += 1;
            log::debug!(
                "mismatch at {}: expected {:?}, got {:?}",
                self.cursor,
                self.expected_char(),
                c
            );
            Outcome::Incorrect
        };

        self.metrics = self.live_metrics(now);
        Step::Typed {
            outcome,
            metrics: self.metrics,
        }
    }

    /// Advance the countdown. Untimed and finished sessions ignore ticks.
    pub fn tick(&mut self, now: DateTime<Local>) -> Step {
        if self.phase().is_terminal() {
            return Step::Ignored;
        }
        let Some(countdown) = self.countdown.as_ref() else {
            return Step::Ignored;
        };

        if countdown.is_expired(now) {
            return match self.finish(now) {
                Some(result) => Step::Completed(result),
                None => Step::Ignored,
            };
        }

        let remaining_secs = countdown.remaining_secs(now);
        self.metrics = self.live_metrics(now);
        Step::Ticked {
            remaining_secs,
            metrics: self.metrics,
        }
    }

    /// Complete the session and build its result.
    ///
    /// Only the first call on a live session produces a result; later calls,
    /// and calls on a cancelled session, return `None`.
    pub fn finish(&mut self, now: DateTime<Local>) -> Option<TestResult> {
        if self.phase().is_terminal() {
            return None;
        }

        self.completed_at = Some(now);
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.cancel();
        }

        self.metrics = self.live_metrics(now);
        let result = TestResult {
            wpm: self.metrics.wpm,
            raw_wpm: self.metrics.raw_wpm,
            accuracy: self.metrics.accuracy,
            errors: u32::try_from(self.errors).unwrap_or(u32::MAX),
            mode: self.kind.mode_label(),
            date: display_date(now),
            timestamp: now.timestamp_millis(),
        };

        log::info!(
            "session complete: {} wpm, {} raw, {}% acc, {} errors ({})",
            result.wpm,
            result.raw_wpm,
            result.accuracy,
            result.errors,
            result.mode
        );

        self.result = Some(result.clone());
        Some(result)
    }

    /// Abandon the session; its countdown can no longer fire.
    pub fn cancel(&mut self) -> Step {
        if self.phase().is_terminal() {
            return Step::Ignored;
        }
        self.cancelled = true;
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.cancel();
        }
        log::info!("session cancelled at {}/{}", self.cursor, self.target.len());
        Step::Cancelled
    }
}
