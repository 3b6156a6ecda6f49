use crate::history::History;

/// WPM needed for Speed Demon
pub const SPEED_DEMON_WPM: u32 = 60;
/// Streak needed for Consistent
pub const CONSISTENT_DAYS: u32 = 3;
const MARATHON_MODE: &str = "2 minutes";

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Achievement {
    #[strum(to_string = "Speed Demon")]
    SpeedDemon,
    #[strum(to_string = "Perfect Typist")]
    PerfectTypist,
    #[strum(to_string = "Marathon Runner")]
    MarathonRunner,
    #[strum(to_string = "Consistent")]
    Consistent,
}

pub const ALL: [Achievement; 4] = [
    Achievement::SpeedDemon,
    Achievement::PerfectTypist,
    Achievement::MarathonRunner,
    Achievement::Consistent,
];

impl Achievement {
    pub fn requirement(&self) -> &'static str {
        match self {
            Achievement::SpeedDemon => "60+ WPM",
            Achievement::PerfectTypist => "100% Accuracy",
            Achievement::MarathonRunner => "Complete 2min test",
            Achievement::Consistent => "3 day streak",
        }
    }

    pub fn icon(&self) -> char {
        match self {
            Achievement::SpeedDemon => '⚡',
            Achievement::PerfectTypist => '🎯',
            Achievement::MarathonRunner => '🏃',
            Achievement::Consistent => '🔥',
        }
    }

    pub fn is_unlocked(&self, history: &History, streak: u32) -> bool {
        let mut entries = history.entries().iter();
        match self {
            Achievement::SpeedDemon => entries.any(|r| r.wpm >= SPEED_DEMON_WPM),
            Achievement::PerfectTypist => entries.any(|r| r.accuracy == 100),
            Achievement::MarathonRunner => entries.any(|r| r.mode == MARATHON_MODE),
            Achievement::Consistent => streak >= CONSISTENT_DAYS,
        }
    }
}

/// Each achievement paired with whether it has been earned.
pub fn evaluate(history: &History, streak: u32) -> Vec<(Achievement, bool)> {
    ALL.iter()
        .map(|a| (*a, a.is_unlocked(history, streak)))
        .collect()
}
