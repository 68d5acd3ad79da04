//! Events emitted by [`crate::ChallengeEngine`] for the view layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::challenge::{Category, Milestone};

/// Why the challenge went back to day 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// Third strike.
    Strikes,
    /// Explicit, confirmed reset by a parent.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TaskToggled {
        category: Category,
        item: &'static str,
        done: bool,
        completed: usize,
        total: usize,
    },
    /// Every item was done. Time to celebrate; the day advances at
    /// `advance_at`.
    DayCompleted {
        day: u32,
        date: NaiveDate,
        advance_at: DateTime<Utc>,
    },
    DayAdvanced {
        day: u32,
        strikes: u32,
    },
    StrikeAdded {
        day: u32,
        strikes: u32,
        strike_limit: u32,
    },
    ChallengeReset {
        reason: ResetReason,
    },
    StateSnapshot {
        day: u32,
        strikes: u32,
        strike_limit: u32,
        last_completed_date: Option<NaiveDate>,
        completed: usize,
        total: usize,
        day_complete: bool,
        next_milestone: Milestone,
        days_to_milestone: u32,
        pending_advance_until: Option<DateTime<Utc>>,
    },
}
