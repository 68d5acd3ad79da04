//! Challenge engine: the state machine plus the celebration delay.
//!
//! The engine does not use internal threads or timers. A completed day moves
//! it into `PendingAdvance`; the caller is responsible for calling `tick()`
//! with the current time until the deferred increment is applied.
//!
//! ## Phases
//!
//! ```text
//! Active --complete_day (all done)--> PendingAdvance --tick (deadline)--> Active
//! ```
//!
//! While an advance is pending, toggles and repeat completions are ignored.
//! `reset_progress` works from either phase and drops the pending advance.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::state::{ChallengeState, DayOutcome, STRIKE_LIMIT};
use super::tasks::TaskKey;
use crate::events::{Event, ResetReason};

/// Default celebration window between a completed day and its increment.
pub const DEFAULT_CELEBRATION_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Active,
    /// Completion recorded, increment applied at `until`.
    PendingAdvance { until: DateTime<Utc> },
}

/// Core challenge engine.
#[derive(Debug, Clone)]
pub struct ChallengeEngine {
    state: ChallengeState,
    phase: Phase,
    celebration: Duration,
}

impl ChallengeEngine {
    pub fn new(state: ChallengeState) -> Self {
        Self::with_celebration(state, Duration::milliseconds(DEFAULT_CELEBRATION_MS as i64))
    }

    pub fn with_celebration(state: ChallengeState, celebration: Duration) -> Self {
        Self {
            state,
            phase: Phase::Active,
            celebration: celebration.max(Duration::zero()),
        }
    }

    /// Restore a pending advance that outlived a previous process.
    pub fn resume_pending(&mut self, until: DateTime<Utc>) {
        self.phase = Phase::PendingAdvance { until };
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &ChallengeState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_until(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::PendingAdvance { until } => Some(until),
            Phase::Active => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_until().is_some()
    }

    pub fn snapshot(&self) -> Event {
        let milestone = self.state.next_milestone();
        Event::StateSnapshot {
            day: self.state.day,
            strikes: self.state.strikes,
            strike_limit: STRIKE_LIMIT,
            last_completed_date: self.state.last_completed_date,
            completed: self.state.tasks.completed_count(),
            total: self.state.tasks.total_count(),
            day_complete: self.state.is_day_complete(),
            next_milestone: *milestone,
            days_to_milestone: milestone.days_remaining(self.state.day),
            pending_advance_until: self.pending_until(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle(&mut self, key: TaskKey) -> Option<Event> {
        if self.is_pending() {
            tracing::debug!(%key, "toggle ignored while advance is pending");
            return None;
        }
        self.state = self.state.toggle_task(key);
        Some(Event::TaskToggled {
            category: key.category(),
            item: key.item(),
            done: self.state.tasks.is_done(key),
            completed: self.state.tasks.completed_count(),
            total: self.state.tasks.total_count(),
        })
    }

    /// End the current day at wall-clock `now`, stamping `today` on success.
    pub fn complete_day(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Option<Event> {
        if self.is_pending() {
            tracing::debug!("day already completed, waiting for advance");
            return None;
        }
        let day = self.state.day;
        let outcome = self.state.advance_day(today);
        self.state = outcome.into_state();

        match outcome {
            DayOutcome::Completed(_) => {
                let until = now
                    .checked_add_signed(self.celebration)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                self.phase = Phase::PendingAdvance { until };
                tracing::debug!(day, %today, %until, "day completed");
                Some(Event::DayCompleted {
                    day,
                    date: today,
                    advance_at: until,
                })
            }
            DayOutcome::Strike(state) => {
                tracing::debug!(day, strikes = state.strikes, "strike added");
                Some(Event::StrikeAdded {
                    day: state.day,
                    strikes: state.strikes,
                    strike_limit: STRIKE_LIMIT,
                })
            }
            DayOutcome::StruckOut(_) => {
                tracing::debug!(day, "strike limit reached, challenge restarted");
                Some(Event::ChallengeReset {
                    reason: ResetReason::Strikes,
                })
            }
        }
    }

    /// Call periodically. Applies the pending advance once `now` reaches its
    /// deadline and returns `Some(Event::DayAdvanced)`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.phase {
            Phase::PendingAdvance { until } if now >= until => self.finish_pending(),
            _ => None,
        }
    }

    /// Apply a pending advance without waiting for its deadline.
    pub fn finish_pending(&mut self) -> Option<Event> {
        if !self.is_pending() {
            return None;
        }
        self.state = self.state.finish_advance();
        self.phase = Phase::Active;
        tracing::debug!(day = self.state.day, strikes = self.state.strikes, "day advanced");
        Some(Event::DayAdvanced {
            day: self.state.day,
            strikes: self.state.strikes,
        })
    }

    pub fn reset_progress(&mut self) -> Option<Event> {
        self.state = self.state.reset_progress();
        self.phase = Phase::Active;
        Some(Event::ChallengeReset {
            reason: ResetReason::Manual,
        })
    }
}
