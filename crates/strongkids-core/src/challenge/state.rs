//! Challenge state and its pure transitions.
//!
//! Every transition takes `&self` and returns a new value; nothing here
//! touches storage or the clock. [`super::ChallengeEngine`] layers the
//! celebration delay on top and [`crate::session::ChallengeSession`] persists
//! the result.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::milestone::{next_milestone, Milestone};
use super::tasks::{TaskBoard, TaskKey};
use crate::error::{CoreError, Result, ValidationError};

/// Strikes that force a restart from day 1.
pub const STRIKE_LIMIT: u32 = 3;

/// Date-string layout written by older snapshots (`Sun Oct 18 2026`).
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Snapshot of the whole challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    pub day: u32,
    pub strikes: u32,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub last_completed_date: Option<NaiveDate>,
    pub tasks: TaskBoard,
}

impl Default for ChallengeState {
    fn default() -> Self {
        Self {
            day: 1,
            strikes: 0,
            last_completed_date: None,
            tasks: TaskBoard::default(),
        }
    }
}

/// Result of ending a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// Every item was done. The completion date is recorded; the day
    /// increment waits for [`ChallengeState::finish_advance`].
    Completed(ChallengeState),
    /// Items were missing; one more strike, same day, tasks untouched.
    Strike(ChallengeState),
    /// The strike limit was hit and the challenge restarted at day 1.
    StruckOut(ChallengeState),
}

impl DayOutcome {
    pub fn state(&self) -> &ChallengeState {
        match self {
            DayOutcome::Completed(s) | DayOutcome::Strike(s) | DayOutcome::StruckOut(s) => s,
        }
    }

    pub fn into_state(self) -> ChallengeState {
        *self.state()
    }
}

impl ChallengeState {
    /// Flip one checklist item.
    #[must_use]
    pub fn toggle_task(&self, key: TaskKey) -> Self {
        Self {
            tasks: self.tasks.toggled(key),
            ..*self
        }
    }

    pub fn is_day_complete(&self) -> bool {
        self.tasks.is_complete()
    }

    /// End the current day.
    ///
    /// A complete checklist stamps `today` as the last completed date and
    /// returns [`DayOutcome::Completed`]; the caller applies
    /// [`finish_advance`](Self::finish_advance) once the celebration is over.
    /// An incomplete checklist adds a strike, restarting the challenge when
    /// the strike limit is reached.
    pub fn advance_day(&self, today: NaiveDate) -> DayOutcome {
        if self.is_day_complete() {
            return DayOutcome::Completed(Self {
                last_completed_date: Some(today),
                ..*self
            });
        }

        let strikes = self.strikes + 1;
        if strikes >= STRIKE_LIMIT {
            DayOutcome::StruckOut(Self {
                day: 1,
                strikes: 0,
                tasks: TaskBoard::default(),
                ..*self
            })
        } else {
            DayOutcome::Strike(Self { strikes, ..*self })
        }
    }

    /// Deferred half of a completed day: next day, fresh checklist, and one
    /// strike forgiven.
    #[must_use]
    pub fn finish_advance(&self) -> Self {
        Self {
            day: self.day.saturating_add(1),
            strikes: self.strikes.saturating_sub(1),
            tasks: TaskBoard::default(),
            ..*self
        }
    }

    /// Start over. Confirmation is the caller's responsibility.
    #[must_use]
    pub fn reset_progress(&self) -> Self {
        Self::default()
    }

    pub fn next_milestone(&self) -> &'static Milestone {
        next_milestone(self.day)
    }

    pub fn days_to_next_milestone(&self) -> u32 {
        self.next_milestone().days_remaining(self.day)
    }

    /// Serialize to the JSON snapshot stored in the persistence slot.
    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot, rejecting malformed JSON and unreachable values.
    pub fn try_from_snapshot(snapshot: &str) -> Result<Self> {
        let state: ChallengeState = serde_json::from_str(snapshot)?;
        if state.day == 0 {
            return Err(ValidationError::UnreachableSnapshot("day must be at least 1".into()).into());
        }
        if state.strikes >= STRIKE_LIMIT {
            return Err(ValidationError::UnreachableSnapshot(format!(
                "strikes must be below {STRIKE_LIMIT}, got {}",
                state.strikes
            ))
            .into());
        }
        Ok(state)
    }

    /// Parse a stored snapshot. `None` when there is nothing usable.
    pub fn restore(snapshot: Option<&str>) -> Option<Self> {
        match Self::try_from_snapshot(snapshot?) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable challenge snapshot");
                None
            }
        }
    }

    /// Parse a snapshot, falling back to a fresh challenge when the input is
    /// missing or unusable.
    pub fn from_snapshot(snapshot: Option<&str>) -> Self {
        Self::restore(snapshot).unwrap_or_default()
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_date(&raw).map(Some).map_err(serde::de::Error::custom)
}

/// Parse an ISO date or the legacy `Sun Oct 18 2026` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DATE_FORMAT))
        .map_err(|e| CoreError::Custom(format!("invalid date '{raw}': {e}")))
}
