use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agenda::AgendaEntry;
use crate::calendar::calendar_days_between;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub streak: u32,
    pub last_check: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// First evaluation ever; only the check date is recorded.
    Started,
    /// Already evaluated today, or the last check lies in the future.
    AlreadyChecked,
    Extended,
    /// Yesterday had at least one incomplete due task.
    Reset,
    /// One or more whole days went unchecked.
    Lapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub state: StreakState,
    pub outcome: StreakOutcome,
}

impl StreakUpdate {
    pub fn changed(&self) -> bool {
        self.outcome != StreakOutcome::AlreadyChecked
    }
}

/// Advances `state` to `today`. `yesterday` must be the agenda for the day
/// before `today`; it is only consulted when the last check was exactly one
/// day ago. An empty agenda counts as fully completed.
pub fn update_streak(
    state: StreakState,
    today: NaiveDate,
    yesterday: &[AgendaEntry],
) -> StreakUpdate {
    let Some(last_check) = state.last_check else {
        return StreakUpdate {
            state: StreakState {
                streak: state.streak,
                last_check: Some(today),
            },
            outcome: StreakOutcome::Started,
        };
    };

    let (streak, outcome) = match calendar_days_between(last_check, today) {
        days if days <= 0 => {
            return StreakUpdate {
                state,
                outcome: StreakOutcome::AlreadyChecked,
            }
        }
        1 if yesterday.iter().all(|entry| entry.is_complete) => {
            (state.streak.saturating_add(1), StreakOutcome::Extended)
        }
        1 => (0, StreakOutcome::Reset),
        _ => (0, StreakOutcome::Lapsed),
    };

    StreakUpdate {
        state: StreakState {
            streak,
            last_check: Some(today),
        },
        outcome,
    }
}
