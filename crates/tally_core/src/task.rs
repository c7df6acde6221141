use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaskError;
use crate::recurrence::Recurrence;

const ALL_DAY: &str = "all_day";

/// Display-only time of day attached to a task. Never consulted when
/// deciding whether a task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DueTime {
    AllDay,
    At(NaiveTime),
}

impl FromStr for DueTime {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == ALL_DAY {
            return Ok(DueTime::AllDay);
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(DueTime::At)
            .map_err(|_| TaskError::InvalidDueTime(s.to_string()))
    }
}

impl TryFrom<String> for DueTime {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DueTime> for String {
    fn from(value: DueTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueTime::AllDay => f.write_str(ALL_DAY),
            DueTime::At(time) => write!(f, "{}", time.format("%H:%M")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<DueTime>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Local calendar date the task was created on; anchors anchor-mode
    /// biweekly parity. Viewed dates are local too, so both sides of the week
    /// difference agree.
    pub fn created_on(&self) -> NaiveDate {
        self.created_on_in(&Local)
    }

    pub fn created_on_in<Tz: TimeZone>(&self, zone: &Tz) -> NaiveDate {
        self.created_at.with_timezone(zone).date_naive()
    }
}

/// Marks `task_id` as done on one calendar day. At most one exists per
/// (task, date) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub id: String,
    pub task_id: String,
    pub completion_date: NaiveDate,
}

impl TaskCompletion {
    pub fn matches(&self, task_id: &str, date: NaiveDate) -> bool {
        self.task_id == task_id && self.completion_date == date
    }
}

/// Fields supplied by the user when creating a task; the repository assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub recurrence: Recurrence,
    #[serde(default)]
    pub due_time: Option<DueTime>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, recurrence: Recurrence) -> Self {
        Self {
            title: title.into(),
            recurrence,
            due_time: None,
        }
    }

    pub fn with_due_time(mut self, due_time: DueTime) -> Self {
        self.due_time = Some(due_time);
        self
    }

    pub fn validate(mut self) -> Result<Self, TaskError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        self.title = title.to_string();
        Ok(self)
    }

    pub fn into_task(self, id: String, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            recurrence: self.recurrence,
            due_time: self.due_time,
            created_at,
        }
    }
}
