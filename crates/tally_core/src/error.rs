use thiserror::Error;

/// Rejections raised while building a recurrence rule from raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("day of week {0} is outside 0-6 (0 = Sunday)")]
    InvalidWeekday(u8),
    #[error("day of month {0} is outside 1-31")]
    InvalidDayOfMonth(u8),
    #[error("`{kind}` recurrence requires `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("unknown recurrence type `{0}`")]
    UnknownKind(String),
    #[error("unknown monthly recurrence type `{0}`")]
    UnknownMonthlyKind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("due time `{0}` is neither HH:MM nor `all_day`")]
    InvalidDueTime(String),
    #[error("unknown task `{0}`")]
    UnknownTask(String),
}
