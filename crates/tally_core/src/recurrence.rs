use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::{weekday_from_index, weekday_index};
use crate::error::RecurrenceError;

/// Which pair of weeks a biweekly task occupies within a month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BiweeklyWeeks {
    FirstThird,
    SecondFourth,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeekOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekOrdinal {
    /// Week-of-month bucket for the numbered ordinals; `None` for `Last`.
    pub fn bucket(self) -> Option<u32> {
        match self {
            WeekOrdinal::First => Some(1),
            WeekOrdinal::Second => Some(2),
            WeekOrdinal::Third => Some(3),
            WeekOrdinal::Fourth => Some(4),
            WeekOrdinal::Last => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            WeekOrdinal::First => "First",
            WeekOrdinal::Second => "Second",
            WeekOrdinal::Third => "Third",
            WeekOrdinal::Fourth => "Fourth",
            WeekOrdinal::Last => "Last",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MonthEdge {
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthlyRule {
    /// Due on `day`; months shorter than `day` fall back to their last day.
    DayOfMonth { day: u8 },
    DayOfWeek {
        week: WeekOrdinal,
        day_of_week: Weekday,
    },
    FirstLastDay { position: MonthEdge },
}

/// Schedule of a task. Exactly one variant is active, and every field was
/// range-checked when the value was built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "RawRecurrence", into = "RawRecurrence")]
pub enum Recurrence {
    Daily,
    Weekly {
        day_of_week: Weekday,
    },
    Biweekly {
        day_of_week: Weekday,
        weeks: BiweeklyWeeks,
    },
    Monthly(MonthlyRule),
}

impl Recurrence {
    pub fn daily() -> Self {
        Recurrence::Daily
    }

    pub fn weekly(day_of_week: u8) -> Result<Self, RecurrenceError> {
        Ok(Recurrence::Weekly {
            day_of_week: parse_weekday(day_of_week)?,
        })
    }

    pub fn biweekly(day_of_week: u8, weeks: BiweeklyWeeks) -> Result<Self, RecurrenceError> {
        Ok(Recurrence::Biweekly {
            day_of_week: parse_weekday(day_of_week)?,
            weeks,
        })
    }

    pub fn monthly_on_day(day: u8) -> Result<Self, RecurrenceError> {
        if !(1..=31).contains(&day) {
            return Err(RecurrenceError::InvalidDayOfMonth(day));
        }
        Ok(Recurrence::Monthly(MonthlyRule::DayOfMonth { day }))
    }

    pub fn monthly_on_weekday(week: WeekOrdinal, day_of_week: u8) -> Result<Self, RecurrenceError> {
        Ok(Recurrence::Monthly(MonthlyRule::DayOfWeek {
            week,
            day_of_week: parse_weekday(day_of_week)?,
        }))
    }

    pub fn monthly_edge(position: MonthEdge) -> Self {
        Recurrence::Monthly(MonthlyRule::FirstLastDay { position })
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, Recurrence::Daily)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly { .. } => "weekly",
            Recurrence::Biweekly { .. } => "biweekly",
            Recurrence::Monthly(_) => "monthly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Daily => write!(f, "Every day"),
            Recurrence::Weekly { day_of_week } => write!(f, "Every {}", weekday_name(*day_of_week)),
            Recurrence::Biweekly { day_of_week, weeks } => {
                let pair = match weeks {
                    BiweeklyWeeks::FirstThird => "1st & 3rd",
                    BiweeklyWeeks::SecondFourth => "2nd & 4th",
                };
                write!(f, "{} {} of the month", pair, weekday_name(*day_of_week))
            }
            Recurrence::Monthly(MonthlyRule::DayOfMonth { day }) => {
                write!(f, "Monthly on day {}", day)
            }
            Recurrence::Monthly(MonthlyRule::DayOfWeek { week, day_of_week }) => {
                write!(f, "{} {} of the month", week.label(), weekday_name(*day_of_week))
            }
            Recurrence::Monthly(MonthlyRule::FirstLastDay { position }) => match position {
                MonthEdge::First => write!(f, "First day of the month"),
                MonthEdge::Last => write!(f, "Last day of the month"),
            },
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

fn parse_weekday(index: u8) -> Result<Weekday, RecurrenceError> {
    weekday_from_index(index).ok_or(RecurrenceError::InvalidWeekday(index))
}

/// Stored shape of a rule. Reading also accepts the older monthly form
/// (`dayOfMonth` plus `isLastDayOfMonth`, without `monthlyType`); writing
/// always emits the current form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecurrence {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    biweekly_weeks: Option<BiweeklyWeeks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monthly_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    week: Option<WeekOrdinal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<MonthEdge>,
    #[serde(default, skip_serializing)]
    day_of_month: Option<u8>,
    #[serde(default, skip_serializing)]
    is_last_day_of_month: Option<bool>,
}

impl TryFrom<RawRecurrence> for Recurrence {
    type Error = RecurrenceError;

    fn try_from(raw: RawRecurrence) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "daily" => Ok(Recurrence::Daily),
            "weekly" => {
                let day_of_week = raw.day_of_week.ok_or(RecurrenceError::MissingField {
                    kind: "weekly",
                    field: "dayOfWeek",
                })?;
                Recurrence::weekly(day_of_week)
            }
            "biweekly" => {
                let day_of_week = raw.day_of_week.ok_or(RecurrenceError::MissingField {
                    kind: "biweekly",
                    field: "dayOfWeek",
                })?;
                let weeks = raw.biweekly_weeks.ok_or(RecurrenceError::MissingField {
                    kind: "biweekly",
                    field: "biweeklyWeeks",
                })?;
                Recurrence::biweekly(day_of_week, weeks)
            }
            "monthly" => monthly_from_raw(&raw),
            other => Err(RecurrenceError::UnknownKind(other.to_string())),
        }
    }
}

fn monthly_from_raw(raw: &RawRecurrence) -> Result<Recurrence, RecurrenceError> {
    let Some(monthly_type) = raw.monthly_type.as_deref() else {
        if raw.is_last_day_of_month == Some(true) {
            return Ok(Recurrence::monthly_edge(MonthEdge::Last));
        }
        let day = raw
            .day_of_month
            .or(raw.day)
            .ok_or(RecurrenceError::MissingField {
                kind: "monthly",
                field: "dayOfMonth",
            })?;
        return Recurrence::monthly_on_day(day);
    };

    match monthly_type {
        "dayOfMonth" => {
            let day = raw.day.ok_or(RecurrenceError::MissingField {
                kind: "monthly/dayOfMonth",
                field: "day",
            })?;
            Recurrence::monthly_on_day(day)
        }
        "dayOfWeek" => {
            let week = raw.week.ok_or(RecurrenceError::MissingField {
                kind: "monthly/dayOfWeek",
                field: "week",
            })?;
            let day_of_week = raw.day_of_week.ok_or(RecurrenceError::MissingField {
                kind: "monthly/dayOfWeek",
                field: "dayOfWeek",
            })?;
            Recurrence::monthly_on_weekday(week, day_of_week)
        }
        "firstLastDay" => {
            let position = raw.position.ok_or(RecurrenceError::MissingField {
                kind: "monthly/firstLastDay",
                field: "position",
            })?;
            Ok(Recurrence::monthly_edge(position))
        }
        other => Err(RecurrenceError::UnknownMonthlyKind(other.to_string())),
    }
}

impl From<Recurrence> for RawRecurrence {
    fn from(rule: Recurrence) -> Self {
        let mut raw = RawRecurrence {
            kind: rule.kind().to_string(),
            ..RawRecurrence::default()
        };
        match rule {
            Recurrence::Daily => {}
            Recurrence::Weekly { day_of_week } => {
                raw.day_of_week = Some(weekday_index(day_of_week));
            }
            Recurrence::Biweekly { day_of_week, weeks } => {
                raw.day_of_week = Some(weekday_index(day_of_week));
                raw.biweekly_weeks = Some(weeks);
            }
            Recurrence::Monthly(MonthlyRule::DayOfMonth { day }) => {
                raw.monthly_type = Some("dayOfMonth".to_string());
                raw.day = Some(day);
            }
            Recurrence::Monthly(MonthlyRule::DayOfWeek { week, day_of_week }) => {
                raw.monthly_type = Some("dayOfWeek".to_string());
                raw.week = Some(week);
                raw.day_of_week = Some(weekday_index(day_of_week));
            }
            Recurrence::Monthly(MonthlyRule::FirstLastDay { position }) => {
                raw.monthly_type = Some("firstLastDay".to_string());
                raw.position = Some(position);
            }
        }
        raw
    }
}
