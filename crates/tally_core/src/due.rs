use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    calendar_weeks_between, is_last_day_of_month, is_last_week_of_month, month_length,
    week_of_month,
};
use crate::recurrence::{BiweeklyWeeks, MonthEdge, MonthlyRule, Recurrence};
use crate::task::Task;

/// How the weeks of a biweekly rule are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiweeklyMode {
    /// Weeks are the 7-day buckets of the month (`ceil(day / 7)`):
    /// `FirstThird` is due in buckets 1 and 3, `SecondFourth` in 2 and 4.
    /// Bucket 5 (days 29-31) is never due.
    #[default]
    WeekOfMonth,
    /// Alternating Sunday-started weeks counted from the creation date:
    /// `FirstThird` is due in the creation week and every second week after
    /// it, `SecondFourth` in the weeks in between.
    Anchor,
}

impl std::str::FromStr for BiweeklyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week-of-month" | "week_of_month" | "month" => Ok(BiweeklyMode::WeekOfMonth),
            "anchor" => Ok(BiweeklyMode::Anchor),
            other => Err(format!("unknown biweekly mode `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    biweekly: BiweeklyMode,
}

impl Evaluator {
    pub fn new(biweekly: BiweeklyMode) -> Self {
        Self { biweekly }
    }

    pub fn biweekly_mode(&self) -> BiweeklyMode {
        self.biweekly
    }

    pub fn is_due(&self, rule: &Recurrence, date: NaiveDate, created_on: NaiveDate) -> bool {
        match rule {
            Recurrence::Daily => true,
            Recurrence::Weekly { day_of_week } => date.weekday() == *day_of_week,
            Recurrence::Biweekly { day_of_week, weeks } => {
                date.weekday() == *day_of_week
                    && self.biweekly_week_matches(*weeks, date, created_on)
            }
            Recurrence::Monthly(monthly) => monthly_is_due(monthly, date),
        }
    }

    pub fn task_is_due(&self, task: &Task, date: NaiveDate) -> bool {
        self.is_due(&task.recurrence, date, task.created_on())
    }

    fn biweekly_week_matches(
        &self,
        weeks: BiweeklyWeeks,
        date: NaiveDate,
        created_on: NaiveDate,
    ) -> bool {
        match self.biweekly {
            BiweeklyMode::WeekOfMonth => {
                let bucket = week_of_month(date);
                match weeks {
                    BiweeklyWeeks::FirstThird => bucket == 1 || bucket == 3,
                    BiweeklyWeeks::SecondFourth => bucket == 2 || bucket == 4,
                }
            }
            BiweeklyMode::Anchor => {
                let even = calendar_weeks_between(created_on, date).rem_euclid(2) == 0;
                match weeks {
                    BiweeklyWeeks::FirstThird => even,
                    BiweeklyWeeks::SecondFourth => !even,
                }
            }
        }
    }
}

/// Due-date check with the default biweekly definition.
pub fn is_due(rule: &Recurrence, date: NaiveDate, created_on: NaiveDate) -> bool {
    Evaluator::default().is_due(rule, date, created_on)
}

fn monthly_is_due(rule: &MonthlyRule, date: NaiveDate) -> bool {
    match rule {
        MonthlyRule::DayOfMonth { day } => {
            let last_day = month_length(date);
            let target = u32::from(*day).min(last_day);
            date.day() == target
        }
        MonthlyRule::DayOfWeek { week, day_of_week } => {
            if date.weekday() != *day_of_week {
                return false;
            }
            match week.bucket() {
                Some(bucket) => week_of_month(date) == bucket,
                None => is_last_week_of_month(date),
            }
        }
        MonthlyRule::FirstLastDay { position } => match position {
            MonthEdge::First => date.day() == 1,
            MonthEdge::Last => is_last_day_of_month(date),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::WeekOrdinal;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn due_dates(rule: &Recurrence, year: i32, month: u32) -> Vec<u32> {
        let first = date(year, month, 1);
        (0..month_length(first))
            .map(|offset| first + Duration::days(i64::from(offset)))
            .filter(|day| is_due(rule, *day, first))
            .map(|day| day.day())
            .collect()
    }

    #[test]
    fn daily_is_always_due() {
        let anchor = date(2024, 1, 1);
        for offset in 0..400 {
            assert!(is_due(&Recurrence::Daily, anchor + Duration::days(offset), anchor));
        }
    }

    #[test]
    fn weekly_matches_weekday_only() {
        let anchor = date(2024, 1, 1);
        for index in 0..7u8 {
            let rule = Recurrence::weekly(index).unwrap();
            for offset in 0..28 {
                let day = anchor + Duration::days(offset);
                let expected = day.weekday().num_days_from_sunday() == u32::from(index);
                assert_eq!(is_due(&rule, day, anchor), expected, "{day} / {index}");
            }
        }
    }

    #[test]
    fn day_31_clamps_to_end_of_short_months() {
        let rule = Recurrence::monthly_on_day(31).unwrap();
        assert_eq!(due_dates(&rule, 2023, 2), vec![28]);
        assert_eq!(due_dates(&rule, 2024, 2), vec![29]);
        assert_eq!(due_dates(&rule, 2024, 4), vec![30]);
        assert_eq!(due_dates(&rule, 2024, 5), vec![31]);

        let rule = Recurrence::monthly_on_day(30).unwrap();
        assert_eq!(due_dates(&rule, 2023, 2), vec![28]);
        assert_eq!(due_dates(&rule, 2024, 3), vec![30]);
    }

    #[test]
    fn last_day_is_due_once_for_every_month_length() {
        let rule = Recurrence::monthly_edge(MonthEdge::Last);
        assert_eq!(due_dates(&rule, 2023, 2), vec![28]);
        assert_eq!(due_dates(&rule, 2024, 2), vec![29]);
        assert_eq!(due_dates(&rule, 2024, 6), vec![30]);
        assert_eq!(due_dates(&rule, 2024, 7), vec![31]);
        assert_eq!(
            due_dates(&Recurrence::monthly_edge(MonthEdge::First), 2024, 7),
            vec![1]
        );
    }

    #[test]
    fn monthly_weekday_uses_seven_day_buckets() {
        // March 2024 starts on a Friday.
        let second_friday = Recurrence::monthly_on_weekday(WeekOrdinal::Second, 5).unwrap();
        assert_eq!(due_dates(&second_friday, 2024, 3), vec![8]);

        let last_thursday = Recurrence::monthly_on_weekday(WeekOrdinal::Last, 4).unwrap();
        assert_eq!(due_dates(&last_thursday, 2024, 2), vec![29]);
        assert_eq!(due_dates(&last_thursday, 2024, 1), vec![25]);
    }

    #[test]
    fn fourth_and_last_overlap_in_february() {
        // February 2023 has exactly four of every weekday.
        let fourth = Recurrence::monthly_on_weekday(WeekOrdinal::Fourth, 2).unwrap();
        let last = Recurrence::monthly_on_weekday(WeekOrdinal::Last, 2).unwrap();
        assert_eq!(due_dates(&fourth, 2023, 2), vec![28]);
        assert_eq!(due_dates(&last, 2023, 2), vec![28]);
    }

    #[test]
    fn biweekly_week_of_month_picks_bucket_pairs() {
        // Tuesdays in October 2024: 1, 8, 15, 22, 29.
        let first_third = Recurrence::biweekly(2, BiweeklyWeeks::FirstThird).unwrap();
        let second_fourth = Recurrence::biweekly(2, BiweeklyWeeks::SecondFourth).unwrap();
        assert_eq!(due_dates(&first_third, 2024, 10), vec![1, 15]);
        assert_eq!(due_dates(&second_fourth, 2024, 10), vec![8, 22]);
    }

    #[test]
    fn biweekly_anchor_alternates_from_creation_week() {
        let evaluator = Evaluator::new(BiweeklyMode::Anchor);
        let rule = Recurrence::biweekly(2, BiweeklyWeeks::FirstThird).unwrap();
        let created = date(2024, 10, 2);
        let tuesdays = [1, 8, 15, 22, 29].map(|d| date(2024, 10, d));
        let due: Vec<bool> = tuesdays
            .iter()
            .map(|day| evaluator.is_due(&rule, *day, created))
            .collect();
        assert_eq!(due, vec![true, false, true, false, true]);

        let other = Recurrence::biweekly(2, BiweeklyWeeks::SecondFourth).unwrap();
        assert!(evaluator.is_due(&other, date(2024, 10, 8), created));
        assert!(!evaluator.is_due(&other, date(2024, 10, 1), created));
    }

    #[test]
    fn anchor_week_uses_local_creation_date() {
        use crate::task::NewTask;
        use chrono::{FixedOffset, TimeZone, Utc};

        // Created Saturday 2024-01-06 23:30 at UTC-5, which is Sunday in UTC.
        let rule = Recurrence::biweekly(2, BiweeklyWeeks::FirstThird).unwrap();
        let task = NewTask::new("Recycling", rule)
            .into_task("r".into(), Utc.with_ymd_and_hms(2024, 1, 7, 4, 30, 0).unwrap());
        let local = task.created_on_in(&FixedOffset::west_opt(5 * 3600).unwrap());
        let evaluator = Evaluator::new(BiweeklyMode::Anchor);

        assert!(!evaluator.is_due(&task.recurrence, date(2024, 1, 9), local));
        assert!(evaluator.is_due(&task.recurrence, date(2024, 1, 2), local));
        assert!(evaluator.is_due(&task.recurrence, date(2024, 1, 9), task.created_on_in(&Utc)));
    }

    #[test]
    fn weekly_rules_fire_once_per_seven_days() {
        let anchor = date(2024, 2, 4);
        let rules = [
            Recurrence::weekly(3).unwrap(),
            Recurrence::biweekly(3, BiweeklyWeeks::SecondFourth).unwrap(),
        ];
        for rule in rules {
            for start in 0..60 {
                let window_start = anchor + Duration::days(start);
                let hits = (0..7)
                    .filter(|offset| is_due(&rule, window_start + Duration::days(*offset), anchor))
                    .count();
                assert!(hits <= 1);
            }
        }
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("anchor".parse::<BiweeklyMode>(), Ok(BiweeklyMode::Anchor));
        assert_eq!(
            "Week-Of-Month".parse::<BiweeklyMode>(),
            Ok(BiweeklyMode::WeekOfMonth)
        );
        assert!("fortnight".parse::<BiweeklyMode>().is_err());
    }
}
