use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn month_length(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.day() == month_length(date)
}

/// Ordinal of the 7-day bucket holding `date` within its month: days 1-7 are
/// bucket 1, 8-14 bucket 2, and so on up to bucket 5 for days 29-31.
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() + 6) / 7
}

/// True when `date` falls within the final seven days of its month.
pub fn is_last_week_of_month(date: NaiveDate) -> bool {
    month_length(date) - date.day() < 7
}

/// Sunday that opens the calendar week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Number of Sunday-started calendar weeks from `from` to `to`. Negative when
/// `to` lies in an earlier week.
pub fn calendar_weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    start_of_week(to)
        .signed_duration_since(start_of_week(from))
        .num_days()
        / 7
}

pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Maps a Sunday-based index (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn week_of_month_buckets_by_seven_days() {
        assert_eq!(week_of_month(date(2024, 3, 1)), 1);
        assert_eq!(week_of_month(date(2024, 3, 7)), 1);
        assert_eq!(week_of_month(date(2024, 3, 8)), 2);
        assert_eq!(week_of_month(date(2024, 3, 28)), 4);
        assert_eq!(week_of_month(date(2024, 3, 29)), 5);
    }

    #[test]
    fn last_week_covers_final_seven_days() {
        assert!(is_last_week_of_month(date(2023, 2, 22)));
        assert!(!is_last_week_of_month(date(2023, 2, 21)));
        assert!(is_last_week_of_month(date(2024, 1, 25)));
        assert!(!is_last_week_of_month(date(2024, 1, 24)));
    }

    #[test]
    fn calendar_weeks_use_sunday_start() {
        // Saturday 2024-01-06 and Sunday 2024-01-07 sit in adjacent weeks.
        assert_eq!(calendar_weeks_between(date(2024, 1, 6), date(2024, 1, 7)), 1);
        assert_eq!(calendar_weeks_between(date(2024, 1, 7), date(2024, 1, 13)), 0);
        assert_eq!(calendar_weeks_between(date(2024, 1, 14), date(2024, 1, 1)), -2);
    }

    #[test]
    fn weekday_indices_start_on_sunday() {
        assert_eq!(weekday_from_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_index(7), None);
        assert_eq!(weekday_index(Weekday::Fri), 5);
    }
}
