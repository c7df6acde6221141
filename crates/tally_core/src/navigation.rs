use chrono::{Duration, NaiveDate};

use crate::calendar::calendar_days_between;

/// Cursor over the date being viewed. The cursor never goes earlier than
/// yesterday; single steps only move between yesterday, today and tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    today: NaiveDate,
    viewed: NaiveDate,
}

impl DateCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            viewed: today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn viewed(&self) -> NaiveDate {
        self.viewed
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.today - Duration::days(1)
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today + Duration::days(1)
    }

    /// Steps forward one day from yesterday or today. Returns whether the
    /// cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.viewed != self.today && self.viewed != self.yesterday() {
            return false;
        }
        self.move_to(self.viewed + Duration::days(1))
    }

    /// Steps back one day from today or tomorrow. Returns whether the cursor
    /// moved.
    pub fn retreat(&mut self) -> bool {
        if self.viewed != self.today && self.viewed != self.tomorrow() {
            return false;
        }
        self.move_to(self.viewed - Duration::days(1))
    }

    pub fn jump_to_today(&mut self) {
        self.viewed = self.today;
    }

    /// Moves to an arbitrary date, snapping anything before yesterday up to
    /// yesterday. Returns the date actually selected.
    pub fn go_to(&mut self, date: NaiveDate) -> NaiveDate {
        self.viewed = date.max(self.yesterday());
        self.viewed
    }

    pub fn relative_label(&self) -> String {
        match calendar_days_between(self.today, self.viewed) {
            -1 => "Yesterday".to_string(),
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            d if d < 0 => format!("{} days ago", -d),
            d => format!("In {} days", d),
        }
    }

    fn move_to(&mut self, target: NaiveDate) -> bool {
        if target < self.yesterday() {
            return false;
        }
        self.viewed = target;
        true
    }
}
