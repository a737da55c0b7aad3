//! The "currently viewed" date of a session.

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::{DaybookError, DaybookResult};
use crate::event::date_key;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short weekday labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Session-only date pointer. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    date: NaiveDate,
}

impl Cursor {
    pub fn new(date: NaiveDate) -> Self {
        Cursor { date }
    }

    pub fn today() -> Self {
        Cursor::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The store key for the current date (`MM/DD/YYYY`).
    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn next_day(&mut self) {
        if let Some(next) = self.date.checked_add_days(Days::new(1)) {
            self.date = next;
        }
    }

    pub fn previous_day(&mut self) {
        if let Some(prev) = self.date.checked_sub_days(Days::new(1)) {
            self.date = prev;
        }
    }

    /// Jump to `day` within the current month.
    pub fn set_day(&mut self, day: u32) -> DaybookResult<()> {
        self.date = self.date.with_day(day).ok_or(DaybookError::InvalidDay {
            day,
            days_in_month: self.days_in_month(),
        })?;
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.date.month0() as usize]
    }

    pub fn weekday_label(&self) -> &'static str {
        WEEKDAY_LABELS[self.date.weekday().num_days_from_sunday() as usize]
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_of_month();
        let next_month = first
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        next_month.signed_duration_since(first).num_days() as u32
    }

    /// Weekday of the 1st of the current month, 0 = Sunday.
    pub fn starting_weekday(&self) -> u32 {
        self.first_of_month().weekday().num_days_from_sunday()
    }

    fn first_of_month(&self) -> NaiveDate {
        // Day 1 exists in every month
        self.date.with_day(1).unwrap_or(self.date)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::today()
    }
}
