//! Game calendar: 30-day months, 12-month years, starting 1 January 1860.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days in every game month.
pub const DAYS_PER_MONTH: u32 = 30;
/// Months in a game year.
pub const MONTHS_PER_YEAR: u32 = 12;
/// Year the game opens in.
pub const START_YEAR: u32 = 1860;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR as usize] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A date on the game calendar. Ordering is chronological.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameDate {
    /// Year, from 1860 upward.
    pub year: u32,
    /// Month in 1..=12.
    pub month: u32,
    /// Day in 1..=30.
    pub day: u32,
}

impl Default for GameDate {
    fn default() -> Self {
        Self {
            year: START_YEAR,
            month: 1,
            day: 1,
        }
    }
}

impl GameDate {
    /// Build a date, rejecting out-of-range fields.
    pub fn new(day: u32, month: u32, year: u32) -> Result<Self, ValidationError> {
        let date = Self { year, month, day };
        date.validate()?;
        Ok(date)
    }

    /// Check the day and month ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if (1..=DAYS_PER_MONTH).contains(&self.day) && (1..=MONTHS_PER_YEAR).contains(&self.month)
        {
            Ok(())
        } else {
            Err(ValidationError::DateOutOfRange {
                day: self.day,
                month: self.month,
                year: self.year,
            })
        }
    }

    /// Move forward `days`, rolling days into months and months into years.
    /// The year saturates instead of overflowing.
    pub fn advance_days(&mut self, days: u32) {
        let per_month = u64::from(DAYS_PER_MONTH);
        let per_year = u64::from(MONTHS_PER_YEAR);
        let day0 = u64::from(self.day.saturating_sub(1)) + u64::from(days);
        let month0 = u64::from(self.month.saturating_sub(1)) + day0 / per_month;
        let years = u32::try_from(month0 / per_year).unwrap_or(u32::MAX);
        self.day = (day0 % per_month) as u32 + 1;
        self.month = (month0 % per_year) as u32 + 1;
        self.year = self.year.saturating_add(years);
    }

    /// Three-letter month name.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("???")
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name(), self.year)
    }
}
