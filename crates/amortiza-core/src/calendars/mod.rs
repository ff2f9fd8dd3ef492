//! Business day calendars.
//!
//! The engine needs a notion of "business day" for the 252-day-count
//! convention (business-day-year compounding paired with the overnight
//! interbank index) and for projecting daily index streams over weekends
//! and holidays.

mod brazil;

pub use brazil::B3Calendar;

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday (or weekend).
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Counts business days in `[start, end)`, the convention used when
    /// pairing 252-day-count compounding with business-day index iteration.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let mut count = 0i64;
        let mut current = start;

        while current < end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A weekend-only calendar with no holidays, useful for tests and for
/// callers that supply their own holiday-free index data.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}
