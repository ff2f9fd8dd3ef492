//! Domain types for variable-rate indexes used in Brazilian credit operations.

use amortiza_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A variable-rate index code recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndexCode {
    /// Overnight interbank deposit rate (CDI), compounded over business days.
    OvernightInterbank,
    /// Savings account reference rate (Poupanca), a monthly ranged index.
    Savings,
    /// Broad consumer price index (IPCA), a monthly inflation index.
    MonthlyInflationA,
    /// General market price index (IGPM), a monthly inflation index.
    MonthlyInflationB,
}

impl IndexCode {
    /// A short machine identifier, used to slugify cache file names.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            IndexCode::OvernightInterbank => "overnight-interbank",
            IndexCode::Savings => "savings",
            IndexCode::MonthlyInflationA => "monthly-inflation-a",
            IndexCode::MonthlyInflationB => "monthly-inflation-b",
        }
    }
}

impl std::fmt::Display for IndexCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// A single daily observation of a business-day index (CDI).
///
/// `rate` is expressed in percent (e.g. `0.05` for a daily rate of 0.05%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyIndex {
    /// The date this observation applies to.
    pub date: Date,
    /// The daily rate, in percent.
    pub rate: Decimal,
}

impl DailyIndex {
    /// Creates a new daily index observation.
    #[must_use]
    pub fn new(date: Date, rate: Decimal) -> Self {
        Self { date, rate }
    }
}

/// A monthly inflation index observation (IPCA, IGPM).
///
/// `value` is the monthly variation, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIndex {
    /// Reference year.
    pub year: i32,
    /// Reference month, 1-12.
    pub month: u32,
    /// The monthly index variation, in percent.
    pub value: Decimal,
}

impl MonthlyIndex {
    /// Creates a new monthly index observation.
    #[must_use]
    pub fn new(year: i32, month: u32, value: Decimal) -> Self {
        Self { year, month, value }
    }
}

/// A monthly rate applicable over an explicit date range.
///
/// Used for the savings index (Poupanca), whose rate resets on each
/// account's own anniversary date rather than on the first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedIndex {
    /// Start of the range this rate applies to (inclusive).
    pub start: Date,
    /// End of the range this rate applies to (exclusive).
    pub end: Date,
    /// The monthly rate, in percent.
    pub rate: Decimal,
}

impl RangedIndex {
    /// Creates a new ranged index observation.
    #[must_use]
    pub fn new(start: Date, end: Date, rate: Decimal) -> Self {
        Self { start, end, rate }
    }

    /// Returns the number of calendar days the range spans.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.start.days_between(&self.end)
    }
}

/// How far back of `base_date` a [`PriceLevelAdjustment`] window starts.
///
/// [`PriceLevelAdjustment`]: amortiza_engine equivalent, kept here only in doc form
/// to avoid a circular crate dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IndexShift {
    /// Pick the shift automatically based on the index's publication lag.
    #[default]
    Auto,
    /// Shift the window start back by one month.
    OneMonth,
    /// Shift the window start back by two months.
    TwoMonths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_code_slug() {
        assert_eq!(IndexCode::OvernightInterbank.slug(), "overnight-interbank");
        assert_eq!(IndexCode::MonthlyInflationA.slug(), "monthly-inflation-a");
    }

    #[test]
    fn test_ranged_index_days() {
        let r = RangedIndex::new(
            Date::from_ymd(2024, 1, 10).unwrap(),
            Date::from_ymd(2024, 2, 10).unwrap(),
            Decimal::new(65, 2),
        );
        assert_eq!(r.days(), 31);
    }
}
