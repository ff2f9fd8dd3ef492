//! Day-count conventions.
//!
//! Four conventions are recognized throughout the engine: a fixed
//! actual/360 count, a legacy actual/365 count, a monthly actual/(12·dct)
//! count ("30/360" in local parlance, though the divisor is the actual
//! number of calendar days in the anniversary period rather than a
//! synthetic 30-day month), and a business-day/252 count used together
//! with the overnight interbank variable index.
//!
//! The monthly and business-day conventions need more context (period
//! boundaries, overrides, a calendar) than a two-date year fraction can
//! express, so only the two unconditional conventions implement
//! [`DayCount`] directly; the others are computed where that extra
//! context is available.

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365;

use crate::types::Date;
use rust_decimal::Decimal;

/// Trait for the day-count conventions that need nothing but a date pair.
pub trait DayCount: Send + Sync {
    /// Returns the name of the convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Calculates the day count between two dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// The day-count convention tag carried on an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/360 — fixed-rate bullet operations.
    Days360,
    /// Actual/365 — legacy convention, emits a deprecation warning once.
    Days365,
    /// Monthly accrual with anniversary-aware period lengths.
    Thirty360,
    /// Business-day/252, paired with the overnight interbank index.
    BusinessDays252,
}

impl DayCountConvention {
    /// Returns the conventional name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Days360 => "360",
            DayCountConvention::Days365 => "365",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::BusinessDays252 => "252",
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = DayCountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "360" => Ok(DayCountConvention::Days360),
            "365" => Ok(DayCountConvention::Days365),
            "30/360" => Ok(DayCountConvention::Thirty360),
            "252" => Ok(DayCountConvention::BusinessDays252),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error type for parsing a day-count convention tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day-count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for conv in [
            DayCountConvention::Days360,
            DayCountConvention::Days365,
            DayCountConvention::Thirty360,
            DayCountConvention::BusinessDays252,
        ] {
            let parsed: DayCountConvention = conv.name().parse().unwrap();
            assert_eq!(conv, parsed);
        }
    }

    #[test]
    fn test_parse_invalid() {
        assert!("90/360".parse::<DayCountConvention>().is_err());
    }
}
