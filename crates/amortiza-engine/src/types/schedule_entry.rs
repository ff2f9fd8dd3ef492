//! The canonical schedule entry types consumed by the payment and
//! daily-return engines.

use amortiza_core::types::Date;
use amortiza_indexes::IndexCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How far back of `base_date` a [`PriceLevelAdjustment`] window starts.
pub use amortiza_indexes::IndexShift as ShiftRule;

/// A marker meaning "whatever outstanding balance remains on this date",
/// used as the value of an unscheduled cashflow that should fully settle
/// the operation (e.g. a full prepayment of an unknown exact amount).
pub const MAX_VALUE: Decimal = Decimal::MAX;

/// Explicit day-count endpoints overriding the natural period boundaries.
///
/// Used when an unscheduled cashflow lands between two scheduled dates:
/// the day-count-total (DCT) for the straddled period must still use the
/// original scheduled endpoints, not the prepayment date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DctOverride {
    /// Start of the day-count-total window.
    pub date_from: Date,
    /// End of the day-count-total window.
    pub date_to: Date,
    /// Whether this override's period precedes the first regular amortization.
    pub predates_first_amortization: bool,
}

/// Inflation-index metadata attached to a scheduled amortization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevelAdjustment {
    /// The inflation index code.
    pub code: IndexCode,
    /// First date of the accumulation window.
    pub base_date: Date,
    /// Number of monthly indexes to accumulate (at least 1).
    pub period: u32,
    /// How far back of `base_date` the accumulation window starts.
    pub shift: ShiftRule,
    /// Whether the inflation component is paid this period (`true`) or
    /// carried forward to be paid with a later amortization (`false`).
    pub amortizes_adjustment: bool,
}

/// A variable-rate index reference attached to an operation.
///
/// The backend supplying index values is intentionally not part of this
/// struct: engine entry points take it as a separate argument so that
/// callers can share one backend instance (and its cache/projection state)
/// across many operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableIndex {
    /// The index code.
    pub code: IndexCode,
    /// Percentage of the published index applied (e.g. `100` for 100% of CDI).
    pub percentage: Decimal,
}

/// A cutoff date at which the payment engine stops computing new accrual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcDate {
    /// The cutoff date.
    pub value: Date,
    /// When `true`, the remainder of the schedule is still emitted (with
    /// factors frozen at `value`) instead of being truncated outright.
    pub runaway: bool,
}

/// One planned event in an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    /// The scheduled date.
    pub date: Date,
    /// Fraction of the original principal amortized at this event.
    pub amortization_ratio: Decimal,
    /// If `false`, interest accrued in this period is deferred rather than
    /// settled immediately.
    pub amortizes_interest: bool,
    /// Inflation-index metadata, if this operation is inflation-indexed.
    pub price_level_adjustment: Option<PriceLevelAdjustment>,
    /// Explicit day-count override for this period.
    pub dct_override: Option<DctOverride>,
}

impl Amortization {
    /// Creates a regular scheduled amortization with no inflation linkage.
    #[must_use]
    pub fn new(date: Date, amortization_ratio: Decimal, amortizes_interest: bool) -> Self {
        Self {
            date,
            amortization_ratio,
            amortizes_interest,
            price_level_adjustment: None,
            dct_override: None,
        }
    }

    /// Attaches inflation-index metadata to this amortization.
    #[must_use]
    pub fn with_price_level_adjustment(mut self, pla: PriceLevelAdjustment) -> Self {
        self.price_level_adjustment = Some(pla);
        self
    }

    /// Attaches an explicit day-count override to this amortization.
    #[must_use]
    pub fn with_dct_override(mut self, dct: DctOverride) -> Self {
        self.dct_override = Some(dct);
        self
    }
}

/// An unscheduled cashflow: a prepayment or partial settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bare {
    /// The date of the cashflow.
    pub date: Date,
    /// The value paid. [`MAX_VALUE`] means "whatever outstanding balance
    /// remains on this date".
    pub value: Decimal,
    /// Explicit day-count override for the straddled period.
    pub dct_override: Option<DctOverride>,
}

impl Bare {
    /// Creates an unscheduled cashflow of an explicit value.
    #[must_use]
    pub fn new(date: Date, value: Decimal) -> Self {
        Self { date, value, dct_override: None }
    }

    /// Creates an unscheduled cashflow that settles the full remaining balance.
    #[must_use]
    pub fn settle_remaining(date: Date) -> Self {
        Self::new(date, MAX_VALUE)
    }

    /// Returns `true` when this cashflow is the "settle the remainder" sentinel.
    #[must_use]
    pub fn is_settle_remaining(&self) -> bool {
        self.value == MAX_VALUE
    }
}

/// A tagged schedule element: either a planned amortization or an
/// unscheduled cashflow, as produced by the schedule interleaver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleEntry {
    /// A planned amortization event.
    Scheduled(Amortization),
    /// An unscheduled prepayment or partial settlement.
    Unscheduled(Bare),
}

impl ScheduleEntry {
    /// Returns the date of this entry, regardless of its kind.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            ScheduleEntry::Scheduled(a) => a.date,
            ScheduleEntry::Unscheduled(b) => b.date,
        }
    }

    /// Returns `true` if this is a scheduled (planned) entry.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ScheduleEntry::Scheduled(_))
    }

    /// Returns the underlying scheduled amortization, if this is one.
    #[must_use]
    pub fn as_scheduled(&self) -> Option<&Amortization> {
        match self {
            ScheduleEntry::Scheduled(a) => Some(a),
            ScheduleEntry::Unscheduled(_) => None,
        }
    }

    /// Returns the underlying unscheduled cashflow, if this is one.
    #[must_use]
    pub fn as_unscheduled(&self) -> Option<&Bare> {
        match self {
            ScheduleEntry::Unscheduled(b) => Some(b),
            ScheduleEntry::Scheduled(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_bare_settle_remaining_sentinel() {
        let bare = Bare::settle_remaining(date(2024, 1, 1));
        assert!(bare.is_settle_remaining());
        let explicit = Bare::new(date(2024, 1, 1), Decimal::new(100, 0));
        assert!(!explicit.is_settle_remaining());
    }

    #[test]
    fn test_schedule_entry_date_and_kind() {
        let scheduled = ScheduleEntry::Scheduled(Amortization::new(date(2024, 1, 1), Decimal::ONE, true));
        let unscheduled = ScheduleEntry::Unscheduled(Bare::new(date(2024, 2, 1), Decimal::new(500, 0)));

        assert_eq!(scheduled.date(), date(2024, 1, 1));
        assert!(scheduled.is_scheduled());
        assert!(unscheduled.as_scheduled().is_none());
        assert!(unscheduled.as_unscheduled().is_some());
    }
}
