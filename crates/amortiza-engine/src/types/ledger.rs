//! Running ledgers maintained while iterating a schedule.
//!
//! Modeled as an explicit struct with named sub-records and small
//! mutate-in-place methods rather than the closure-based accumulators of
//! the reference implementation this engine's bookkeeping is based on.

use rust_decimal::Decimal;

/// Cumulative fraction of original principal amortized so far.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmortizationRatio {
    /// Including prepayments.
    pub current: Decimal,
    /// Attributable to scheduled entries only.
    pub regular: Decimal,
}

impl AmortizationRatio {
    /// The post-prepayment adjustment factor `(1 - current) / (1 - regular)`
    /// that re-proportions remaining scheduled payments.
    ///
    /// Returns `1` once the schedule is fully amortized on the regular
    /// track, to avoid a division by zero.
    #[must_use]
    pub fn adjustment_factor(&self) -> Decimal {
        let remaining_regular = Decimal::ONE - self.regular;
        if remaining_regular.is_zero() {
            Decimal::ONE
        } else {
            (Decimal::ONE - self.current) / remaining_regular
        }
    }
}

/// Interest accrual and settlement bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterestLedger {
    /// Interest accrued during the current period only.
    pub current: Decimal,
    /// Interest accrued across all periods to date.
    pub accrued: Decimal,
    /// Interest settled (paid out) during the current period.
    pub settled_current: Decimal,
    /// Interest settled across all periods to date.
    pub settled_total: Decimal,
    /// Interest accrued but not yet settled, carried from prior periods.
    pub deferred: Decimal,
}

impl InterestLedger {
    /// Interest available to be paid right now: accrued minus settled.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.accrued - self.settled_total
    }

    /// Accrues `amount` into the current period and the running total.
    pub fn accrue(&mut self, amount: Decimal) {
        self.current = amount;
        self.accrued += amount;
    }

    /// Accrues `amount` into the running total without resetting `current`,
    /// adding to it instead.
    ///
    /// Used by callers that step a period one day at a time (the daily
    /// engine) and need `current` to hold the whole period's accrual so
    /// far, not just the latest day's increment.
    pub fn accrue_incremental(&mut self, amount: Decimal) {
        self.current += amount;
        self.accrued += amount;
    }

    /// Settles `amount`, moving it out of the outstanding balance.
    pub fn settle(&mut self, amount: Decimal) {
        self.settled_current = amount;
        self.settled_total += amount;
    }

    /// Defers `amount` of the current period's accrual to future periods.
    pub fn defer(&mut self, amount: Decimal) {
        self.deferred += amount;
    }

    /// Releases `ratio` of the deferred balance, settling it.
    pub fn release_deferred(&mut self, ratio: Decimal) -> Decimal {
        let released = self.deferred * ratio;
        self.deferred -= released;
        released
    }
}

/// The ledgers threaded through a single payment- or daily-engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ledgers {
    /// Principal amortization tracking.
    pub amortization_ratio: AmortizationRatio,
    /// Interest accrual/settlement tracking.
    pub interest: InterestLedger,
    /// Full-value inflation component on outstanding principal, not yet paid.
    pub correction: Decimal,
}
