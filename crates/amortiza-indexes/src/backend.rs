//! The abstract index-backend interface (component C2) and the factor
//! helpers (component C1) built on top of it.

use amortiza_core::calendars::Calendar;
use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use rust_decimal::{Decimal, MathematicalOps};

use crate::types::{DailyIndex, IndexCode, IndexShift, MonthlyIndex, RangedIndex};

/// Source of daily, monthly, and ranged index values.
///
/// Implementations decide how data is retrieved (in memory, from a local
/// disk cache, from a remote service); the factor helpers below are
/// provided in terms of the three retrieval operations and do not need to
/// be reimplemented per backend.
pub trait IndexBackend {
    /// Returns daily observations of a business-day index over `[begin, end)`.
    ///
    /// Implementations project the most recent known value forward to
    /// cover business days past the data horizon exactly once; a second
    /// attempt to project within the same call is a backend error.
    fn get_daily_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<DailyIndex>>;

    /// Returns the savings index's monthly ranges overlapping `[begin, end)`.
    fn get_savings_indexes(&mut self, begin: Date, end: Date) -> AmortizaResult<Vec<RangedIndex>>;

    /// Returns monthly inflation observations for `code` over `[begin, end)`
    /// inclusive of both endpoints' months.
    fn get_monthly_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<MonthlyIndex>>;
}

/// Compounds a business-day index (CDI) over `[begin, end)`.
///
/// Returns the compounded factor and the number of business days observed,
/// since callers pairing this with a 252-day fixed rate need both.
pub fn cdi_factor(
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
    begin: Date,
    end: Date,
    percentage: Decimal,
) -> AmortizaResult<(Decimal, i64)> {
    let observations = backend.get_daily_indexes(IndexCode::OvernightInterbank, begin, end)?;
    let mut factor = Decimal::ONE;
    let mut business_days = 0i64;
    for obs in &observations {
        if !calendar.is_business_day(obs.date) {
            continue;
        }
        business_days += 1;
        let daily = Decimal::ONE + (percentage / Decimal::ONE_HUNDRED) * (obs.rate / Decimal::ONE_HUNDRED);
        factor *= daily;
    }
    Ok((factor, business_days))
}

/// Compounds the savings index (Poupanca) over `[begin, end)`.
///
/// The anniversary day shifts to the first of the following month when the
/// window's start day-of-month exceeds 28, matching the deposit-date rule
/// used by Brazilian savings accounts.
pub fn savings_factor(
    backend: &mut dyn IndexBackend,
    begin: Date,
    end: Date,
    percentage: Decimal,
) -> AmortizaResult<Decimal> {
    let anchor = if begin.day() > 28 { begin.add_months(1)? } else { begin };
    let ranges = backend.get_savings_indexes(anchor, end)?;
    let mut factor = Decimal::ONE;
    for range in &ranges {
        let monthly = Decimal::ONE + (percentage / Decimal::ONE_HUNDRED) * (range.rate / Decimal::ONE_HUNDRED);
        factor *= monthly;
    }
    Ok(factor)
}

/// Compounds `period` consecutive monthly inflation indexes starting at
/// `base_date`, shifted backward per `shift`, then raises the result to
/// `ratio` to prorate a partial final month.
///
/// A deflationary result (factor below 1) is clamped to 1 before return,
/// matching the rule that principal is never deflated; callers needing the
/// raw unclamped value for per-day reporting should compound the monthly
/// observations themselves.
pub fn ipca_factor(
    backend: &mut dyn IndexBackend,
    code: IndexCode,
    base_date: Date,
    period: u32,
    shift: IndexShift,
    ratio: Decimal,
) -> AmortizaResult<Decimal> {
    if code == IndexCode::MonthlyInflationB {
        return Err(AmortizaError::not_implemented(
            "compounding is not implemented for the general market price index (IGPM)",
        ));
    }

    let shift_months: i32 = match shift {
        IndexShift::Auto | IndexShift::OneMonth => 1,
        IndexShift::TwoMonths => 2,
    };
    let window_start = base_date.add_months(-shift_months)?;
    let window_end = window_start.add_months(period as i32)?;

    let observations = backend.get_monthly_indexes(code, window_start, window_end)?;
    if observations.len() < period as usize {
        return Err(AmortizaError::backend(format!(
            "expected {period} monthly observations from {window_start}, found {}",
            observations.len()
        )));
    }

    let mut factor = Decimal::ONE;
    for obs in observations.iter().take(period as usize) {
        factor *= Decimal::ONE + obs.value / Decimal::ONE_HUNDRED;
    }

    let raised = factor
        .checked_powd(ratio)
        .ok_or_else(|| AmortizaError::backend("inflation factor exponentiation overflowed"))?;

    Ok(raised.max(Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryBackend;
    use amortiza_core::calendars::WeekendCalendar;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_cdi_factor_flat_rate() {
        let mut backend = InMemoryBackend::new();
        let mut d = date(2024, 1, 1);
        for _ in 0..30 {
            backend.add_daily(IndexCode::OvernightInterbank, d, dec!(0.045));
            d = d.add_days(1);
        }
        let calendar = WeekendCalendar;
        let (factor, days) = cdi_factor(
            &mut backend,
            &calendar,
            date(2024, 1, 1),
            date(2024, 1, 31),
            dec!(100),
        )
        .unwrap();
        assert!(days > 0);
        assert!(factor > Decimal::ONE);
    }

    #[test]
    fn test_ipca_factor_igpm_not_implemented() {
        let mut backend = InMemoryBackend::new();
        let result = ipca_factor(
            &mut backend,
            IndexCode::MonthlyInflationB,
            date(2022, 1, 1),
            12,
            IndexShift::Auto,
            Decimal::ONE,
        );
        assert!(matches!(result, Err(AmortizaError::NotImplemented { .. })));
    }

    #[test]
    fn test_ipca_factor_clamps_deflation() {
        let mut backend = InMemoryBackend::new();
        backend.add_monthly(IndexCode::MonthlyInflationA, 2021, 12, dec!(-0.5));
        let factor = ipca_factor(
            &mut backend,
            IndexCode::MonthlyInflationA,
            date(2022, 1, 1),
            1,
            IndexShift::OneMonth,
            Decimal::ONE,
        )
        .unwrap();
        assert_eq!(factor, Decimal::ONE);
    }
}
