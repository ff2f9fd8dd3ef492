//! The per-period day-count matrix consumed by the payment and
//! daily-return engines: selects how the spread factor `fs` is computed
//! for each of the four day-count conventions the engine supports.

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use amortiza_core::calendars::{B3Calendar, Calendar};
use amortiza_core::daycounts::{Act360, Act365, DayCount, DayCountConvention};
use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use amortiza_indexes::{cdi_factor, IndexBackend};
use log::warn;
use rust_decimal::Decimal;

use crate::factors::interest_factor;
use crate::types::VariableIndex;

static WARNED_365: AtomicBool = AtomicBool::new(false);

/// The boundaries and overrides in effect for a single period, as resolved
/// by the caller (the payment or daily engine) from the schedule entries
/// and any [`crate::types::DctOverride`] in force.
#[derive(Debug, Clone, Copy)]
pub struct PeriodWindow {
    /// Start of the accrual period.
    pub prev: Date,
    /// The due date for this period (may be before the period's natural
    /// end when a [`crate::types::CalcDate`] truncates computation).
    pub due: Date,
    /// Calendar days used as the day-count-total denominator for 30/360
    /// periods (overridden per [`crate::types::DctOverride`] rules, or the
    /// natural period length otherwise).
    pub dct_days: i64,
    /// Whether this is the operation's first period (30/360 uses a special
    /// anchor for the first period to absorb anniversary drift).
    pub is_first_period: bool,
    /// Whether `dct_days` already reflects an explicit [`crate::types::DctOverride`]
    /// (e.g. Bullet's anniversary shift), as opposed to the natural period
    /// length. The first-period 30/360 anchor only applies when this is `false`.
    pub dct_overridden: bool,
}

/// The calendar days between the 24th-of-month immediately before and
/// after `zero_date`, used as the 30/360 day-count-total for an
/// operation's first period.
///
/// `zero_date` itself falls inside the resulting window: if its
/// day-of-month is 24 or later the window runs from this month's 24th to
/// next month's, otherwise from last month's 24th to this month's.
fn anchor_24th_dct(zero_date: Date) -> AmortizaResult<i64> {
    let this_24th = Date::from_ymd(zero_date.year(), zero_date.month(), 24)?;
    let (start, end) = if zero_date.day() >= 24 {
        (this_24th, this_24th.add_months(1)?)
    } else {
        (this_24th.add_months(-1)?, this_24th)
    };
    Ok(start.days_between(&end).abs())
}

/// Computes the spread factor `fs` for one period under `convention`.
///
/// For the `252` convention this also compounds the variable (CDI) index
/// over the period and folds it into the returned factor, since the two
/// are inseparable under that day count.
pub fn spread_factor(
    convention: DayCountConvention,
    apy: Decimal,
    window: PeriodWindow,
    variable: Option<VariableIndex>,
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Decimal> {
    match convention {
        DayCountConvention::Days360 => {
            let dcp = Act360.day_count(window.prev, window.due);
            Ok(interest_factor(apy, Decimal::from(dcp) / Decimal::from(360), true))
        }
        DayCountConvention::Days365 => {
            if !WARNED_365.swap(true, AtomicOrdering::Relaxed) {
                warn!("day-count 365 is a legacy convention; prefer 360 for new bullet operations");
            }
            let dcp = Act365.day_count(window.prev, window.due);
            Ok(interest_factor(apy, Decimal::from(dcp) / Decimal::from(365), true))
        }
        DayCountConvention::Thirty360 => {
            let dcp = window.prev.days_between(&window.due);
            let dct_days = if window.is_first_period && !window.dct_overridden {
                anchor_24th_dct(window.prev)?
            } else {
                window.dct_days
            };
            if dct_days == 0 {
                return Err(AmortizaError::validation("30/360 period has zero-length day-count-total"));
            }
            let months = Decimal::from(12) * Decimal::from(dct_days);
            Ok(interest_factor(apy, Decimal::from(dcp) / months, true))
        }
        DayCountConvention::BusinessDays252 => {
            let Some(variable) = variable else {
                return Err(AmortizaError::validation(
                    "the 252 business-day convention requires a variable index",
                ));
            };
            let business_days = calendar.business_days_between(window.prev, window.due);
            let fixed = interest_factor(apy, Decimal::from(business_days) / Decimal::from(252), true);
            let (variable_factor, _) = cdi_factor(backend, calendar, window.prev, window.due, variable.percentage)?;
            Ok(fixed * variable_factor)
        }
    }
}

/// Validates that a variable index is paired with a compatible day-count
/// convention, per the invariant that the 252 convention requires a
/// variable index and the overnight-interbank index requires 252.
pub fn validate_convention_index_pairing(
    convention: DayCountConvention,
    variable: Option<VariableIndex>,
) -> AmortizaResult<()> {
    use amortiza_indexes::IndexCode;

    match (convention, variable) {
        (DayCountConvention::BusinessDays252, None) => {
            Err(AmortizaError::validation("day-count 252 requires a variable index"))
        }
        (conv, Some(v)) if v.code == IndexCode::OvernightInterbank && conv != DayCountConvention::BusinessDays252 => {
            Err(AmortizaError::validation(
                "the overnight interbank index requires the 252 business-day convention",
            ))
        }
        _ => Ok(()),
    }
}

/// Returns the default B3 calendar used for business-day day counts.
#[must_use]
pub fn default_calendar() -> B3Calendar {
    B3Calendar
}
