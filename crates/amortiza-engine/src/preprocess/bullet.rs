//! Preprocessor for the Bullet stereotype: principal and all interest due
//! in a single terminal payment.

use amortiza_core::error::AmortizaResult;
use amortiza_core::types::Date;
use rust_decimal::Decimal;

use super::common::{resolve_anniversary, validate_term};
use crate::types::{Amortization, DctOverride, PriceLevelAdjustment};

/// Builds the two-entry (zero date, terminal date) schedule for a Bullet
/// operation.
///
/// When `anniversary` is given, it shifts only the terminal date; the
/// original scheduled terminal date is preserved as a
/// [`DctOverride`] so day-count computations for the period still use the
/// natural schedule boundaries.
pub fn preprocess_bullet(
    zero_date: Date,
    term_months: u32,
    anniversary: Option<Date>,
    inflation: Option<PriceLevelAdjustment>,
) -> AmortizaResult<Vec<Amortization>> {
    validate_term(term_months)?;

    let natural_terminal = zero_date.add_months(term_months as i32)?;
    let natural_first = zero_date.add_months(1)?;
    let resolved_anniversary = resolve_anniversary(natural_first, anniversary)?;

    let terminal_date = resolved_anniversary.unwrap_or(natural_terminal);

    let mut terminal = Amortization::new(terminal_date, Decimal::ONE, true);
    if resolved_anniversary.is_some() {
        terminal = terminal.with_dct_override(DctOverride {
            date_from: zero_date,
            date_to: natural_terminal,
            predates_first_amortization: false,
        });
    }
    if let Some(pla) = inflation {
        terminal = terminal.with_price_level_adjustment(pla);
    }

    Ok(vec![Amortization::new(zero_date, Decimal::ZERO, false), terminal])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_bullet_basic_schedule() {
        let schedule = preprocess_bullet(date(2022, 1, 1), 12, None, None).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].date, date(2022, 1, 1));
        assert_eq!(schedule[1].date, date(2023, 1, 1));
        assert_eq!(schedule[1].amortization_ratio, Decimal::ONE);
    }

    #[test]
    fn test_bullet_rejects_zero_term() {
        assert!(preprocess_bullet(date(2022, 1, 1), 0, None, None).is_err());
    }
}
