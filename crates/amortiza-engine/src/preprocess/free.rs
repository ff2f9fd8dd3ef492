//! Preprocessor for the Free stereotype: the caller supplies the full
//! scheduled list and this module only validates and passes it through.

use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_indexes::IndexCode;
use rust_decimal::Decimal;

use crate::types::{Amortization, Bare, VariableIndex};

/// Validates a caller-supplied custom schedule.
///
/// Enforces unique, strictly increasing dates, a zero-ratio first entry,
/// and ratios summing to one within tolerance. Rejects the savings-index
/// variable code when unscheduled insertions are also present: savings
/// compounding was never defined for custom schedules with prepayments.
pub fn preprocess_free(
    schedule: Vec<Amortization>,
    unscheduled: &[Bare],
    variable: Option<VariableIndex>,
) -> AmortizaResult<Vec<Amortization>> {
    if schedule.len() < 2 {
        return Err(AmortizaError::validation("a free schedule needs at least 2 entries"));
    }
    if !schedule[0].amortization_ratio.is_zero() {
        return Err(AmortizaError::validation("the first entry of a free schedule must not amortize"));
    }

    for pair in schedule.windows(2) {
        if pair[0].date >= pair[1].date {
            return Err(AmortizaError::ordering(format!(
                "free schedule dates must be strictly increasing, found {} then {}",
                pair[0].date, pair[1].date
            )));
        }
    }

    let sum: Decimal = schedule.iter().skip(1).map(|a| a.amortization_ratio).sum();
    if (sum - Decimal::ONE).abs() > Decimal::new(1, 7) {
        return Err(AmortizaError::validation(format!(
            "free schedule amortization ratios must sum to 1, found {sum}"
        )));
    }

    if !unscheduled.is_empty() {
        if let Some(v) = variable {
            if v.code == IndexCode::Savings {
                return Err(AmortizaError::validation(
                    "the free stereotype does not support the savings variable index alongside unscheduled insertions",
                ));
            }
        }
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortiza_core::types::Date;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn basic_schedule() -> Vec<Amortization> {
        vec![
            Amortization::new(date(2022, 1, 1), Decimal::ZERO, false),
            Amortization::new(date(2022, 6, 1), dec!(0.5), true),
            Amortization::new(date(2022, 12, 1), dec!(0.5), true),
        ]
    }

    #[test]
    fn test_free_schedule_accepted() {
        let schedule = preprocess_free(basic_schedule(), &[], None).unwrap();
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_free_schedule_rejects_bad_ratio_sum() {
        let mut schedule = basic_schedule();
        schedule[1].amortization_ratio = dec!(0.4);
        assert!(preprocess_free(schedule, &[], None).is_err());
    }

    #[test]
    fn test_free_schedule_rejects_savings_with_insertions() {
        let insertion = Bare::new(date(2022, 3, 1), dec!(1000));
        let variable = VariableIndex { code: IndexCode::Savings, percentage: Decimal::ONE_HUNDRED };
        assert!(preprocess_free(basic_schedule(), &[insertion], Some(variable)).is_err());
    }

    #[test]
    fn test_free_schedule_rejects_unordered_dates() {
        let mut schedule = basic_schedule();
        schedule.swap(1, 2);
        assert!(preprocess_free(schedule, &[], None).is_err());
    }
}
