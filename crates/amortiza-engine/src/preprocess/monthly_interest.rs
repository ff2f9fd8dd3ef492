//! Preprocessor for the Monthly-Interest stereotype: interest settled
//! every month, principal due in full with the final installment.

use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use amortiza_indexes::IndexCode;
use rust_decimal::Decimal;

use super::common::{resolve_anniversary, validate_term};
use crate::types::{Amortization, VariableIndex};

/// Builds the `term + 1`-entry schedule for a Monthly-Interest operation.
///
/// `anniversary`, when given, shifts the anchor of every subsequent
/// monthly date (it becomes the first installment date instead of
/// `zero_date + 1 month`).
///
/// Rejects the savings-index variable code: compounding an interest-only
/// schedule against the monthly ranged savings index was never defined.
pub fn preprocess_monthly_interest(
    zero_date: Date,
    term: u32,
    anniversary: Option<Date>,
    variable: Option<VariableIndex>,
) -> AmortizaResult<Vec<Amortization>> {
    validate_term(term)?;
    if let Some(v) = variable {
        if v.code == IndexCode::Savings {
            return Err(AmortizaError::validation(
                "the monthly-interest stereotype does not support the savings variable index",
            ));
        }
    }

    let natural_first = zero_date.add_months(1)?;
    let anchor = resolve_anniversary(natural_first, anniversary)?.unwrap_or(natural_first);

    let mut schedule = Vec::with_capacity(term as usize + 1);
    schedule.push(Amortization::new(zero_date, Decimal::ZERO, false));

    for i in 0..term {
        let date = anchor.add_months(i as i32)?;
        let ratio = if i == term - 1 { Decimal::ONE } else { Decimal::ZERO };
        schedule.push(Amortization::new(date, ratio, true));
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_interest_with_anniversary() {
        let schedule =
            preprocess_monthly_interest(date(2022, 3, 9), 36, Some(date(2022, 3, 23)), None).unwrap();
        assert_eq!(schedule.len(), 37);
        assert_eq!(schedule[1].date, date(2022, 3, 23));
        assert_eq!(schedule[2].date, date(2022, 4, 23));
        assert_eq!(schedule.last().unwrap().amortization_ratio, Decimal::ONE);
        assert!(schedule[1].amortization_ratio.is_zero());
    }

    #[test]
    fn test_monthly_interest_rejects_zero_term() {
        assert!(preprocess_monthly_interest(date(2022, 1, 1), 0, None, None).is_err());
    }

    #[test]
    fn test_monthly_interest_rejects_savings_index() {
        let variable = VariableIndex { code: IndexCode::Savings, percentage: Decimal::ONE_HUNDRED };
        assert!(preprocess_monthly_interest(date(2022, 1, 1), 12, None, Some(variable)).is_err());
    }
}
