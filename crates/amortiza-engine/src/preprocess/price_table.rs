//! Preprocessor for the Price-table stereotype: constant monthly
//! installments, each retiring a growing share of principal.

use amortiza_core::error::AmortizaResult;
use amortiza_core::types::Date;

use super::common::{resolve_anniversary, validate_term};
use crate::auxmath::price_table_ratios;
use crate::types::Amortization;

/// Builds the `term + 1`-entry schedule for a Price-table operation, with
/// amortization ratios taken from [`price_table_ratios`].
pub fn preprocess_price_table(
    zero_date: Date,
    term: u32,
    apy: rust_decimal::Decimal,
    anniversary: Option<Date>,
) -> AmortizaResult<Vec<Amortization>> {
    validate_term(term)?;

    let natural_first = zero_date.add_months(1)?;
    let anchor = resolve_anniversary(natural_first, anniversary)?.unwrap_or(natural_first);

    let ratios = price_table_ratios(apy, term);

    let mut schedule = Vec::with_capacity(term as usize + 1);
    schedule.push(Amortization::new(zero_date, rust_decimal::Decimal::ZERO, false));
    for (i, ratio) in ratios.into_iter().enumerate() {
        let date = anchor.add_months(i as i32)?;
        schedule.push(Amortization::new(date, ratio, true));
    }

    Ok(schedule)
}
