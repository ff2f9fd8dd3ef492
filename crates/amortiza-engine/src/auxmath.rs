//! Auxiliary math (component C7): the revenue-tax bracket table and the
//! Price-table constant-installment amortization generator.

use amortiza_core::error::{AmortizaError, AmortizaResult};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::factors::interest_factor;

/// Looks up the withholding rate for fixed-income gains held from `begin`
/// to `end`, in calendar days.
///
/// Brackets: `(0,180] -> 22.5%`, `(180,360] -> 20%`, `(360,720] -> 17.5%`,
/// `(720,inf) -> 15%`.
pub fn revenue_tax_rate(days_held: i64) -> AmortizaResult<Decimal> {
    if days_held <= 0 {
        return Err(AmortizaError::validation("revenue tax horizon must be positive"));
    }
    Ok(match days_held {
        1..=180 => dec!(22.5),
        181..=360 => dec!(20.0),
        361..=720 => dec!(17.5),
        _ => dec!(15.0),
    })
}

/// Applies the revenue-tax bracket to `gain` for a holding period of
/// `days_held` calendar days.
pub fn calculate_revenue_tax(gain: Decimal, days_held: i64) -> AmortizaResult<Decimal> {
    let rate = revenue_tax_rate(days_held)?;
    Ok(gain * rate / Decimal::ONE_HUNDRED)
}

/// Generates the constant-installment (Price-table) amortization ratios
/// for `term` monthly periods at annual rate `apy`.
///
/// Solves the closed form for the constant payment
/// `P = principal * (f - 1) / (1 - f^-term)`, where
/// `f = interest_factor(apy, 1/12)`, then derives each period's
/// amortization ratio from the principal it retires.
#[must_use]
pub fn price_table_ratios(apy: Decimal, term: u32) -> Vec<Decimal> {
    if term == 0 {
        return Vec::new();
    }

    let f = interest_factor(apy, Decimal::ONE / Decimal::from(12), true);
    if f == Decimal::ONE {
        // Zero-rate special case: equal principal amortization every period.
        return vec![Decimal::ONE / Decimal::from(term); term as usize];
    }

    let f_minus_one = f - Decimal::ONE;
    let f_inv_term = f.powi(-(term as i64));
    let installment_fraction = f_minus_one / (Decimal::ONE - f_inv_term);

    let mut ratios = Vec::with_capacity(term as usize);
    let mut balance = Decimal::ONE;
    for i in 0..term {
        let interest_due = balance * f_minus_one;
        let mut amortized = installment_fraction - interest_due;
        if i == term - 1 {
            // Absorb rounding drift on the final installment so the
            // balance reaches exactly zero.
            amortized = balance;
        }
        ratios.push(amortized);
        balance -= amortized;
    }
    ratios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_tax_brackets() {
        assert_eq!(revenue_tax_rate(30).unwrap(), dec!(22.5));
        assert_eq!(revenue_tax_rate(180).unwrap(), dec!(22.5));
        assert_eq!(revenue_tax_rate(181).unwrap(), dec!(20.0));
        assert_eq!(revenue_tax_rate(360).unwrap(), dec!(20.0));
        assert_eq!(revenue_tax_rate(361).unwrap(), dec!(17.5));
        assert_eq!(revenue_tax_rate(720).unwrap(), dec!(17.5));
        assert_eq!(revenue_tax_rate(721).unwrap(), dec!(15.0));
    }

    #[test]
    fn test_revenue_tax_monotonic_decrease() {
        let mut previous = dec!(100);
        for days in [30, 200, 400, 1000] {
            let rate = revenue_tax_rate(days).unwrap();
            assert!(rate <= previous);
            previous = rate;
        }
    }

    #[test]
    fn test_revenue_tax_rejects_nonpositive_horizon() {
        assert!(revenue_tax_rate(0).is_err());
        assert!(revenue_tax_rate(-5).is_err());
    }

    #[test]
    fn test_price_table_ratios_sum_to_one() {
        let ratios = price_table_ratios(dec!(19), 24);
        assert_eq!(ratios.len(), 24);
        let sum: Decimal = ratios.iter().sum();
        assert!((sum - Decimal::ONE).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_price_table_ratios_zero_rate_is_equal_split() {
        let ratios = price_table_ratios(Decimal::ZERO, 4);
        for r in &ratios {
            assert_eq!(*r, dec!(0.25));
        }
    }
}
