//! Validation shared by all four stereotype preprocessors.

use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;

/// Validates an optional anniversary date against the natural first
/// payment date, returning `None` if the anniversary is absent or
/// redundant (identical to the natural date), and the anniversary
/// otherwise.
///
/// An anniversary more than 20 days from the natural first payment is
/// rejected: the stereotype preprocessors only model a cadence shift, not
/// an arbitrarily irregular first period.
pub fn resolve_anniversary(natural_first: Date, anniversary: Option<Date>) -> AmortizaResult<Option<Date>> {
    let Some(anniversary) = anniversary else {
        return Ok(None);
    };

    if anniversary == natural_first {
        return Ok(None);
    }

    let delta = (anniversary.days_between(&natural_first)).abs();
    if delta > 20 {
        return Err(AmortizaError::validation(format!(
            "anniversary date {anniversary} is {delta} days from the natural first payment {natural_first}, exceeding the 20-day limit"
        )));
    }

    Ok(Some(anniversary))
}

/// Validates `term >= 1`.
pub fn validate_term(term: u32) -> AmortizaResult<()> {
    if term == 0 {
        return Err(AmortizaError::validation("term must be at least 1"));
    }
    Ok(())
}
