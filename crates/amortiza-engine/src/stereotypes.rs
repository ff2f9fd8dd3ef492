//! Public entry points: one function per amortization stereotype, each
//! wiring a preprocessor into the schedule interleaver and then into the
//! payment or daily-return engine.

use amortiza_core::calendars::Calendar;
use amortiza_core::daycounts::DayCountConvention;
use amortiza_core::error::AmortizaResult;
use amortiza_core::types::Date;
use amortiza_indexes::IndexBackend;
use rust_decimal::Decimal;

use crate::daily_engine::{run_daily_engine, DailyEngineInput};
use crate::interleave::interleave;
use crate::payment_engine::{run_payment_engine, PaymentEngineInput};
use crate::preprocess::{preprocess_bullet, preprocess_free, preprocess_monthly_interest, preprocess_price_table};
use crate::types::{Amortization, Bare, CalcDate, DailyReturn, GainOutput, PriceAdjustedPayment, PriceLevelAdjustment, VariableIndex};

/// Common per-call parameters shared by every stereotype entry point.
#[derive(Debug, Clone, Copy)]
pub struct OperationParams {
    /// Principal disbursed at `zero_date`.
    pub principal: Decimal,
    /// Nominal annual rate, as a percentage.
    pub apy: Decimal,
    /// The day-count convention governing accrual.
    pub convention: DayCountConvention,
    /// The variable-rate index, if the operation is variable or inflation-indexed.
    pub variable: Option<VariableIndex>,
    /// Cutoff date, if the caller wants the run truncated or frozen.
    pub calc_date: Option<CalcDate>,
    /// Whether interest is exempt from revenue tax.
    pub tax_exempt: bool,
    /// Which interest figure `Payment::gain` reports.
    pub gain_output: GainOutput,
}

fn payment_input(params: &OperationParams) -> PaymentEngineInput {
    PaymentEngineInput {
        principal: params.principal,
        apy: params.apy,
        convention: params.convention,
        variable: params.variable,
        calc_date: params.calc_date,
        tax_exempt: params.tax_exempt,
        gain_output: params.gain_output,
    }
}

fn daily_input(params: &OperationParams) -> DailyEngineInput {
    DailyEngineInput {
        principal: params.principal,
        apy: params.apy,
        convention: params.convention,
        variable: params.variable,
    }
}

/// Runs a Bullet operation's payment schedule: principal and all interest
/// due in a single terminal payment.
pub fn bullet_payments(
    params: &OperationParams,
    zero_date: Date,
    term_months: u32,
    anniversary: Option<Date>,
    inflation: Option<PriceLevelAdjustment>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<PriceAdjustedPayment>> {
    let scheduled = preprocess_bullet(zero_date, term_months, anniversary, inflation)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_payment_engine(&payment_input(params), &entries, backend, calendar)
}

/// Runs a Bullet operation's daily-return series.
pub fn bullet_daily(
    params: &OperationParams,
    zero_date: Date,
    term_months: u32,
    anniversary: Option<Date>,
    inflation: Option<PriceLevelAdjustment>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<DailyReturn>> {
    let scheduled = preprocess_bullet(zero_date, term_months, anniversary, inflation)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_daily_engine(&daily_input(params), &entries, backend, calendar)
}

/// Runs a Monthly-Interest operation's payment schedule: interest settled
/// every month, principal due in full with the final installment.
pub fn monthly_interest_payments(
    params: &OperationParams,
    zero_date: Date,
    term: u32,
    anniversary: Option<Date>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<PriceAdjustedPayment>> {
    let scheduled = preprocess_monthly_interest(zero_date, term, anniversary, params.variable)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_payment_engine(&payment_input(params), &entries, backend, calendar)
}

/// Runs a Monthly-Interest operation's daily-return series.
pub fn monthly_interest_daily(
    params: &OperationParams,
    zero_date: Date,
    term: u32,
    anniversary: Option<Date>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<DailyReturn>> {
    let scheduled = preprocess_monthly_interest(zero_date, term, anniversary, params.variable)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_daily_engine(&daily_input(params), &entries, backend, calendar)
}

/// Runs a Price-table operation's payment schedule: constant monthly
/// installments, each retiring a growing share of principal.
pub fn price_table_payments(
    params: &OperationParams,
    zero_date: Date,
    term: u32,
    anniversary: Option<Date>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<PriceAdjustedPayment>> {
    let scheduled = preprocess_price_table(zero_date, term, params.apy, anniversary)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_payment_engine(&payment_input(params), &entries, backend, calendar)
}

/// Runs a Price-table operation's daily-return series.
pub fn price_table_daily(
    params: &OperationParams,
    zero_date: Date,
    term: u32,
    anniversary: Option<Date>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<DailyReturn>> {
    let scheduled = preprocess_price_table(zero_date, term, params.apy, anniversary)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_daily_engine(&daily_input(params), &entries, backend, calendar)
}

/// Runs a Free operation's payment schedule: the caller supplies the full
/// scheduled list, which is validated and interleaved before running.
pub fn free_payments(
    params: &OperationParams,
    scheduled: Vec<Amortization>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<PriceAdjustedPayment>> {
    let scheduled = preprocess_free(scheduled, unscheduled, params.variable)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_payment_engine(&payment_input(params), &entries, backend, calendar)
}

/// Runs a Free operation's daily-return series.
pub fn free_daily(
    params: &OperationParams,
    scheduled: Vec<Amortization>,
    unscheduled: &[Bare],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<DailyReturn>> {
    let scheduled = preprocess_free(scheduled, unscheduled, params.variable)?;
    let entries = interleave(&scheduled, unscheduled)?;
    run_daily_engine(&daily_input(params), &entries, backend, calendar)
}
