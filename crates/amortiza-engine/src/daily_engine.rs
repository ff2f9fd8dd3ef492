//! The daily-return engine (component C6): the same ledger machinery as
//! the payment engine, stepped one calendar day at a time instead of one
//! schedule period at a time.

use amortiza_core::calendars::Calendar;
use amortiza_core::daycounts::DayCountConvention;
use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use amortiza_indexes::{cdi_factor, IndexBackend, IndexCode};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::daycount::validate_convention_index_pairing;
use crate::types::{DailyReturn, Ledgers, PriceLevelAdjustment, ScheduleEntry, ShiftRule, VariableIndex};

/// Parameters of a daily-return engine run.
#[derive(Debug, Clone, Copy)]
pub struct DailyEngineInput {
    /// Original principal. Must be `0` or `>= 0.01`.
    pub principal: Decimal,
    /// Nominal annual rate, as a percentage.
    pub apy: Decimal,
    /// The day-count convention governing the per-day spread factor.
    pub convention: DayCountConvention,
    /// The variable-rate index, if any.
    pub variable: Option<VariableIndex>,
}

fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the per-day variable factor `fv` for `day`, or `1` when the
/// operation carries no variable index.
fn variable_factor_for_day(
    variable: Option<VariableIndex>,
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
    day: Date,
) -> AmortizaResult<Decimal> {
    let Some(variable) = variable else {
        return Ok(Decimal::ONE);
    };

    match variable.code {
        IndexCode::OvernightInterbank => {
            if !calendar.is_business_day(day) {
                return Ok(Decimal::ONE);
            }
            let next = day.add_days(1);
            let (factor, _) = cdi_factor(backend, calendar, day, next, variable.percentage)?;
            Ok(factor)
        }
        IndexCode::Savings => {
            let window = backend.get_savings_indexes(day, day.add_days(1))?;
            let Some(r) = window.first() else {
                return Err(AmortizaError::backend(format!("no savings index observation covering {day}")));
            };
            let days_in_window = r.days().max(1);
            let monthly = Decimal::ONE + r.rate * variable.percentage / (Decimal::ONE_HUNDRED * Decimal::ONE_HUNDRED);
            Ok(monthly.powd(Decimal::ONE / Decimal::from(days_in_window)))
        }
        // Inflation indexes correct the balance through `fc`, computed by
        // `price_level_daily_factor` from the period's price-level
        // adjustment, not through `fv`.
        IndexCode::MonthlyInflationA | IndexCode::MonthlyInflationB => Ok(Decimal::ONE),
    }
}

/// Returns the per-day correction factor `fc` for `day`, normalizing the
/// price-level adjustment's monthly rate to a daily geometric rate the
/// same way [`variable_factor_for_day`] does for the savings index: the
/// monthly rate raised to `1 / days_in_window`.
///
/// Returns `1` when the period carries no price-level adjustment.
fn price_level_daily_factor(
    backend: &mut dyn IndexBackend,
    pla: Option<PriceLevelAdjustment>,
    day: Date,
) -> AmortizaResult<Decimal> {
    let Some(pla) = pla else {
        return Ok(Decimal::ONE);
    };
    if pla.code == IndexCode::MonthlyInflationB {
        return Err(AmortizaError::not_implemented(
            "compounding is not implemented for the general market price index (IGPM)",
        ));
    }

    let shift_months: i32 = match pla.shift {
        ShiftRule::Auto | ShiftRule::OneMonth => 1,
        ShiftRule::TwoMonths => 2,
    };
    let published_month = day.add_months(-shift_months)?.start_of_month();
    let observations = backend.get_monthly_indexes(pla.code, published_month, published_month.add_months(1)?)?;
    let Some(observation) = observations.first() else {
        return Err(AmortizaError::backend(format!("no monthly inflation observation covering {day}")));
    };

    let month_start = day.start_of_month();
    let days_in_window = month_start.days_between(&month_start.add_months(1)?).max(1);
    let monthly = Decimal::ONE + observation.value / Decimal::ONE_HUNDRED;
    Ok(monthly.powd(Decimal::ONE / Decimal::from(days_in_window)).max(Decimal::ONE))
}

/// Runs the daily-return engine over an already-interleaved schedule.
pub fn run_daily_engine(
    input: &DailyEngineInput,
    entries: &[ScheduleEntry],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<DailyReturn>> {
    validate_convention_index_pairing(input.convention, input.variable)?;
    if entries.len() < 2 {
        return Err(AmortizaError::validation("a daily-return schedule needs at least 2 entries"));
    }
    if input.principal.is_zero() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut balance = input.principal;
    let mut ledgers = Ledgers::default();
    let mut period = 0u32;
    let mut day_in_period = 0u32;
    let last_window_index = entries.len().saturating_sub(2);

    for (window_index, window) in entries.windows(2).enumerate() {
        period += 1;
        day_in_period = 0;
        let prev_date = window[0].date();
        let curr = &window[1];
        let curr_date = curr.date();
        let period_days = prev_date.days_between(&curr_date).max(1);
        let pla = curr.as_scheduled().and_then(|a| a.price_level_adjustment);
        let is_last_window = window_index == last_window_index;

        ledgers.interest.current = Decimal::ZERO;

        let mut day = prev_date;
        while day < curr_date {
            day = day.add_days(1);
            day_in_period += 1;
            let is_settlement_day = day == curr_date;
            let skip_settlement = is_settlement_day && is_last_window;

            let fv = variable_factor_for_day(input.variable, backend, calendar, day)?;
            let fc = price_level_daily_factor(backend, pla, day)?;

            let base = Decimal::ONE + input.apy / Decimal::ONE_HUNDRED;
            let fs = match input.convention {
                DayCountConvention::Days360 => base.powd(Decimal::ONE / Decimal::from(360)),
                DayCountConvention::Days365 => base.powd(Decimal::ONE / Decimal::from(365)),
                DayCountConvention::Thirty360 => base.powd(Decimal::ONE / Decimal::from(12 * period_days)),
                DayCountConvention::BusinessDays252 => {
                    if fv > Decimal::ONE {
                        base.powd(Decimal::ONE / Decimal::from(252))
                    } else {
                        Decimal::ONE
                    }
                }
            };

            let daily_interest = balance * (fs * fv * fc - Decimal::ONE);
            ledgers.interest.accrue_incremental(daily_interest);

            let mut event_amort = Decimal::ZERO;
            if is_settlement_day && !skip_settlement {
                match curr {
                    ScheduleEntry::Scheduled(a) => {
                        let adjustment = ledgers.amortization_ratio.adjustment_factor();
                        let ratio = a.amortization_ratio * adjustment;
                        event_amort = (input.principal * ratio).min(balance);
                        ledgers.amortization_ratio.regular += a.amortization_ratio;
                        ledgers.amortization_ratio.current += ratio;

                        if a.amortizes_interest {
                            let released = ledgers.interest.release_deferred(ledgers.amortization_ratio.current);
                            let paid = ledgers.interest.current + released;
                            ledgers.interest.settle(paid);
                            ledgers.interest.current -= paid;
                        } else {
                            ledgers.interest.defer(ledgers.interest.current);
                        }
                    }
                    ScheduleEntry::Unscheduled(b) => {
                        let value = if b.is_settle_remaining() {
                            balance + ledgers.interest.outstanding()
                        } else {
                            b.value
                        };
                        let v1 = value.min(ledgers.interest.outstanding());
                        let v3 = value - v1;
                        ledgers.interest.settle(v1);
                        ledgers.interest.current -= v1;
                        ledgers.amortization_ratio.current += v3 / input.principal;
                        event_amort = v3.min(balance);
                    }
                }
            }

            balance -= event_amort;
            let bal = balance + ledgers.interest.outstanding();

            out.push(DailyReturn {
                no: day_in_period,
                period,
                date: day,
                value: quantize(daily_interest),
                bal: quantize(bal),
                fixed_factor: fs,
                variable_factor: fv,
            });

            if !is_last_window && balance.is_zero() {
                return Ok(out);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daycount::default_calendar;
    use crate::types::Amortization;
    use amortiza_indexes::InMemoryBackend;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_returns_cover_the_full_bullet_period() {
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 2, 1), Decimal::ONE, true)),
        ];
        let input = DailyEngineInput {
            principal: dec!(120000),
            apy: dec!(12),
            convention: DayCountConvention::Days360,
            variable: None,
        };
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let result = run_daily_engine(&input, &entries, &mut backend, &calendar).unwrap();

        assert_eq!(result.len(), 31);
        // The final row is the settlement day itself: principal plus every
        // day of accrued interest, not yet reduced by the amortization.
        assert!(result.last().unwrap().bal > dec!(134000));
    }

    #[test]
    fn test_daily_reconciles_with_payment_engine_on_final_balance() {
        use crate::payment_engine::{run_payment_engine, PaymentEngineInput};
        use crate::types::GainOutput;

        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 2, 1), Decimal::ONE, true)),
        ];
        let daily_input = DailyEngineInput {
            principal: dec!(120000),
            apy: dec!(12),
            convention: DayCountConvention::Days360,
            variable: None,
        };
        let payment_input = PaymentEngineInput {
            principal: dec!(120000),
            apy: dec!(12),
            convention: DayCountConvention::Days360,
            variable: None,
            calc_date: None,
            tax_exempt: false,
            gain_output: GainOutput::Deferred,
        };

        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let daily = run_daily_engine(&daily_input, &entries, &mut backend, &calendar).unwrap();
        let payment = run_payment_engine(&payment_input, &entries, &mut backend, &calendar).unwrap();

        assert_eq!(daily.last().unwrap().bal, payment.last().unwrap().payment.raw);
    }

    #[test]
    fn test_252_fixed_factor_gated_on_published_index() {
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2024, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2024, 1, 4), Decimal::ONE, true)),
        ];
        let input = DailyEngineInput {
            principal: dec!(1000),
            apy: dec!(12),
            convention: DayCountConvention::BusinessDays252,
            variable: Some(VariableIndex { code: IndexCode::OvernightInterbank, percentage: dec!(100) }),
        };
        let mut backend = InMemoryBackend::new();
        // 2024-01-02 is a business day with a published CDI fixing of 0%,
        // leaving fv == 1; 2024-01-03 publishes a positive fixing, fv > 1.
        backend.add_daily(IndexCode::OvernightInterbank, date(2024, 1, 2), dec!(0));
        backend.add_daily(IndexCode::OvernightInterbank, date(2024, 1, 3), dec!(0.04));
        let calendar = default_calendar();
        let result = run_daily_engine(&input, &entries, &mut backend, &calendar).unwrap();

        let first = result.iter().find(|r| r.date == date(2024, 1, 2)).unwrap();
        assert_eq!(first.variable_factor, Decimal::ONE);
        assert_eq!(first.fixed_factor, Decimal::ONE);

        let second = result.iter().find(|r| r.date == date(2024, 1, 3)).unwrap();
        assert!(second.variable_factor > Decimal::ONE);
        assert!(second.fixed_factor > Decimal::ONE);
    }

    #[test]
    fn test_monthly_inflation_a_normalizes_to_a_daily_factor() {
        let pla = PriceLevelAdjustment {
            code: IndexCode::MonthlyInflationA,
            base_date: date(2022, 3, 1),
            period: 1,
            shift: ShiftRule::OneMonth,
            amortizes_adjustment: true,
        };
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 4, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(
                Amortization::new(date(2022, 5, 1), Decimal::ONE, true).with_price_level_adjustment(pla),
            ),
        ];
        let input = DailyEngineInput {
            principal: dec!(10000),
            apy: dec!(0),
            convention: DayCountConvention::Days360,
            variable: Some(VariableIndex { code: IndexCode::MonthlyInflationA, percentage: dec!(100) }),
        };
        let mut backend = InMemoryBackend::new();
        backend.add_monthly(IndexCode::MonthlyInflationA, 2022, 3, dec!(1.24));
        backend.add_monthly(IndexCode::MonthlyInflationA, 2022, 4, dec!(1.00));
        let calendar = default_calendar();
        let result = run_daily_engine(&input, &entries, &mut backend, &calendar).unwrap();

        // Every day in April compounds the same daily-normalized correction
        // factor, so the principal should have grown monotonically.
        assert!(result.iter().all(|r| r.value > Decimal::ZERO));
        assert!(result.last().unwrap().bal > dec!(10000));
    }

    #[test]
    fn test_monthly_inflation_b_is_not_implemented() {
        let pla = PriceLevelAdjustment {
            code: IndexCode::MonthlyInflationB,
            base_date: date(2022, 3, 1),
            period: 1,
            shift: ShiftRule::OneMonth,
            amortizes_adjustment: true,
        };
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 4, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(
                Amortization::new(date(2022, 5, 1), Decimal::ONE, true).with_price_level_adjustment(pla),
            ),
        ];
        let input = DailyEngineInput {
            principal: dec!(10000),
            apy: dec!(0),
            convention: DayCountConvention::Days360,
            variable: None,
        };
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let result = run_daily_engine(&input, &entries, &mut backend, &calendar);
        assert!(matches!(result, Err(AmortizaError::NotImplemented { .. })));
    }

    #[test]
    fn test_rejects_too_short_schedule() {
        let entries = vec![ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false))];
        let input = DailyEngineInput {
            principal: dec!(1000),
            apy: dec!(12),
            convention: DayCountConvention::Days360,
            variable: None,
        };
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        assert!(run_daily_engine(&input, &entries, &mut backend, &calendar).is_err());
    }
}
