//! The payment engine (component C5): walks an interleaved schedule and
//! emits one quantized [`Payment`] (or [`PriceAdjustedPayment`]) per
//! consecutive pair of schedule entries.

use amortiza_core::calendars::Calendar;
use amortiza_core::daycounts::DayCountConvention;
use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use amortiza_indexes::{ipca_factor, IndexBackend, IndexCode};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::auxmath::calculate_revenue_tax;
use crate::daycount::{spread_factor, validate_convention_index_pairing, PeriodWindow};
use crate::types::{
    CalcDate, GainOutput, Ledgers, Payment, PriceAdjustedPayment, PriceLevelAdjustment, ScheduleEntry,
    VariableIndex,
};

/// Parameters of a payment-engine run, shared across every period.
#[derive(Debug, Clone, Copy)]
pub struct PaymentEngineInput {
    /// Original principal. Must be `0` or `>= 0.01`.
    pub principal: Decimal,
    /// Nominal annual rate, as a percentage (e.g. `12` for 12%).
    pub apy: Decimal,
    /// The day-count convention governing `fs`.
    pub convention: DayCountConvention,
    /// The variable-rate index, if the operation is variable or inflation-indexed.
    pub variable: Option<VariableIndex>,
    /// Cutoff date, if the run should stop (or freeze) partway through.
    pub calc_date: Option<CalcDate>,
    /// Whether interest is exempt from revenue tax.
    pub tax_exempt: bool,
    /// Which interest figure `Payment::gain` reports.
    pub gain_output: GainOutput,
}

fn validate_input(input: &PaymentEngineInput, entries: &[ScheduleEntry]) -> AmortizaResult<()> {
    if input.principal < Decimal::ZERO || (input.principal > Decimal::ZERO && input.principal < Decimal::new(1, 2)) {
        return Err(AmortizaError::validation("principal must be 0 or at least 0.01"));
    }
    if entries.len() < 2 {
        return Err(AmortizaError::validation("a payment schedule needs at least 2 entries"));
    }
    validate_convention_index_pairing(input.convention, input.variable)?;

    let ratio_sum: Decimal = entries
        .iter()
        .filter_map(ScheduleEntry::as_scheduled)
        .map(|a| a.amortization_ratio)
        .sum();
    if (ratio_sum - Decimal::ONE).abs() > Decimal::new(1, 7) {
        return Err(AmortizaError::validation(format!(
            "scheduled amortization ratios must sum to 1, found {ratio_sum}"
        )));
    }

    for entry in entries {
        if let ScheduleEntry::Scheduled(a) = entry {
            if a.price_level_adjustment.is_some() {
                let is_inflation_variable = matches!(
                    input.variable.map(|v| v.code),
                    Some(IndexCode::MonthlyInflationA) | Some(IndexCode::MonthlyInflationB)
                );
                if !is_inflation_variable {
                    return Err(AmortizaError::validation(
                        "a price-level adjustment requires an inflation-coded variable index",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn correction_factor(
    convention: DayCountConvention,
    window: PeriodWindow,
    pla: Option<PriceLevelAdjustment>,
    backend: &mut dyn IndexBackend,
) -> AmortizaResult<Decimal> {
    let Some(pla) = pla else {
        return Ok(Decimal::ONE);
    };

    let ratio = match convention {
        DayCountConvention::Thirty360 if window.dct_days > 0 => {
            Decimal::from(window.prev.days_between(&window.due)) / Decimal::from(window.dct_days)
        }
        _ => Decimal::ONE,
    };

    ipca_factor(backend, pla.code, pla.base_date, pla.period, pla.shift, ratio)
}

/// Runs the payment engine over an already-interleaved schedule.
///
/// Returns a [`PriceAdjustedPayment`] for every period; callers whose
/// operation carries no price-level adjustment can discard the `pla`
/// field (it is always `0` in that case).
pub fn run_payment_engine(
    input: &PaymentEngineInput,
    entries: &[ScheduleEntry],
    backend: &mut dyn IndexBackend,
    calendar: &dyn Calendar,
) -> AmortizaResult<Vec<PriceAdjustedPayment>> {
    validate_input(input, entries)?;

    if input.principal.is_zero() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut balance = input.principal;
    let mut ledgers = Ledgers::default();
    let mut no = 0u32;
    let mut is_first_period = true;
    let zero_date = entries[0].date();

    for window in entries.windows(2) {
        let prev_date = window[0].date();
        let curr = &window[1];
        let curr_date = curr.date();

        let due = match input.calc_date {
            Some(cd) => cd.value.min(curr_date),
            None => curr_date,
        };
        let past_calc_date = input.calc_date.is_some_and(|cd| prev_date >= cd.value);
        if past_calc_date && !input.calc_date.is_some_and(|cd| cd.runaway) {
            break;
        }

        let dct_override = curr.as_scheduled().and_then(|a| a.dct_override);
        let dct_days = match dct_override {
            Some(o) => o.date_from.days_between(&o.date_to).abs(),
            None => due.days_between(&prev_date).abs(),
        };
        let period_window = PeriodWindow {
            prev: prev_date,
            due,
            dct_days,
            is_first_period,
            dct_overridden: dct_override.is_some(),
        };
        is_first_period = false;

        let pla = curr.as_scheduled().and_then(|a| a.price_level_adjustment);

        let (fs, fc) = if past_calc_date {
            (Decimal::ONE, Decimal::ONE)
        } else {
            let fs = spread_factor(input.convention, input.apy, period_window, input.variable, backend, calendar)?;
            let fc = correction_factor(input.convention, period_window, pla, backend)?;
            (fs, fc)
        };

        let period_interest = balance * (fs - Decimal::ONE);
        let period_correction = balance * (fc - Decimal::ONE);
        ledgers.interest.accrue(period_interest);
        ledgers.correction += period_correction;

        let (amort, interest_paid, correction_paid) = match curr {
            ScheduleEntry::Scheduled(a) => {
                let adjustment = ledgers.amortization_ratio.adjustment_factor();
                let ratio = a.amortization_ratio * adjustment;
                let amort = (input.principal * ratio).min(balance);

                ledgers.amortization_ratio.regular += a.amortization_ratio;
                ledgers.amortization_ratio.current += ratio;

                let interest_paid = if a.amortizes_interest {
                    let released = ledgers.interest.release_deferred(ledgers.amortization_ratio.current);
                    let paid = ledgers.interest.current + released;
                    ledgers.interest.settle(paid);
                    paid
                } else {
                    ledgers.interest.defer(ledgers.interest.current);
                    Decimal::ZERO
                };

                let correction_paid = if a.price_level_adjustment.map(|p| p.amortizes_adjustment).unwrap_or(false) {
                    let paid = ledgers.correction;
                    ledgers.correction = Decimal::ZERO;
                    paid
                } else {
                    Decimal::ZERO
                };

                (amort, interest_paid, correction_paid)
            }
            ScheduleEntry::Unscheduled(b) => {
                let settling_remainder = b.is_settle_remaining();
                let value = if settling_remainder {
                    balance + ledgers.interest.outstanding() + ledgers.correction
                } else {
                    b.value
                };
                if !settling_remainder && value > balance + ledgers.interest.outstanding() + ledgers.correction {
                    return Err(AmortizaError::validation(format!(
                        "unscheduled cashflow of {value} on {curr_date} exceeds the outstanding balance {balance}"
                    )));
                }

                let v1 = value.min(ledgers.interest.outstanding());
                let remaining = value - v1;
                let v2 = remaining.min(ledgers.correction);
                let v3 = remaining - v2;

                ledgers.interest.settle(v1);
                ledgers.correction -= v2;
                ledgers.amortization_ratio.current += v3 / input.principal;

                (v3, v1, v2)
            }
        };

        balance -= amort;
        no += 1;

        let gain = match input.gain_output {
            GainOutput::Current => ledgers.interest.current,
            GainOutput::Deferred => ledgers.interest.current + ledgers.interest.deferred,
            GainOutput::Settled => interest_paid,
        };

        let tax = if input.tax_exempt {
            Decimal::ZERO
        } else {
            let days_held = zero_date.days_between(&curr_date).max(1);
            calculate_revenue_tax(interest_paid, days_held)?
        };

        let raw = amort + interest_paid + correction_paid;
        let net = raw - tax;

        let payment = Payment {
            no,
            date: curr_date,
            raw: quantize(raw),
            tax: quantize(tax),
            net: quantize(net),
            gain: quantize(gain),
            amort: quantize(amort),
            bal: quantize(balance),
        };

        out.push(PriceAdjustedPayment { payment, pla: quantize(correction_paid) });

        if balance.is_zero() {
            break;
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

    fn bullet_input() -> PaymentEngineInput {
        PaymentEngineInput {
            principal: dec!(120000),
            apy: dec!(12),
            convention: DayCountConvention::Days360,
            variable: None,
            calc_date: None,
            tax_exempt: false,
            gain_output: GainOutput::Deferred,
        }
    }

    #[test]
    fn test_bullet_single_payment() {
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2023, 1, 1), Decimal::ONE, true)),
        ];
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let result = run_payment_engine(&bullet_input(), &entries, &mut backend, &calendar).unwrap();

        assert_eq!(result.len(), 1);
        let payment = result[0].payment;
        assert_eq!(payment.amort, dec!(120000));
        assert_eq!(payment.bal, Decimal::ZERO);
        assert_eq!(payment.raw, dec!(134611.71));
        assert_eq!(payment.tax, dec!(2557.05));
        assert_eq!(payment.net, dec!(132054.66));
        assert_eq!(payment.gain, dec!(14611.71));
    }

    #[test]
    fn test_zero_principal_yields_no_payments() {
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2023, 1, 1), Decimal::ONE, true)),
        ];
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let mut input = bullet_input();
        input.principal = Decimal::ZERO;
        let result = run_payment_engine(&input, &entries, &mut backend, &calendar).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_rejects_bad_ratio_sum() {
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Scheduled(Amortization::new(date(2023, 1, 1), dec!(0.5), true)),
        ];
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        assert!(run_payment_engine(&bullet_input(), &entries, &mut backend, &calendar).is_err());
    }

    #[test]
    fn test_rejects_oversized_prepayment() {
        use crate::types::Bare;
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Unscheduled(Bare::new(date(2022, 6, 1), dec!(999999999))),
            ScheduleEntry::Scheduled(Amortization::new(date(2023, 1, 1), Decimal::ONE, true)),
        ];
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        assert!(run_payment_engine(&bullet_input(), &entries, &mut backend, &calendar).is_err());
    }

    #[test]
    fn test_full_prepayment_settles_schedule() {
        use crate::types::Bare;
        let entries = vec![
            ScheduleEntry::Scheduled(Amortization::new(date(2022, 1, 1), Decimal::ZERO, false)),
            ScheduleEntry::Unscheduled(Bare::settle_remaining(date(2022, 6, 1))),
            ScheduleEntry::Scheduled(Amortization::new(date(2023, 1, 1), Decimal::ONE, true)),
        ];
        let mut backend = InMemoryBackend::new();
        let calendar = default_calendar();
        let result = run_payment_engine(&bullet_input(), &entries, &mut backend, &calendar).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].payment.bal, Decimal::ZERO);
    }
}
