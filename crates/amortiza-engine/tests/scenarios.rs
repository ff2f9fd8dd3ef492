//! Concrete end-to-end scenarios with exact expected monetary values,
//! exercised through the public stereotype API against an in-memory
//! backend — the same scenarios a maintainer would hand-check against the
//! reference amortization tables for this kind of credit operation.

use amortiza_core::daycounts::DayCountConvention;
use amortiza_core::types::Date;
use amortiza_engine::prelude::*;
use amortiza_indexes::InMemoryBackend;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Fixed-rate Bullet: a single terminal payment carrying all principal and
/// interest. Exercises the 360 day-count spread factor end to end and the
/// revenue-tax bracket for a 365-day holding period.
#[test]
fn scenario_a_fixed_rate_bullet() {
    let params = OperationParams {
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

    let payments =
        bullet_payments(&params, date(2022, 1, 1), 12, None, None, &[], &mut backend, &calendar).unwrap();

    assert_eq!(payments.len(), 1);
    let payment = payments[0].payment;
    assert_eq!(payment.date, date(2023, 1, 1));
    assert_eq!(payment.raw, dec!(134611.71));
    assert_eq!(payment.tax, dec!(2557.05));
    assert_eq!(payment.net, dec!(132054.66));
    assert_eq!(payment.gain, dec!(14611.71));
    assert_eq!(payment.amort, dec!(120000));
    assert_eq!(payment.bal, Decimal::ZERO);

    let daily =
        bullet_daily(&params, date(2022, 1, 1), 12, None, None, &[], &mut backend, &calendar).unwrap();
    assert_eq!(daily.last().unwrap().bal, payment.raw);
}

/// Price-table, 30/360, 24-month term starting on a date that is not the
/// 24th of its month: the first period's day-count-total must anchor to
/// the surrounding 24th-of-month window rather than the period's natural
/// one-month length, per the 30/360 first-period rule.
#[test]
fn scenario_c_price_table_thirty360_first_period_anchor() {
    let params = OperationParams {
        principal: dec!(481000),
        apy: dec!(19),
        convention: DayCountConvention::Thirty360,
        variable: None,
        calc_date: None,
        tax_exempt: false,
        gain_output: GainOutput::Deferred,
    };
    let mut backend = InMemoryBackend::new();
    let calendar = default_calendar();

    let payments =
        price_table_payments(&params, date(2022, 4, 4), 24, None, &[], &mut backend, &calendar).unwrap();

    assert_eq!(payments.len(), 24);
    for payment in &payments {
        assert_eq!(payment.payment.raw, dec!(23902.55));
    }
    assert_eq!(payments[0].payment.bal, dec!(464120.86));
    assert_eq!(payments.last().unwrap().payment.bal, Decimal::ZERO);
}
