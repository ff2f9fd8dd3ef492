//! Output rows produced by the payment and daily-return engines.

use amortiza_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which interest figure a [`Payment`]'s `gain` field reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GainOutput {
    /// Interest accrued this period only.
    Current,
    /// Current plus interest deferred from past periods.
    #[default]
    Deferred,
    /// Interest actually settled (paid in cash) this period.
    Settled,
}

/// One row of a payment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// 1-based payment number.
    pub no: u32,
    /// The payment date.
    pub date: Date,
    /// Gross amount due (principal + interest [+ inflation]).
    pub raw: Decimal,
    /// Withheld revenue tax.
    pub tax: Decimal,
    /// Net amount paid (`raw - tax`).
    pub net: Decimal,
    /// Interest portion, per the operation's [`GainOutput`] mode.
    pub gain: Decimal,
    /// Principal amortized this period.
    pub amort: Decimal,
    /// Outstanding balance after this payment.
    pub bal: Decimal,
}

/// A [`Payment`] extended with the inflation component paid this period,
/// produced when the operation is indexed to an inflation index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAdjustedPayment {
    /// The underlying payment fields.
    pub payment: Payment,
    /// Inflation (price-level adjustment) component paid this period.
    pub pla: Decimal,
}

/// One row of a daily-return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    /// Day-in-period counter (resets at each scheduled/unscheduled event).
    pub no: u32,
    /// 1-based period number.
    pub period: u32,
    /// The calendar date this row reports.
    pub date: Date,
    /// Interest accrued on this day (quantized).
    pub value: Decimal,
    /// Outstanding balance after this day (quantized).
    pub bal: Decimal,
    /// Unrounded fixed-rate (spread) factor applied on this day.
    pub fixed_factor: Decimal,
    /// Unrounded variable-rate factor applied on this day.
    pub variable_factor: Decimal,
}
