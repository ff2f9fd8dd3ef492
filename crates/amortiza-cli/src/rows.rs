//! Table/CSV row wrappers around the engine's output types.
//!
//! The engine crate stays free of presentation dependencies, so the CLI
//! wraps its plain-data rows in [`Tabled`] structs rather than deriving
//! `Tabled` on `amortiza_engine::types` directly.

use amortiza_engine::prelude::{DailyReturn, PriceAdjustedPayment};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

/// A displayable row of a payment schedule.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PaymentRow {
    #[tabled(rename = "#")]
    pub no: u32,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Raw")]
    pub raw: Decimal,
    #[tabled(rename = "Tax")]
    pub tax: Decimal,
    #[tabled(rename = "Net")]
    pub net: Decimal,
    #[tabled(rename = "Gain")]
    pub gain: Decimal,
    #[tabled(rename = "Amort")]
    pub amort: Decimal,
    #[tabled(rename = "Inflation")]
    pub pla: Decimal,
    #[tabled(rename = "Balance")]
    pub bal: Decimal,
}

impl From<&PriceAdjustedPayment> for PaymentRow {
    fn from(p: &PriceAdjustedPayment) -> Self {
        Self {
            no: p.payment.no,
            date: p.payment.date.to_string(),
            raw: p.payment.raw,
            tax: p.payment.tax,
            net: p.payment.net,
            gain: p.payment.gain,
            amort: p.payment.amort,
            pla: p.pla,
            bal: p.payment.bal,
        }
    }
}

/// A displayable row of a daily-return series.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DailyReturnRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Day")]
    pub no: u32,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Return")]
    pub value: Decimal,
    #[tabled(rename = "Balance")]
    pub bal: Decimal,
    #[tabled(rename = "Fixed factor")]
    pub fixed_factor: Decimal,
    #[tabled(rename = "Variable factor")]
    pub variable_factor: Decimal,
}

impl From<&DailyReturn> for DailyReturnRow {
    fn from(d: &DailyReturn) -> Self {
        Self {
            period: d.period,
            no: d.no,
            date: d.date.to_string(),
            value: d.value,
            bal: d.bal,
            fixed_factor: d.fixed_factor,
            variable_factor: d.variable_factor,
        }
    }
}
