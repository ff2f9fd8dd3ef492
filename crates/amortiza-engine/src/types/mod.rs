//! Data types shared across the amortization and daily-return engines.

mod ledger;
mod output;
mod schedule_entry;

pub use ledger::Ledgers;
pub use output::{DailyReturn, GainOutput, Payment, PriceAdjustedPayment};
pub use schedule_entry::{
    Amortization, Bare, CalcDate, DctOverride, PriceLevelAdjustment, ScheduleEntry, ShiftRule,
    VariableIndex, MAX_VALUE,
};
