//! # Amortiza Engine
//!
//! Amortization stereotypes and the payment/daily-return engines for
//! Brazilian fixed-income credit operations.
//!
//! This crate provides:
//!
//! - **Stereotypes**: Bullet, Monthly-Interest, Price-table, and Free
//!   amortization shapes, each preprocessed into a canonical schedule.
//! - **Payment engine**: per-period settlement, producing quantized
//!   `Payment` rows with interest, tax, amortization, and balance.
//! - **Daily-return engine**: day-by-day accrual reporting for the same
//!   schedules, reconciling against the payment engine's totals.
//! - **Day-count matrix**: 360, legacy 365, 30/360, and business-day/252
//!   spread-factor computation, the last paired with the CDI index.
//!
//! ## Example
//!
//! ```rust,ignore
//! use amortiza_engine::prelude::*;
//! use amortiza_core::daycounts::DayCountConvention;
//! use amortiza_core::types::Date;
//! use amortiza_indexes::InMemoryBackend;
//! use rust_decimal_macros::dec;
//!
//! let params = OperationParams {
//!     principal: dec!(120000),
//!     apy: dec!(12),
//!     convention: DayCountConvention::Days360,
//!     variable: None,
//!     calc_date: None,
//!     tax_exempt: false,
//!     gain_output: GainOutput::Deferred,
//! };
//! let mut backend = InMemoryBackend::new();
//! let calendar = default_calendar();
//! let payments = bullet_payments(
//!     &params,
//!     Date::from_ymd(2022, 1, 1).unwrap(),
//!     12,
//!     None,
//!     None,
//!     &[],
//!     &mut backend,
//!     &calendar,
//! )
//! .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod auxmath;
pub mod daily_engine;
pub mod daycount;
pub mod factors;
pub mod interleave;
pub mod payment_engine;
pub mod preprocess;
pub mod stereotypes;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::auxmath::{calculate_revenue_tax, price_table_ratios, revenue_tax_rate};
    pub use crate::daily_engine::{run_daily_engine, DailyEngineInput};
    pub use crate::daycount::{default_calendar, spread_factor, validate_convention_index_pairing, PeriodWindow};
    pub use crate::factors::interest_factor;
    pub use crate::interleave::interleave;
    pub use crate::payment_engine::{run_payment_engine, PaymentEngineInput};
    pub use crate::stereotypes::{
        bullet_daily, bullet_payments, free_daily, free_payments, monthly_interest_daily,
        monthly_interest_payments, price_table_daily, price_table_payments, OperationParams,
    };
    pub use crate::types::{
        Amortization, Bare, CalcDate, DailyReturn, DctOverride, GainOutput, Ledgers, Payment,
        PriceAdjustedPayment, PriceLevelAdjustment, ScheduleEntry, ShiftRule, VariableIndex, MAX_VALUE,
    };
}
