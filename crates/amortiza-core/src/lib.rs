//! # Amortiza Core
//!
//! Foundational types shared across the amortization engine: the
//! calendar date newtype, day-count convention tags, business-day
//! calendars, and the error taxonomy.
//!
//! ## Design Philosophy
//!
//! - **Type safety**: newtypes prevent mixing incompatible values.
//! - **Exact arithmetic**: monetary and rate values are `rust_decimal::Decimal`,
//!   never floating point.
//! - **Explicit over implicit**: clear, self-documenting APIs.
//!
//! ## Example
//!
//! ```rust
//! use amortiza_core::prelude::*;
//!
//! let zero_date = Date::from_ymd(2022, 1, 1).unwrap();
//! let anniversary = zero_date.add_months(12).unwrap();
//! assert_eq!(anniversary, Date::from_ymd(2023, 1, 1).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{B3Calendar, Calendar, WeekendCalendar};
    pub use crate::daycounts::{Act360, Act365, DayCount, DayCountConvention};
    pub use crate::error::{AmortizaError, AmortizaResult};
    pub use crate::types::Date;
}

pub use error::{AmortizaError, AmortizaResult};
pub use types::Date;
