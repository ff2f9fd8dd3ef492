//! Schedule preprocessors (component C4): one per amortization stereotype,
//! turning stereotype-specific parameters into a plain [`crate::types::Amortization`]
//! list ready for interleaving with unscheduled cashflows.

mod bullet;
mod common;
mod free;
mod monthly_interest;
mod price_table;

pub use bullet::preprocess_bullet;
pub use free::preprocess_free;
pub use monthly_interest::preprocess_monthly_interest;
pub use price_table::preprocess_price_table;
