//! # Amortiza Indexes
//!
//! Variable-rate index backends for Brazilian credit operations: the
//! overnight interbank rate (CDI), the savings reference rate (Poupanca),
//! and the two monthly inflation indexes (IPCA, IGPM).
//!
//! The abstract [`IndexBackend`] trait (component C2) is implemented by
//! [`InMemoryBackend`] for tests and fixed reference data, and by
//! [`DiskCachedBackend`] for a file-cached remote provider. The factor
//! helpers in [`backend`] (component C1) are generic over any backend.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod disk_cache;
pub mod in_memory;
pub mod types;

pub use backend::{cdi_factor, ipca_factor, savings_factor, IndexBackend};
pub use disk_cache::{DiskCachedBackend, RemoteFetcher};
pub use in_memory::InMemoryBackend;
pub use types::{DailyIndex, IndexCode, IndexShift, MonthlyIndex, RangedIndex};
