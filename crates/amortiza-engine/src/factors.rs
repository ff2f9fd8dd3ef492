//! The fixed-rate factor kernel (component C1).

use std::sync::Mutex;

use once_cell::sync::Lazy;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::HashMap;

type FactorKey = (Decimal, Decimal, bool);

static FACTOR_CACHE: Lazy<Mutex<HashMap<FactorKey, Decimal>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Computes `(1 + rate/100)^period` (or `(1 + rate)^period` when
/// `is_percent` is `false`).
///
/// Results are memoized by `(rate, period, is_percent)` since the payment
/// and daily-return engines call this on every period and every day
/// respectively, often with repeated arguments.
#[must_use]
pub fn interest_factor(rate: Decimal, period: Decimal, is_percent: bool) -> Decimal {
    let key = (rate, period, is_percent);
    if let Some(cached) = FACTOR_CACHE.lock().unwrap().get(&key) {
        return *cached;
    }

    let base = if is_percent { Decimal::ONE + rate / Decimal::ONE_HUNDRED } else { Decimal::ONE + rate };
    let factor = base.powd(period);

    FACTOR_CACHE.lock().unwrap().insert(key, factor);
    factor
}

/// Clears the memoization cache. Exposed for tests that assert on cache
/// population; production callers never need this.
#[cfg(test)]
pub(crate) fn clear_cache() {
    FACTOR_CACHE.lock().unwrap().clear();
}
