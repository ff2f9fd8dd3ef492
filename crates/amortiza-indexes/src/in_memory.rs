//! A reference index backend holding tables in memory.
//!
//! Grounded on the historical-fixing-store pattern: a `BTreeMap` keyed by
//! date gives ordered range queries for free, which both the daily
//! (business-day) and monthly retrieval paths need.

use std::collections::BTreeMap;

use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use log::warn;
use rust_decimal::Decimal;

use crate::backend::IndexBackend;
use crate::types::{DailyIndex, IndexCode, MonthlyIndex, RangedIndex};

/// In-memory index backend with hard-coded or caller-populated tables.
///
/// Daily (business-day) data supports forward projection of the most
/// recent value: at most one projection is allowed per [`get_daily_indexes`]
/// call, after which a further gap is a backend error. Monthly and ranged
/// data are never projected; missing data is always an error.
///
/// [`get_daily_indexes`]: IndexBackend::get_daily_indexes
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    daily: BTreeMap<(IndexCode, Date), Decimal>,
    monthly: BTreeMap<(IndexCode, i32, u32), Decimal>,
    savings: Vec<RangedIndex>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single daily observation.
    pub fn add_daily(&mut self, code: IndexCode, date: Date, rate: Decimal) {
        self.daily.insert((code, date), rate);
    }

    /// Adds a single monthly observation.
    pub fn add_monthly(&mut self, code: IndexCode, year: i32, month: u32, value: Decimal) {
        self.monthly.insert((code, year, month), value);
    }

    /// Adds a savings-index range.
    pub fn add_savings_range(&mut self, range: RangedIndex) {
        self.savings.push(range);
    }

    fn last_daily_before(&self, code: IndexCode, date: Date) -> Option<(Date, Decimal)> {
        self.daily
            .range((code, Date::from_ymd(1, 1, 1).unwrap())..(code, date))
            .filter(|((c, _), _)| *c == code)
            .next_back()
            .map(|((_, d), r)| (*d, *r))
    }
}

impl IndexBackend for InMemoryBackend {
    fn get_daily_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<DailyIndex>> {
        if end < begin {
            return Err(AmortizaError::validation("daily index window end precedes begin"));
        }

        let mut out = Vec::new();
        let mut projected_once = false;
        let mut current = begin;

        while current < end {
            match self.daily.get(&(code, current)) {
                Some(rate) => out.push(DailyIndex::new(current, *rate)),
                None => {
                    if projected_once {
                        return Err(AmortizaError::backend(format!(
                            "{code} has no observation for {current} and a value was already projected in this window"
                        )));
                    }
                    match self.last_daily_before(code, current) {
                        Some((last_date, rate)) => {
                            warn!("projecting {code} value from {last_date} forward to {current}");
                            out.push(DailyIndex::new(current, rate));
                            projected_once = true;
                        }
                        None => {
                            return Err(AmortizaError::backend(format!(
                                "{code} has no observation at or before {current}"
                            )));
                        }
                    }
                }
            }
            current = current.add_days(1);
        }

        Ok(out)
    }

    fn get_savings_indexes(&mut self, begin: Date, end: Date) -> AmortizaResult<Vec<RangedIndex>> {
        let mut out: Vec<RangedIndex> = self
            .savings
            .iter()
            .filter(|r| r.start < end && r.end > begin)
            .copied()
            .collect();
        out.sort_by_key(|r| r.start);
        if out.is_empty() {
            return Err(AmortizaError::backend(format!(
                "no savings index ranges overlap [{begin}, {end})"
            )));
        }
        Ok(out)
    }

    fn get_monthly_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<MonthlyIndex>> {
        let mut out = Vec::new();
        let mut cursor = begin;
        while cursor < end {
            let key = (code, cursor.year(), cursor.month());
            match self.monthly.get(&key) {
                Some(value) => out.push(MonthlyIndex::new(cursor.year(), cursor.month(), *value)),
                None => {
                    return Err(AmortizaError::backend(format!(
                        "{code} has no observation for {}-{:02}",
                        cursor.year(),
                        cursor.month()
                    )));
                }
            }
            cursor = cursor.add_months(1).map_err(|e| AmortizaError::validation(e.to_string()))?;
        }
        Ok(out)
    }
}
