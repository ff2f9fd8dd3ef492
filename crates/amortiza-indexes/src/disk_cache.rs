//! A disk-cached index backend.
//!
//! Responses from a remote rate provider are cached to one JSON file per
//! index per calendar day; a cache hit on a later call the same day avoids
//! re-fetching. The remote fetch itself is behind [`RemoteFetcher`], a
//! trait object, so this crate does not depend on any particular HTTP
//! client — callers wire up their own.

use std::fs;
use std::path::{Path, PathBuf};

use amortiza_core::error::{AmortizaError, AmortizaResult};
use amortiza_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::backend::IndexBackend;
use crate::in_memory::InMemoryBackend;
use crate::types::{DailyIndex, IndexCode, MonthlyIndex, RangedIndex};

/// Fetches the raw response body for an index from a remote provider.
///
/// Implemented by callers against whichever HTTP client they already
/// depend on; this crate only needs the bytes back.
pub trait RemoteFetcher {
    /// Fetches raw bytes for `code` over `[begin, end)`. The response
    /// format is provider-specific; [`DiskCachedBackend`] only persists it
    /// and hands it to [`parse_response`] for decoding.
    fn fetch(&self, code: IndexCode, begin: Date, end: Date) -> AmortizaResult<Vec<u8>>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedDaily {
    observations: Vec<(Date, Decimal)>,
}

/// An index backend backed by a per-day-per-index JSON cache on disk.
///
/// Cache files live at `<cache_dir>/backend_<slug>_<YYYYMMDD>.json`, where
/// `YYYYMMDD` is the date the fetch was performed (not the data's own
/// date range) — the filename embedding "today" is what lets stale files
/// from previous days be ignored without an explicit expiry check.
pub struct DiskCachedBackend<F: RemoteFetcher> {
    cache_dir: PathBuf,
    today: Date,
    fetcher: F,
    memory: InMemoryBackend,
}

impl<F: RemoteFetcher> DiskCachedBackend<F> {
    /// Creates a backend caching under `cache_dir`, treating `today` as the
    /// current calendar date for cache-file naming purposes.
    pub fn new(cache_dir: impl Into<PathBuf>, today: Date, fetcher: F) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            today,
            fetcher,
            memory: InMemoryBackend::new(),
        }
    }

    fn cache_path(&self, code: IndexCode) -> PathBuf {
        self.cache_dir.join(format!(
            "backend_{}_{:04}{:02}{:02}.json",
            code.slug(),
            self.today.year(),
            self.today.month(),
            self.today.day(),
        ))
    }

    fn load_or_fetch(&mut self, code: IndexCode, begin: Date, end: Date) -> AmortizaResult<CachedDaily> {
        let path = self.cache_path(code);
        if let Some(cached) = read_cache(&path)? {
            return Ok(cached);
        }

        let raw = self.fetcher.fetch(code, begin, end)?;
        let parsed = parse_response(&raw)?;
        write_cache(&path, &parsed)?;
        Ok(parsed)
    }
}

fn read_cache(path: &Path) -> AmortizaResult<Option<CachedDaily>> {
    match fs::read(path) {
        Ok(bytes) => {
            let cached: CachedDaily = serde_json::from_slice(&bytes)
                .map_err(|e| AmortizaError::backend(format!("corrupt cache file {}: {e}", path.display())))?;
            Ok(Some(cached))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AmortizaError::backend(format!("cannot read cache file {}: {e}", path.display()))),
    }
}

fn write_cache(path: &Path, cached: &CachedDaily) -> AmortizaResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AmortizaError::backend(format!("cannot create cache dir {}: {e}", parent.display())))?;
    }
    let bytes = serde_json::to_vec_pretty(cached)
        .map_err(|e| AmortizaError::backend(format!("cannot serialize cache payload: {e}")))?;
    fs::write(path, bytes).map_err(|e| AmortizaError::backend(format!("cannot write cache file {}: {e}", path.display())))
}

/// Decodes a raw provider response into observations.
///
/// Providers that fail return a non-JSON error page in practice; this is
/// surfaced as a backend error carrying a short excerpt rather than the
/// underlying parse failure, which is rarely useful to the caller.
fn parse_response(raw: &[u8]) -> AmortizaResult<CachedDaily> {
    serde_json::from_slice(raw).map_err(|_| {
        let excerpt: String = String::from_utf8_lossy(raw).chars().take(120).collect();
        AmortizaError::backend(format!("index provider returned a non-JSON response: {excerpt}"))
    })
}

impl<F: RemoteFetcher> IndexBackend for DiskCachedBackend<F> {
    fn get_daily_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<DailyIndex>> {
        let cached = self.load_or_fetch(code, begin, end)?;
        for (date, rate) in cached.observations {
            self.memory.add_daily(code, date, rate);
        }
        self.memory.get_daily_indexes(code, begin, end)
    }

    fn get_savings_indexes(&mut self, begin: Date, end: Date) -> AmortizaResult<Vec<RangedIndex>> {
        self.memory.get_savings_indexes(begin, end)
    }

    fn get_monthly_indexes(
        &mut self,
        code: IndexCode,
        begin: Date,
        end: Date,
    ) -> AmortizaResult<Vec<MonthlyIndex>> {
        self.memory.get_monthly_indexes(code, begin, end)
    }
}
