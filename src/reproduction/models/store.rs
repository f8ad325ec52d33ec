//! Versioned snapshot publication of [`DynamicRResult`].
//!
//! Purpose
//! -------
//! Hold the single cached artifact of the estimator, the latest
//! [`DynamicRResult`], so that rendering requests can keep reading a complete
//! snapshot while the next one is being computed.
//!
//! Key behaviors
//! -------------
//! - [`DynamicRStore::load`] hands out an `Arc` to the current immutable
//!   snapshot; readers keep it alive for as long as they need it.
//! - [`DynamicRStore::refresh`] pulls a fresh [`CaseTable`] from a
//!   [`CaseFeed`], recomputes every region outside any lock, and only then
//!   swaps the pointer under a short write lock.
//! - A failing feed leaves the published snapshot untouched and is reported
//!   as `RtError::FetchFailed`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Snapshots are never mutated after publication.
//! - Versions start at 0 (the empty snapshot) and grow by one per publish.
//! - Scheduling of refreshes is the caller's concern; the store does not
//!   spawn threads or timers.
use crate::reproduction::{
    core::{data::CaseTable, options::RtOptions},
    errors::{RtError, RtResult},
    models::dynamic_r::{DynamicRResult, compute_dynamic_r},
};
use std::sync::{Arc, RwLock};

/// Source of cumulative case tables (e.g. a remote CSV feed).
///
/// Implementations own transport, parsing, and any retry policy; the store
/// only sees a validated [`CaseTable`] or a failure.
pub trait CaseFeed {
    fn fetch(&mut self) -> anyhow::Result<CaseTable>;
}

impl<F> CaseFeed for F
where
    F: FnMut() -> anyhow::Result<CaseTable>,
{
    fn fetch(&mut self) -> anyhow::Result<CaseTable> {
        self()
    }
}

/// `DynamicRSnapshot` — one published, immutable result with its version.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRSnapshot {
    pub version: u64,
    pub result: DynamicRResult,
}

/// `DynamicRStore` — atomically swapped pointer to the current snapshot.
#[derive(Debug)]
pub struct DynamicRStore {
    options: RtOptions,
    current: RwLock<Arc<DynamicRSnapshot>>,
}

impl DynamicRStore {
    /// Store holding the empty version-0 snapshot.
    pub fn new(options: RtOptions) -> Self {
        let initial = DynamicRSnapshot { version: 0, result: DynamicRResult::empty(options) };
        DynamicRStore { options, current: RwLock::new(Arc::new(initial)) }
    }

    pub fn options(&self) -> &RtOptions {
        &self.options
    }

    /// Current snapshot. Cheap: clones an `Arc` under a read lock.
    pub fn load(&self) -> Arc<DynamicRSnapshot> {
        // Writers only ever replace the pointer, so a poisoned lock still
        // guards a complete snapshot.
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Publish a fully built result and return its version.
    pub fn publish(&self, result: DynamicRResult) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let version = guard.version + 1;
        let regions = result.len();
        *guard = Arc::new(DynamicRSnapshot { version, result });
        drop(guard);

        log::info!("published dynamic R snapshot v{version} ({regions} regions)");
        version
    }

    /// Fetch, recompute, and publish.
    ///
    /// Errors
    /// ------
    /// - `RtError::FetchFailed { reason }` when the feed fails; the previous
    ///   snapshot stays current.
    /// - Any error of [`compute_dynamic_r`] (nothing is published).
    pub fn refresh<F: CaseFeed + ?Sized>(&self, feed: &mut F) -> RtResult<u64> {
        let table = match feed.fetch() {
            Ok(table) => table,
            Err(err) => {
                let reason = format!("{err:#}");
                log::warn!("case feed failed, keeping snapshot v{}: {reason}", self.load().version);
                return Err(RtError::FetchFailed { reason });
            }
        };
        let result = compute_dynamic_r(&table, &self.options)?;
        Ok(self.publish(result))
    }
}

impl Default for DynamicRStore {
    fn default() -> Self {
        DynamicRStore::new(RtOptions::default())
    }
}
