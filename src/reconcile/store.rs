//! Ledger persistence collaborator contract.
//!
//! The engine never talks to a database; it hands ordered, bounded write
//! chunks to whatever implements [`LedgerStore`]. The in-memory
//! implementation backs tests and the preview API.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlyWage, Period};

use super::reconciler::{LedgerWrite, MAX_BATCH_SIZE};

/// The persistence contract for ledger entries.
///
/// Chunk application order is irrelevant to correctness — each chunk is
/// independently idempotent — so callers may retry a failed chunk without
/// re-deriving the whole batch.
pub trait LedgerStore {
    /// Looks up one entry by its (employment, period) key.
    fn entry(&self, employment_id: &str, period: Period) -> Option<MonthlyWage>;

    /// All stored entries.
    fn entries(&self) -> Vec<MonthlyWage>;

    /// Inserts or replaces one entry by key.
    fn upsert(&mut self, entry: MonthlyWage);

    /// Applies one bounded chunk of the write plan.
    ///
    /// Rejects chunks above [`MAX_BATCH_SIZE`] with
    /// [`EngineError::ChunkTooLarge`]. A patch whose key no longer exists
    /// is skipped; the drift resurfaces on the next reconciliation.
    fn commit_chunk(&mut self, chunk: &[LedgerWrite]) -> EngineResult<()> {
        if chunk.len() > MAX_BATCH_SIZE {
            return Err(EngineError::ChunkTooLarge {
                size: chunk.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        for write in chunk {
            match write {
                LedgerWrite::Insert { entry } => self.upsert(entry.clone()),
                LedgerWrite::Patch {
                    employment_id,
                    period,
                    patch,
                } => {
                    if let Some(mut entry) = self.entry(employment_id, *period) {
                        patch.apply(&mut entry);
                        self.upsert(entry);
                    }
                }
            }
        }
        Ok(())
    }
}

/// An in-memory ledger store.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: HashMap<(String, Period), MonthlyWage>,
}

impl MemoryLedger {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with entries.
    pub fn with_entries(entries: impl IntoIterator<Item = MonthlyWage>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.upsert(entry);
        }
        store
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for MemoryLedger {
    fn entry(&self, employment_id: &str, period: Period) -> Option<MonthlyWage> {
        self.entries
            .get(&(employment_id.to_string(), period))
            .cloned()
    }

    fn entries(&self) -> Vec<MonthlyWage> {
        let mut all: Vec<MonthlyWage> = self.entries.values().cloned().collect();
        all.sort_by(|a, b| (&a.employment_id, a.period).cmp(&(&b.employment_id, b.period)));
        all
    }

    fn upsert(&mut self, entry: MonthlyWage) {
        self.entries
            .insert((entry.employment_id.clone(), entry.period), entry);
    }
}
