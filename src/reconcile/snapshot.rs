//! Queryable snapshot of one business's slice of the ledger.

use std::collections::HashMap;

use crate::models::{Employment, MonthlyWage, Period, Worker};

/// An in-memory view of the worker / employment / ledger-entry chain for
/// one business, indexed the way the reconciler looks things up.
///
/// Worker lookup is by trimmed resident number; employment lookup assumes
/// at most one active employment chain per worker per business; entry
/// lookup is by (employment, period).
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    business_id: String,
    workers_by_resident: HashMap<String, Worker>,
    employments_by_worker: HashMap<String, Employment>,
    entries: HashMap<(String, Period), MonthlyWage>,
}

impl LedgerSnapshot {
    /// Builds a snapshot from already-loaded records.
    ///
    /// Employments belonging to other businesses are ignored; entries are
    /// indexed regardless so a caller may pass its full ledger slice.
    pub fn build(
        business_id: &str,
        workers: &[Worker],
        employments: &[Employment],
        entries: &[MonthlyWage],
    ) -> Self {
        let workers_by_resident = workers
            .iter()
            .map(|w| (w.resident_no.trim().to_string(), w.clone()))
            .collect();

        let employments_by_worker = employments
            .iter()
            .filter(|e| e.business_id == business_id)
            .map(|e| (e.worker_id.clone(), e.clone()))
            .collect();

        let entries = entries
            .iter()
            .map(|mw| ((mw.employment_id.clone(), mw.period), mw.clone()))
            .collect();

        Self {
            business_id: business_id.to_string(),
            workers_by_resident,
            employments_by_worker,
            entries,
        }
    }

    /// The business this snapshot belongs to.
    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    /// Looks up a worker by resident number (exact match after trimming).
    pub fn worker_by_resident_no(&self, resident_no: &str) -> Option<&Worker> {
        self.workers_by_resident.get(resident_no.trim())
    }

    /// Looks up this business's employment for a worker.
    pub fn employment_for(&self, worker_id: &str) -> Option<&Employment> {
        self.employments_by_worker.get(worker_id)
    }

    /// Looks up a ledger entry by its (employment, period) key.
    pub fn entry(&self, employment_id: &str, period: Period) -> Option<&MonthlyWage> {
        self.entries
            .get(&(employment_id.to_string(), period))
    }

    /// Number of indexed ledger entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
