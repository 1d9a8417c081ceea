//! Batch classification and merge planning against the ledger.
//!
//! A batch of candidate records is partitioned into four disjoint
//! classes — added, updated, unchanged, unmatched — and turned into an
//! ordered, chunkable write plan. Updates are sparse patches: only the
//! total-gross field is overwritten, everything else previously set on
//! the entry survives.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::extract::CandidateRecord;
use crate::models::{MonthlyWage, Period};

use super::snapshot::LedgerSnapshot;

/// Maximum writes per persistence chunk, matching the transactional
/// batch limit of the downstream store.
pub const MAX_BATCH_SIZE: usize = 450;

/// Tolerance, in KRW, for the net = gross − deductions consistency check.
pub const NET_TOLERANCE: i64 = 1;

/// A record with no existing entry for its (employment, period) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    /// The employment the entry will be created under.
    pub employment_id: String,
    /// The extracted record to insert.
    pub record: CandidateRecord,
}

/// A record whose total differs from the existing entry.
///
/// Old and new totals are retained for audit; the write plan patches
/// only the total-gross field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageUpdate {
    /// The employment whose entry changes.
    pub employment_id: String,
    /// Worker name, for review output.
    pub name: String,
    /// The total currently on the ledger.
    pub old_total: i64,
    /// The total the batch presents.
    pub new_total: i64,
}

impl WageUpdate {
    /// Signed change the update applies.
    pub fn delta(&self) -> i64 {
        self.new_total - self.old_total
    }
}

/// A record whose total matches the existing entry exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnchangedEntry {
    /// The employment whose entry matched.
    pub employment_id: String,
    /// Worker name, for review output.
    pub name: String,
    /// The matching total.
    pub total_wage: i64,
}

/// Why a record could not be tied to an employment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedKind {
    /// No worker record exists for the resident number.
    Worker,
    /// A worker exists but no employment ties it to the target business.
    Employment,
}

/// A record requiring manual resolution; never silently created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedRecord {
    /// Worker name from the sheet.
    pub name: String,
    /// Normalized resident number from the sheet.
    pub resident_no: String,
    /// The total the sheet presented.
    pub total_wage: i64,
    /// Which link of the chain was missing.
    pub kind: UnmatchedKind,
}

/// A net ≠ gross − deductions inconsistency found in the batch.
///
/// Reported alongside the classification, never auto-corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetMismatch {
    /// Worker name from the sheet.
    pub name: String,
    /// 0-indexed source row.
    pub row_index: usize,
    /// Net the sheet reported.
    pub reported_net: i64,
    /// Gross minus reported deductions.
    pub expected_net: i64,
}

/// A sparse partial update to one ledger entry.
///
/// Only fields present in the patch are written; the merge can never
/// clobber a field it does not carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagePatch {
    /// New total gross wage.
    #[serde(default)]
    pub total_wage: Option<i64>,
}

impl WagePatch {
    /// Applies the patch to an entry in place.
    pub fn apply(&self, entry: &mut MonthlyWage) {
        if let Some(total) = self.total_wage {
            entry.total_wage = total;
        }
    }

    /// True when the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.total_wage.is_none()
    }
}

/// One ordered write of the merge plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerWrite {
    /// Insert a new ledger entry.
    Insert {
        /// The entry to insert.
        entry: MonthlyWage,
    },
    /// Patch an existing entry by key.
    Patch {
        /// The employment side of the key.
        employment_id: String,
        /// The period side of the key.
        period: Period,
        /// The sparse update to apply.
        patch: WagePatch,
    },
}

/// The result of reconciling one batch against one business's ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Records inserted as new entries.
    pub added: Vec<NewEntry>,
    /// Records patching an existing entry's total.
    pub updated: Vec<WageUpdate>,
    /// Records matching the ledger exactly; no write.
    pub unchanged: Vec<UnchangedEntry>,
    /// Records with no worker/employment chain; no write.
    pub unmatched: Vec<UnmatchedRecord>,
    /// Net-consistency violations found while classifying.
    pub warnings: Vec<NetMismatch>,
}

impl ReconcileOutcome {
    /// True when the merge plan writes nothing.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

/// Builds a ledger entry from an extracted record.
fn entry_from_record(employment_id: &str, period: Period, record: &CandidateRecord) -> MonthlyWage {
    MonthlyWage {
        id: MonthlyWage::entry_id(employment_id, period),
        employment_id: employment_id.to_string(),
        period,
        components: record.components,
        total_wage: record.total_wage,
        pension: record.pension,
        health: record.health,
        long_term_care: record.long_term_care,
        employment: record.employment,
        income_tax: record.income_tax,
        local_tax: record.local_tax,
        net_wage: record.net_wage,
        work_days: record.work_days,
        deduction_days: record.deduction_days,
        deduction_hours: record.deduction_hours,
        created_at: Utc::now(),
    }
}

/// Keeps only the last record per resident number, in first-seen order.
///
/// When one sheet carries the same person twice for the same period, the
/// later row wins and exactly one result is produced for the key.
fn dedup_last_wins(records: &[CandidateRecord]) -> Vec<&CandidateRecord> {
    let mut order: Vec<&CandidateRecord> = Vec::with_capacity(records.len());
    let mut index_of: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for record in records {
        let key = record.resident_no.trim();
        match index_of.get(key) {
            Some(&i) => order[i] = record,
            None => {
                index_of.insert(key, order.len());
                order.push(record);
            }
        }
    }
    order
}

fn net_mismatch(record: &CandidateRecord) -> Option<NetMismatch> {
    let reported_net = record.net_wage?;
    let deductions = [
        record.pension,
        record.health,
        record.long_term_care,
        record.employment,
        record.income_tax,
        record.local_tax,
    ];
    if deductions.iter().all(Option::is_none) {
        return None;
    }
    let expected_net = record.total_wage - deductions.iter().flatten().sum::<i64>();
    if (reported_net - expected_net).abs() <= NET_TOLERANCE {
        return None;
    }
    Some(NetMismatch {
        name: record.name.clone(),
        row_index: record.row_index,
        reported_net,
        expected_net,
    })
}

/// Partitions a batch of candidate records against the ledger snapshot.
///
/// Matching keys: worker by trimmed resident number, employment by
/// (worker, business), entry by (employment, period). Re-running against
/// an already-merged ledger classifies everything as unchanged.
///
/// # Example
///
/// ```
/// use payroll_engine::reconcile::{LedgerSnapshot, reconcile};
///
/// let snapshot = LedgerSnapshot::build("biz-a", &[], &[], &[]);
/// let outcome = reconcile(&[], "2025-01".parse().unwrap(), &snapshot);
/// assert!(outcome.is_noop());
/// ```
pub fn reconcile(
    records: &[CandidateRecord],
    period: Period,
    snapshot: &LedgerSnapshot,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for record in dedup_last_wins(records) {
        if let Some(warning) = net_mismatch(record) {
            outcome.warnings.push(warning);
        }

        let Some(worker) = snapshot.worker_by_resident_no(&record.resident_no) else {
            outcome.unmatched.push(UnmatchedRecord {
                name: record.name.clone(),
                resident_no: record.resident_no.clone(),
                total_wage: record.total_wage,
                kind: UnmatchedKind::Worker,
            });
            continue;
        };

        let Some(employment) = snapshot.employment_for(&worker.id) else {
            outcome.unmatched.push(UnmatchedRecord {
                name: record.name.clone(),
                resident_no: record.resident_no.clone(),
                total_wage: record.total_wage,
                kind: UnmatchedKind::Employment,
            });
            continue;
        };

        match snapshot.entry(&employment.id, period) {
            None => outcome.added.push(NewEntry {
                employment_id: employment.id.clone(),
                record: record.clone(),
            }),
            Some(existing) if existing.total_wage != record.total_wage => {
                outcome.updated.push(WageUpdate {
                    employment_id: employment.id.clone(),
                    name: record.name.clone(),
                    old_total: existing.total_wage,
                    new_total: record.total_wage,
                });
            }
            Some(existing) => outcome.unchanged.push(UnchangedEntry {
                employment_id: employment.id.clone(),
                name: record.name.clone(),
                total_wage: existing.total_wage,
            }),
        }
    }

    outcome
}

impl ReconcileOutcome {
    /// The ordered write plan: inserts for added records, total-only
    /// patches for updated ones. Unchanged and unmatched records produce
    /// no write.
    pub fn writes(&self, period: Period) -> Vec<LedgerWrite> {
        let mut writes = Vec::with_capacity(self.added.len() + self.updated.len());

        for added in &self.added {
            writes.push(LedgerWrite::Insert {
                entry: entry_from_record(&added.employment_id, period, &added.record),
            });
        }
        for update in &self.updated {
            writes.push(LedgerWrite::Patch {
                employment_id: update.employment_id.clone(),
                period,
                patch: WagePatch {
                    total_wage: Some(update.new_total),
                },
            });
        }
        writes
    }
}

/// Splits a write plan into bounded chunks without reordering within a
/// chunk, so a partial-failure retry of one chunk cannot double-apply
/// another.
pub fn chunk_writes(writes: Vec<LedgerWrite>, max_chunk: usize) -> Vec<Vec<LedgerWrite>> {
    let max_chunk = max_chunk.max(1);
    let mut chunks = Vec::new();
    let mut current = Vec::with_capacity(max_chunk.min(writes.len()));

    for write in writes {
        if current.len() == max_chunk {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(write);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
