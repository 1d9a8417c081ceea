//! Ledger reconciliation: classification, merge planning and the
//! persistence contract.
//!
//! Reconciliation against one business's ledger must be serialized per
//! business — no concurrent mutation of the same (employment, period)
//! key — to preserve idempotence and the at-most-one-entry-per-key
//! invariant. Across businesses, callers are free to run in parallel.

mod reconciler;
mod snapshot;
mod store;

pub use reconciler::{
    LedgerWrite, MAX_BATCH_SIZE, NET_TOLERANCE, NetMismatch, NewEntry, ReconcileOutcome,
    UnchangedEntry, UnmatchedKind, UnmatchedRecord, WagePatch, WageUpdate, chunk_writes, reconcile,
};
pub use snapshot::LedgerSnapshot;
pub use store::{LedgerStore, MemoryLedger};
