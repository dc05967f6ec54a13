//! Marks that a balance moved recently, so a display can highlight the next
//! block it shows. Several notifications between two reads collapse into one.

use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;

use crate::domain::{EntryKind, LedgerEventSink};

#[derive(Debug, Default)]
pub struct LedgerEventFlag {
    pending: AtomicBool,
}

impl LedgerEventFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a transaction was recorded since the last call, and clears it.
    pub fn consume(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl LedgerEventSink for LedgerEventFlag {
    fn notify(&self, account: &str, kind: EntryKind, amount: Decimal) {
        tracing::debug!(account, %kind, %amount, "ledger transaction recorded");
        self.pending.store(true, Ordering::Release);
    }
}
