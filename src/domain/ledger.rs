use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl core::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntryKind::Credit => f.write_str("credit"),
            EntryKind::Debit => f.write_str("debit"),
        }
    }
}

/// One balance movement, as reported to a ledger event sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub account: String,
    pub kind: EntryKind,
    pub amount: Decimal,
}

impl LedgerEntry {
    pub fn new(account: impl Into<String>, kind: EntryKind, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            kind,
            amount,
        }
    }
}

