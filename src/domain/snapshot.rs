use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::CanCounts;
use crate::domain::account::format_amount;

/// The three accounts the restock workflow moves money between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Fridge,
    Subscriber,
    Escrow,
}

impl Role {
    pub fn account_name(self) -> &'static str {
        match self {
            Role::Fridge => "fridge",
            Role::Subscriber => "subscriber",
            Role::Escrow => "escrow",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.account_name())
    }
}

/// Read-only view of the fridge and all three balances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub contents: CanCounts,
    pub needs_restock: bool,
    pub fridge_balance: Decimal,
    pub subscriber_balance: Decimal,
    pub escrow_balance: Decimal,
}

impl Snapshot {
    pub fn balance(&self, role: Role) -> Decimal {
        match role {
            Role::Fridge => self.fridge_balance,
            Role::Subscriber => self.subscriber_balance,
            Role::Escrow => self.escrow_balance,
        }
    }

    pub fn display_balance(&self, role: Role) -> String {
        format_amount(self.balance(role))
    }
}
