use rust_decimal::Decimal;

use crate::domain::{EntryKind, LedgerEventSink};

/// A named balance. Withdrawals are not checked against the balance, so it
/// can go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    name: String,
    balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, initial_balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance: initial_balance,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance as shown on the web pages, two decimal places.
    pub fn display_balance(&self) -> String {
        format_amount(self.balance)
    }

    pub fn deposit(&mut self, amount: Decimal, events: &dyn LedgerEventSink) -> Decimal {
        self.balance += amount;
        events.notify(&self.name, EntryKind::Credit, amount);
        self.balance
    }

    pub fn withdraw(&mut self, amount: Decimal, events: &dyn LedgerEventSink) -> Decimal {
        self.balance -= amount;
        events.notify(&self.name, EntryKind::Debit, amount);
        self.balance
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LedgerEntry;
    use proptest::prelude::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<LedgerEntry>>);

    impl LedgerEventSink for Recorder {
        fn notify(&self, account: &str, kind: EntryKind, amount: Decimal) {
            self.0.lock().unwrap().push(LedgerEntry::new(account, kind, amount));
        }
    }

    #[test]
    fn deposit_and_withdraw_notify_once_each() {
        let events = Recorder::default();
        let mut account = Account::new("fridge", Decimal::new(25, 0));

        assert_eq!(account.deposit(Decimal::new(3, 1), &events), Decimal::new(253, 1));
        assert_eq!(account.withdraw(Decimal::new(1, 1), &events), Decimal::new(252, 1));

        let entries = events.0.lock().unwrap();
        assert_eq!(
            *entries,
            vec![
                LedgerEntry::new("fridge", EntryKind::Credit, Decimal::new(3, 1)),
                LedgerEntry::new("fridge", EntryKind::Debit, Decimal::new(1, 1)),
            ]
        );
    }

    #[test]
    fn withdraw_can_overdraw() {
        let events = Recorder::default();
        let mut escrow = Account::new("escrow", Decimal::ZERO);

        assert_eq!(escrow.withdraw(Decimal::new(4, 0), &events), Decimal::new(-4, 0));
        assert_eq!(escrow.display_balance(), "-4.00");
    }

    #[test]
    fn display_rounds_to_two_places() {
        assert_eq!(format_amount(Decimal::new(25, 0)), "25.00");
        assert_eq!(format_amount(Decimal::new(103, 1)), "10.30");
        assert_eq!(format_amount(Decimal::new(12345, 4)), "1.23");
    }

    proptest! {
        #[test]
        fn deposit_then_withdraw_restores_balance(start in -1_000_000i64..1_000_000, x in -1_000_000i64..1_000_000) {
            let events = Recorder::default();
            let start = Decimal::new(start, 2);
            let x = Decimal::new(x, 2);
            let mut account = Account::new("subscriber", start);
            account.deposit(x, &events);
            prop_assert_eq!(account.withdraw(x, &events), start);
            prop_assert_eq!(events.0.lock().unwrap().len(), 2);
        }
    }
}
