//! The escrow/restock workflow.
//!
//! Owns the fridge and the three accounts behind one lock, so every command
//! runs start to finish without another command interleaving. Nothing tracks
//! an in-flight mission: the only state is the stock and the balances.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use crate::config::{Config, Prices};
use crate::domain::{
    Account, CanCounts, Command, Error, Flavor, Fridge, LedgerEventSink, Role, Snapshot,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub command: Command,
    /// Cans put in by a restock, zero for every other command.
    pub cans_added: u32,
    pub snapshot: Snapshot,
}

#[derive(Debug)]
struct State {
    fridge: Fridge,
    fridge_account: Account,
    subscriber_account: Account,
    escrow_account: Account,
}

impl State {
    fn account(&self, role: Role) -> &Account {
        match role {
            Role::Fridge => &self.fridge_account,
            Role::Subscriber => &self.subscriber_account,
            Role::Escrow => &self.escrow_account,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            contents: self.fridge.contents(),
            needs_restock: self.fridge.check_stock(),
            fridge_balance: self.fridge_account.balance(),
            subscriber_balance: self.subscriber_account.balance(),
            escrow_balance: self.escrow_account.balance(),
        }
    }
}

#[derive(Debug)]
pub struct Workflow<E>
where
    E: LedgerEventSink,
{
    state: Mutex<State>,
    events: E,
    prices: Prices,
    return_refund: Decimal,
    restock_bond: Decimal,
    bounty_rate: Decimal,
}

impl<E> Workflow<E>
where
    E: LedgerEventSink,
{
    pub fn new(config: &Config, events: E) -> Self {
        let balances = config.initial_balances;
        let state = State {
            fridge: Fridge::with_policy(config.initial_stock, config.restock_policy()),
            fridge_account: Account::new(Role::Fridge.account_name(), balances.fridge),
            subscriber_account: Account::new(Role::Subscriber.account_name(), balances.subscriber),
            escrow_account: Account::new(Role::Escrow.account_name(), balances.escrow),
        };

        Self {
            state: Mutex::new(state),
            events,
            prices: config.prices,
            return_refund: config.return_refund,
            restock_bond: config.restock_bond,
            bounty_rate: config.bounty_rate,
        }
    }

    pub fn ledger_events(&self) -> &E {
        &self.events
    }

    pub fn take_can(&self, flavor: Flavor) -> Outcome {
        self.apply(Command::TakeCan(flavor))
    }

    pub fn return_can(&self, flavor: Flavor) -> Outcome {
        self.apply(Command::ReturnCan(flavor))
    }

    pub fn agree_to_restock(&self) -> Outcome {
        self.apply(Command::AgreeToRestock)
    }

    pub fn complete_restock(&self) -> Outcome {
        self.apply(Command::CompleteRestock)
    }

    pub fn restock(&self) -> Outcome {
        self.apply(Command::Restock)
    }

    /// Parses and applies a named action. A rejected action changes nothing.
    pub fn dispatch(&self, action: &str, argument: Option<&str>) -> Result<Outcome, Error> {
        let command = Command::parse(action, argument)?;
        Ok(self.apply(command))
    }

    pub fn apply(&self, command: Command) -> Outcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        let events = &self.events;
        let mut cans_added = 0;

        tracing::debug!(%command, contents = ?state.fridge.status(), "pre-move contents");

        match command {
            Command::TakeCan(flavor) => {
                state.fridge.decrement(flavor);
                state.fridge_account.deposit(self.prices.get(flavor), events);
            }
            Command::ReturnCan(flavor) => {
                state.fridge.increment(flavor);
                state.fridge_account.withdraw(self.return_refund, events);
            }
            Command::AgreeToRestock => {
                state.subscriber_account.withdraw(self.restock_bond, events);
                state.escrow_account.deposit(self.restock_bond, events);
            }
            Command::CompleteRestock => {
                // no check that a bond was posted: without one escrow goes negative
                cans_added = state.fridge.restock();
                state.escrow_account.withdraw(self.restock_bond, events);
                state.subscriber_account.deposit(self.restock_bond, events);
                let bounty = Decimal::from(cans_added) * self.bounty_rate;
                state.subscriber_account.deposit(bounty, events);
            }
            Command::Restock => {
                cans_added = state.fridge.restock();
            }
        }

        tracing::debug!(%command, contents = ?state.fridge.status(), "post-move contents");

        Outcome {
            command,
            cans_added,
            snapshot: state.snapshot(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn contents(&self) -> CanCounts {
        self.lock().fridge.contents()
    }

    pub fn needs_restock(&self) -> bool {
        self.lock().fridge.check_stock()
    }

    pub fn balance(&self, role: Role) -> Decimal {
        self.lock().account(role).balance()
    }

    pub fn display_balance(&self, role: Role) -> String {
        self.lock().account(role).display_balance()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // every command leaves the state consistent, so a poisoned lock is still usable
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
