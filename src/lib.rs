//! Accounting core of a simulated IoT fridge.
//!
//! A consumer takes cans out of the fridge and pays into the fridge account,
//! or puts them back for a flat refund. When stock runs low a subscriber
//! stakes a bond in escrow, restocks, and gets the bond back plus a bounty
//! per can added. Every balance movement raises a one-shot ledger event flag
//! for display.
//!
//! [`workflow::Workflow`] is the entry point. Transports (the CSV batch
//! [`engine::Engine`], a web server, ...) call its operations directly.

pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod ledger_event;
pub mod logging;
pub mod output_repository;
pub mod sensor;
pub mod workflow;

pub use config::Config;
pub use domain::{Account, Command, Error, Flavor, Fridge, Role, Snapshot};
pub use ledger_event::LedgerEventFlag;
pub use workflow::{Outcome, Workflow};
