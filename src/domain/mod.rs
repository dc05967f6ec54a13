pub mod account;
pub mod command;
pub mod error;
pub mod fridge;
pub mod ledger;
pub mod sensor_reading;
pub mod snapshot;
pub mod traits;

pub use account::Account;
pub use command::Command;
pub use error::Error;
pub use fridge::{CanCounts, Flavor, Fridge, RestockPolicy};
pub use ledger::{EntryKind, LedgerEntry};
pub use sensor_reading::SensorReading;
pub use snapshot::{Role, Snapshot};
pub use traits::{
    CommandStream, DeadLetterQueue, LedgerEventSink, OutputRepository, Sensor, SensorStore,
};
