use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use rust_decimal::Decimal;

use crate::domain::{Command, EntryKind, Error, SensorReading, Snapshot};

/// Receives a notification for every balance movement.
pub trait LedgerEventSink {
    fn notify(&self, account: &str, kind: EntryKind, amount: Decimal);
}

impl<T: LedgerEventSink + ?Sized> LedgerEventSink for Arc<T> {
    fn notify(&self, account: &str, kind: EntryKind, amount: Decimal) {
        (**self).notify(account, kind, amount)
    }
}

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<Command, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait OutputRepository {
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Error>;
    fn flush(&mut self) -> Result<(), Error>;
}

pub trait Sensor {
    fn name(&self) -> &str;
    fn sensor_type(&self) -> &str;
    fn read(&mut self) -> SensorReading;
}

#[async_trait]
pub trait SensorStore: Send + Sync {
    async fn add_reading(&mut self, reading: SensorReading) -> Result<(), Error>;

    /// The most recent `count` readings, oldest first.
    async fn readings(&self, count: usize) -> Result<Vec<SensorReading>, Error>;

    async fn readings_for_sensor(
        &self,
        sensor_name: &str,
        count: usize,
    ) -> Result<Vec<SensorReading>, Error>;
}
