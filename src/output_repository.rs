use std::io::Write;

use serde::Serialize;

use crate::domain::{Error, OutputRepository, Role, Snapshot};

/// Writes snapshots as CSV rows, balances to two decimal places.
#[derive(Debug)]
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}

#[derive(Debug, Serialize)]
struct ReportRow {
    red: u32,
    green: u32,
    blue: u32,
    needs_restock: bool,
    fridge: String,
    subscriber: String,
    escrow: String,
}

impl From<&Snapshot> for ReportRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            red: snapshot.contents.red,
            green: snapshot.contents.green,
            blue: snapshot.contents.blue,
            needs_restock: snapshot.needs_restock,
            fridge: snapshot.display_balance(Role::Fridge),
            subscriber: snapshot.display_balance(Role::Subscriber),
            escrow: snapshot.display_balance(Role::Escrow),
        }
    }
}

impl<W: Write> CsvOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Output(e.to_string()))
    }
}

impl CsvOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputRepository for CsvOutput<W> {
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
        self.writer
            .serialize(ReportRow::from(snapshot))
            .map_err(|e| Error::Output(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}
