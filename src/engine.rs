use crate::domain::{
    Error,
    traits::{CommandStream, DeadLetterQueue, OutputRepository},
};
use crate::ledger_event::LedgerEventFlag;
use crate::workflow::Workflow;

use futures::StreamExt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: CommandStream,
    O: OutputRepository,
    D: DeadLetterQueue,
{
    ingestion: I,
    output_repository: O,
    dlq: D,
    workflow: Workflow<LedgerEventFlag>,
}

impl<I, O, D> Engine<I, O, D>
where
    I: CommandStream,
    O: OutputRepository,
    D: DeadLetterQueue,
{
    pub fn new(
        ingestion: I,
        output_repository: O,
        dlq: D,
        workflow: Workflow<LedgerEventFlag>,
    ) -> Self {
        Self {
            ingestion,
            output_repository,
            dlq,
            workflow,
        }
    }

    pub fn workflow(&self) -> &Workflow<LedgerEventFlag> {
        &self.workflow
    }

    pub async fn process(&mut self) -> Summary {
        let mut summary = Summary::default();
        let mut res = self.ingestion.stream();

        while let Some(cmd) = res.next().await {
            match cmd {
                Ok(cmd) => {
                    let outcome = self.workflow.apply(cmd);
                    tracing::info!(
                        command = %outcome.command,
                        cans_added = outcome.cans_added,
                        needs_restock = outcome.snapshot.needs_restock,
                        "command applied"
                    );
                    if self.workflow.ledger_events().consume() {
                        tracing::info!(command = %outcome.command, "new ledger transaction");
                    }
                    summary.applied += 1;
                }
                Err(e) => {
                    self.dlq.report(&e);
                    summary.rejected += 1;
                }
            }
        }

        summary
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.output_repository
            .write_snapshot(&self.workflow.snapshot())?;
        self.output_repository.flush()
    }

    pub fn into_output(self) -> O {
        self.output_repository
    }
}
