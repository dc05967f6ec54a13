use crate::domain::{DeadLetterQueue, Error};

/// Logs rejected commands and moves on.
#[derive(Default, Debug)]
pub struct LogDLQ {}

impl DeadLetterQueue for LogDLQ {
    fn report(&self, error: &Error) {
        if error.is_client_error() {
            tracing::warn!(%error, "command rejected");
        } else {
            tracing::error!(%error, "command failed");
        }
    }
}
