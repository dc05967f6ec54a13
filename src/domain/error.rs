#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid can flavor: {0}")]
    InvalidFlavor(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output failed with: {0}")]
    Output(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Sensor store failed with: {0}")]
    Storage(String),
}

impl Error {
    /// True for errors caused by the caller's request rather than the process.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidFlavor(_) | Error::UnknownCommand(_))
    }
}
