use thiserror::Error;

use crate::state::StateStoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source Error - {0}")]
    Source(String),

    #[error("State Error - {0}")]
    State(String),

    #[error("Config Error - {0}")]
    Config(String),

    #[error("Close Error - {0}")]
    Close(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::State(format!("serde - {e}"))
    }
}

impl From<StateStoreError> for Error {
    fn from(e: StateStoreError) -> Self {
        Error::State(e.to_string())
    }
}
