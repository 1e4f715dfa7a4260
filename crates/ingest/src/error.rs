use ledgersift_core::SiftError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("empty CSV: no header row")]
    EmptyHeader,

    #[error(transparent)]
    Dataset(#[from] SiftError),
}
