use crate::records::FormId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RandomizerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Failed to load INGR records: the source set is empty")]
    NoRecords,

    #[error("Invalid randomization type selected: '{0}'")]
    UnknownMode(String),

    #[error("Invalid form id '{0}'")]
    InvalidFormId(String),

    /// No candidate left that is distinct from the identities already placed
    /// on the record (and, for slot 0, distinct from paralysis).
    ///
    /// `dist` hits this near the end of a run when few identities dominate the
    /// pool; on skewed load orders roughly one seed in ten fails. Rerunning
    /// with another seed usually succeeds.
    #[error(
        "Effect pool exhausted while filling slot {slot} of {record}: \
         only {distinct_remaining} distinct effect(s) remain (try another seed)"
    )]
    Starvation {
        record: FormId,
        slot: usize,
        distinct_remaining: usize,
    },

    #[error("Record Store Error: {0}")]
    Store(String),
}

pub type RzResult<T> = Result<T, RandomizerError>;
