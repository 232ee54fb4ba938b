//! Error types for role mining and for the matrix sources that feed it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by candidate generation and greedy selection.
#[derive(Error, Debug)]
pub enum MinerError {
    /// The UPA has zero users or zero permissions.
    #[error("UPA must have non-zero dimensions (users: {users}, permissions: {permissions})")]
    InvalidInput { users: usize, permissions: usize },

    /// A row's length differs from the first row's.
    #[error("row of user {user} has {found} permissions, expected {expected}")]
    RaggedRow {
        user: usize,
        expected: usize,
        found: usize,
    },

    /// A cell holds something other than 0 or 1.
    #[error("row of user {user} holds non-binary value {value}")]
    NonBinaryCell { user: usize, value: u8 },

    /// More rows than a `u32` user index can address.
    #[error("too many users: {0}")]
    TooManyUsers(usize),

    /// No remaining candidate can cover the cells still uncovered.
    ///
    /// Means the candidate pool did not close over the UPA; the run is
    /// aborted instead of returning a partial assignment.
    #[error(
        "candidate roles exhausted with {uncovered} uncovered cells left \
         (delta factor: {delta_factor}, roles selected: {selected})"
    )]
    CoverageExhausted {
        uncovered: usize,
        delta_factor: usize,
        selected: usize,
    },

    /// Invalid miner configuration JSON.
    #[error("invalid miner config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MinerError>;

/// Errors raised while loading or generating a UPA.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Read(#[from] std::io::Error),

    /// A line is not two whitespace-separated integers.
    #[error("line {line}: expected `<user> <permission>`, got {content:?}")]
    Parse { line: usize, content: String },

    /// User and permission numbers are 1-based.
    #[error("line {line}: user and permission numbers start at 1")]
    ZeroIndex { line: usize },

    /// Synthetic generator parameters are inconsistent.
    #[error("invalid generator parameters: {0}")]
    InvalidParameters(String),
}
