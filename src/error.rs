//! Error types for the import pipeline.
//!
//! Failures are grouped by the phase that produces them:
//! - [`ParseError`] - the input could not be read as rows of four cells
//! - [`ValidationError`] - a row has an unusable type, value or category
//! - [`ConsistencyError`] - a row could not be bound to a resolved category
//! - [`PersistenceError`] - the store rejected a call
//!
//! Each of them aborts the import. [`Error`] wraps them together with
//! [`BalanceError`], raised when reading the balance, and the technical
//! failures around the pipeline (opening the source, removing it, writing the
//! report).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stores::CategoryId;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Balance(#[from] BalanceError),
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("row reader task failed: {0}")]
    Reader(#[from] tokio::task::JoinError),
    #[error("transactions were saved but {} could not be removed: {source}", path.display())]
    Cleanup { path: PathBuf, source: io::Error },
    #[error("cannot write report: {0}")]
    Report(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed input: {0}")]
    Csv(#[from] csv_async::Error),
    #[error("line {line}: expected {expected} cells, found {found}")]
    UnexpectedCellCount {
        line: u64,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("line {line}: value {value:?} is not a decimal number")]
    InvalidValue { line: u64, value: String },
    #[error("line {line}: value {value:?} is negative")]
    NegativeValue { line: u64, value: String },
    #[error("line {line}: unknown transaction type {value:?}")]
    UnknownType { line: u64, value: String },
    #[error("line {line}: category is missing")]
    MissingCategory { line: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("category {title:?} was not resolved for {transaction:?}")]
    UnresolvedCategory { title: String, transaction: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("category {0:?} already exists")]
    DuplicateCategory(String),
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),
    #[error("store failure: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("income total exceeds the decimal range")]
    IncomeOverflow,
    #[error("outcome total exceeds the decimal range")]
    OutcomeOverflow,
    #[error("net total exceeds the decimal range")]
    TotalOverflow,
}
