//! Imports a tabular file of transactions into a [`Store`].
//!
//! One call to [`TransactionImporter::execute`] is one batch. The phases run
//! strictly one after another:
//! 1. read every row of the source
//! 2. validate every row, before anything is written
//! 3. resolve category titles, creating the missing ones
//! 4. bind each row to its category and save all transactions at once
//! 5. remove the source file
//!
//! A failure in any phase aborts the rest, so the source is only removed once
//! its transactions are saved.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use tokio::fs::File;
use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::config::ImportConfig;
use crate::dto::{ParsedRow, TransactionType};
use crate::error::{ConsistencyError, Error, ValidationError};
use crate::fs::FileSystem;
use crate::parser::collect_rows;
use crate::resolver::CategoryResolver;
use crate::stores::{Category, Store, Transaction, TransactionSpec};

/// A row that passed validation but is not bound to a category yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidRow {
    line: u64,
    title: String,
    tx_type: TransactionType,
    value: Decimal,
    category: String,
}

pub struct TransactionImporter<'a, S, F> {
    store: &'a S,
    fs: &'a F,
    config: ImportConfig,
}

impl<'a, S: Store, F: FileSystem> TransactionImporter<'a, S, F> {
    pub fn new(store: &'a S, fs: &'a F, config: ImportConfig) -> Self {
        Self { store, fs, config }
    }

    /// Imports the file at `path` and returns the saved transactions.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The file cannot be opened or is malformed
    /// * A row has an unknown type, a non-numeric or negative value, or no category
    /// * The store rejects any of the writes
    /// * The source cannot be removed after the transactions were saved
    pub async fn execute<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Transaction>, Error> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;

        let saved = self.execute_reader(file).await?;

        if self.config.remove_source {
            self.fs
                .delete_file(path)
                .await
                .map_err(|source| Error::Cleanup {
                    path: path.to_owned(),
                    source,
                })?;
            info!(path = %path.display(), "removed imported source");
        }
        Ok(saved)
    }

    /// Imports from any byte stream. Nothing is removed afterwards.
    pub async fn execute_reader<R>(&self, reader: R) -> Result<Vec<Transaction>, Error>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let rows = collect_rows(reader, self.config.parser, self.config.channel_capacity).await?;
        let rows = rows
            .into_iter()
            .map(validate)
            .collect::<Result<Vec<_>, _>>()?;
        info!(rows = rows.len(), "read transactions from source");

        let titles: Vec<String> = rows.iter().map(|row| row.category.clone()).collect();
        let categories = CategoryResolver::new(self.store, self.config.category_attempts)
            .resolve(&titles)
            .await?;

        let specs = rows
            .into_iter()
            .map(|row| bind(row, &categories))
            .collect::<Result<Vec<_>, _>>()?;

        let new_transactions = self.store.create_transactions(specs);
        let saved = self.store.save_transactions(new_transactions).await?;
        info!(transactions = saved.len(), "saved transactions");
        Ok(saved)
    }
}

fn validate(row: ParsedRow) -> Result<ValidRow, ValidationError> {
    let tx_type = match TransactionType::from_token(&row.tx_type) {
        TransactionType::Other(value) => {
            return Err(ValidationError::UnknownType {
                line: row.line,
                value,
            })
        }
        known => known,
    };

    let value = parse_value(&row.raw_value).ok_or_else(|| ValidationError::InvalidValue {
        line: row.line,
        value: row.raw_value.clone(),
    })?;
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue {
            line: row.line,
            value: row.raw_value,
        });
    }

    if row.category.is_empty() {
        return Err(ValidationError::MissingCategory { line: row.line });
    }

    Ok(ValidRow {
        line: row.line,
        title: row.title,
        tx_type,
        value,
        category: row.category,
    })
}

/// Plain integer or decimal literals only. Digit separators are refused and
/// so is anything that would not fit without rounding.
fn parse_value(raw: &str) -> Option<Decimal> {
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str_exact(raw).ok()
}

fn bind(
    row: ValidRow,
    categories: &HashMap<String, Category>,
) -> Result<TransactionSpec, ConsistencyError> {
    let Some(category) = categories.get(&row.category) else {
        return Err(ConsistencyError::UnresolvedCategory {
            title: row.category,
            transaction: row.title,
        });
    };
    debug!(line = row.line, category_id = category.id, "bound row to category");
    Ok(TransactionSpec {
        title: row.title,
        tx_type: row.tx_type,
        value: row.value,
        category: category.clone(),
    })
}
