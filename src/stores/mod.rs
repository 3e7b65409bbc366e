//! Persistence layer for the import pipeline.
//!
//! The pipeline only talks to the [`Store`] trait, so callers decide where
//! categories and transactions live. [`MemoryStore`] is the bundled
//! implementation, backed by:
//! - category rows, unique by title ([`CategoriesStore`])
//! - transaction rows, each referencing an existing category ([`TransactionsStore`])

mod categories;
mod memory;
#[cfg(test)]
pub(crate) mod testing;
mod transactions;

use std::future::Future;

use rust_decimal::Decimal;

use crate::dto::TransactionType;
use crate::error::PersistenceError;

pub use categories::{CategoriesStore, Category, CategoryId, NewCategory};
pub use memory::MemoryStore;
pub use transactions::{NewTransaction, Transaction, TransactionId, TransactionsStore};

/// A transaction about to be created, bound to its resolved category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSpec {
    pub title: String,
    pub tx_type: TransactionType,
    pub value: Decimal,
    pub category: Category,
}

/// Storage the importer and the balance read from and write to.
///
/// `create_*` only build unsaved records. `save_*` persist a whole batch or
/// nothing at all.
pub trait Store: Send + Sync {
    /// Returns the persisted categories whose title is one of `titles`.
    fn find_categories_by_titles(
        &self,
        titles: &[String],
    ) -> impl Future<Output = Result<Vec<Category>, PersistenceError>> + Send;

    fn create_categories(&self, titles: &[String]) -> Vec<NewCategory> {
        titles
            .iter()
            .map(|title| NewCategory {
                title: title.clone(),
            })
            .collect()
    }

    /// Fails with [`PersistenceError::DuplicateCategory`] if any title is
    /// already taken, in which case nothing is saved.
    fn save_categories(
        &self,
        categories: Vec<NewCategory>,
    ) -> impl Future<Output = Result<Vec<Category>, PersistenceError>> + Send;

    fn create_transactions(&self, specs: Vec<TransactionSpec>) -> Vec<NewTransaction> {
        specs
            .into_iter()
            .map(|spec| NewTransaction {
                title: spec.title,
                tx_type: spec.tx_type,
                value: spec.value,
                category_id: spec.category.id,
            })
            .collect()
    }

    fn save_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> impl Future<Output = Result<Vec<Transaction>, PersistenceError>> + Send;

    fn find_all_transactions(
        &self,
    ) -> impl Future<Output = Result<Vec<Transaction>, PersistenceError>> + Send;
}
