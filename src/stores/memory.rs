use tokio::sync::RwLock;

use super::{
    CategoriesStore, Category, NewCategory, NewTransaction, Store, Transaction, TransactionsStore,
};
use crate::error::PersistenceError;

#[derive(Default)]
struct Tables {
    categories: CategoriesStore,
    transactions: TransactionsStore,
}

/// In-process [`Store`]. Each save takes the write lock for the whole batch,
/// so concurrent imports observe it either completely or not at all.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn category_count(&self) -> usize {
        self.tables.read().await.categories.len()
    }

    pub async fn transaction_count(&self) -> usize {
        self.tables.read().await.transactions.len()
    }
}

impl Store for MemoryStore {
    async fn find_categories_by_titles(
        &self,
        titles: &[String],
    ) -> Result<Vec<Category>, PersistenceError> {
        Ok(self.tables.read().await.categories.find_by_titles(titles))
    }

    async fn save_categories(
        &self,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PersistenceError> {
        self.tables.write().await.categories.insert_all(categories)
    }

    async fn save_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        let mut tables = self.tables.write().await;
        let Tables {
            categories,
            transactions: ledger,
        } = &mut *tables;
        ledger.insert_all(transactions, categories)
    }

    async fn find_all_transactions(&self) -> Result<Vec<Transaction>, PersistenceError> {
        Ok(self.tables.read().await.transactions.iter().cloned().collect())
    }
}
