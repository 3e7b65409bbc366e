//! Append-only ledger of saved transactions.

use rust_decimal::Decimal;

use super::categories::{CategoriesStore, CategoryId};
use crate::dto::TransactionType;
use crate::error::PersistenceError;

pub type TransactionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    pub tx_type: TransactionType,
    pub value: Decimal,
    pub category_id: CategoryId,
}

/// A transaction that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub title: String,
    pub tx_type: TransactionType,
    pub value: Decimal,
    pub category_id: CategoryId,
}

#[derive(Default)]
pub struct TransactionsStore {
    transactions: Vec<Transaction>,
}

impl TransactionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the batch. Every transaction must reference a category held by
    /// `categories`; otherwise nothing is appended.
    pub fn insert_all(
        &mut self,
        new_transactions: Vec<NewTransaction>,
        categories: &CategoriesStore,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        if let Some(orphan) = new_transactions
            .iter()
            .find(|tx| !categories.contains(tx.category_id))
        {
            return Err(PersistenceError::UnknownCategory(orphan.category_id));
        }

        let first_id = self.transactions.len() as TransactionId + 1;
        let saved: Vec<Transaction> = new_transactions
            .into_iter()
            .zip(first_id..)
            .map(|(tx, id)| Transaction {
                id,
                title: tx.title,
                tx_type: tx.tx_type,
                value: tx.value,
                category_id: tx.category_id,
            })
            .collect();
        self.transactions.extend(saved.iter().cloned());
        Ok(saved)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::NewCategory;
    use rust_decimal_macros::dec;

    fn categories_with(title: &str) -> (CategoriesStore, CategoryId) {
        let mut categories = CategoriesStore::new();
        let saved = categories
            .insert_all(vec![NewCategory {
                title: title.to_string(),
            }])
            .unwrap();
        (categories, saved[0].id)
    }

    fn new_tx(title: &str, value: Decimal, category_id: CategoryId) -> NewTransaction {
        NewTransaction {
            title: title.to_string(),
            tx_type: TransactionType::Outcome,
            value,
            category_id,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TransactionsStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (categories, food) = categories_with("Food");
        let mut store = TransactionsStore::new();

        let first = store
            .insert_all(vec![new_tx("Lunch", dec!(12.5), food)], &categories)
            .unwrap();
        let second = store
            .insert_all(
                vec![new_tx("Dinner", dec!(30), food), new_tx("Snack", dec!(2), food)],
                &categories,
            )
            .unwrap();

        assert_eq!(first[0].id, 1);
        assert_eq!(second.iter().map(|tx| tx.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_unknown_category_rejects_whole_batch() {
        let (categories, food) = categories_with("Food");
        let mut store = TransactionsStore::new();

        let result = store.insert_all(
            vec![new_tx("Lunch", dec!(12.5), food), new_tx("Bus", dec!(3), 99)],
            &categories,
        );

        assert_eq!(result, Err(PersistenceError::UnknownCategory(99)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_saved_values_are_kept_exactly() {
        let (categories, food) = categories_with("Food");
        let mut store = TransactionsStore::new();
        store
            .insert_all(vec![new_tx("Lunch", dec!(0.1), food)], &categories)
            .unwrap();

        let stored = store.iter().next().unwrap();
        assert_eq!(stored.value, dec!(0.1));
        assert_eq!(stored.category_id, food);
    }
}
