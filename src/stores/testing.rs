//! Test doubles that journal every collaborator call and can inject failures.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{
    Category, MemoryStore, NewCategory, NewTransaction, Store, Transaction, TransactionSpec,
};
use crate::error::PersistenceError;
use crate::fs::FileSystem;

/// Call log shared between a store and a filesystem double.
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

pub(crate) struct RecordingStore {
    inner: MemoryStore,
    journal: Journal,
    fail_on: Option<&'static str>,
    /// Saved by a "concurrent import" right before the next category save
    racing_titles: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: MemoryStore::new(),
            journal,
            fail_on: None,
            racing_titles: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, op: &'static str) -> Self {
        self.fail_on = Some(op);
        self
    }

    pub fn racing_with(self, titles: &[&str]) -> Self {
        *self.racing_titles.lock().unwrap() = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn calls(&self, op: &str) -> usize {
        self.journal.lock().unwrap().iter().filter(|call| *call == op).count()
    }

    fn record(&self, op: &'static str) -> Result<(), PersistenceError> {
        self.journal.lock().unwrap().push(op.to_string());
        if self.fail_on == Some(op) {
            return Err(PersistenceError::Backend(format!("{op} failed")));
        }
        Ok(())
    }
}

impl Store for RecordingStore {
    async fn find_categories_by_titles(
        &self,
        titles: &[String],
    ) -> Result<Vec<Category>, PersistenceError> {
        self.record("find_categories_by_titles")?;
        self.inner.find_categories_by_titles(titles).await
    }

    fn create_categories(&self, titles: &[String]) -> Vec<NewCategory> {
        self.journal.lock().unwrap().push("create_categories".to_string());
        self.inner.create_categories(titles)
    }

    async fn save_categories(
        &self,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PersistenceError> {
        self.record("save_categories")?;
        let racing = std::mem::take(&mut *self.racing_titles.lock().unwrap());
        if !racing.is_empty() {
            let racing = self.inner.create_categories(&racing);
            self.inner.save_categories(racing).await?;
        }
        self.inner.save_categories(categories).await
    }

    fn create_transactions(&self, specs: Vec<TransactionSpec>) -> Vec<NewTransaction> {
        self.journal.lock().unwrap().push("create_transactions".to_string());
        self.inner.create_transactions(specs)
    }

    async fn save_transactions(
        &self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, PersistenceError> {
        self.record("save_transactions")?;
        self.inner.save_transactions(transactions).await
    }

    async fn find_all_transactions(&self) -> Result<Vec<Transaction>, PersistenceError> {
        self.record("find_all_transactions")?;
        self.inner.find_all_transactions().await
    }
}

pub(crate) struct RecordingFs {
    journal: Journal,
    fail: bool,
}

impl RecordingFs {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl FileSystem for RecordingFs {
    async fn delete_file(&self, path: &Path) -> io::Result<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("delete_file {}", path.display()));
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        Ok(())
    }
}
