//! Reconciles category titles referenced by an import batch with the
//! categories already in the store.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::error::{Error, PersistenceError};
use crate::stores::{Category, Store};

pub struct CategoryResolver<'a, S> {
    store: &'a S,
    max_attempts: u32,
}

impl<'a, S: Store> CategoryResolver<'a, S> {
    pub fn new(store: &'a S, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Maps every requested title to its category, creating the ones the
    /// store does not know yet with a single bulk save.
    ///
    /// If another writer saves one of the new titles between the lookup and
    /// the save, the store rejects the save and resolution starts over, up to
    /// `max_attempts` times.
    pub async fn resolve(&self, titles: &[String]) -> Result<HashMap<String, Category>, Error> {
        let distinct = dedup(titles);
        if distinct.is_empty() {
            return Ok(HashMap::new());
        }

        let mut attempt = 1;
        loop {
            match self.resolve_once(&distinct).await {
                Err(PersistenceError::DuplicateCategory(title)) if attempt < self.max_attempts => {
                    warn!(%title, attempt, "category was created concurrently, retrying");
                    attempt += 1;
                }
                result => return Ok(result?),
            }
        }
    }

    async fn resolve_once(
        &self,
        distinct: &[String],
    ) -> Result<HashMap<String, Category>, PersistenceError> {
        let existing = self.store.find_categories_by_titles(distinct).await?;
        let known: HashSet<&str> = existing.iter().map(|c| c.title.as_str()).collect();
        let missing: Vec<String> = distinct
            .iter()
            .filter(|title| !known.contains(title.as_str()))
            .cloned()
            .collect();

        let created = if missing.is_empty() {
            Vec::new()
        } else {
            let new_categories = self.store.create_categories(&missing);
            self.store.save_categories(new_categories).await?
        };
        info!(
            reused = existing.len(),
            created = created.len(),
            "resolved categories"
        );

        Ok(existing
            .into_iter()
            .chain(created)
            .map(|category| (category.title.clone(), category))
            .collect())
    }
}

/// Removes repeated titles, keeping the order they were first seen in.
fn dedup(titles: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let distinct: Vec<String> = titles
        .iter()
        .filter(|title| seen.insert(title.as_str()))
        .cloned()
        .collect();
    debug!(
        requested = titles.len(),
        distinct = distinct.len(),
        "deduplicated category titles"
    );
    distinct
}
