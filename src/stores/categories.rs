use std::collections::{HashMap, HashSet};

use crate::error::PersistenceError;

pub type CategoryId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

/// A category that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub title: String,
}

pub struct CategoriesStore {
    categories: HashMap<CategoryId, Category>,
    /// Title index, also enforces title uniqueness
    by_title: HashMap<String, CategoryId>,
    next_id: CategoryId,
}

impl Default for CategoriesStore {
    fn default() -> Self {
        Self {
            categories: HashMap::new(),
            by_title: HashMap::new(),
            next_id: 1,
        }
    }
}

impl CategoriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_by_titles(&self, titles: &[String]) -> Vec<Category> {
        let mut seen = HashSet::new();
        titles
            .iter()
            .filter(|title| seen.insert(title.as_str()))
            .filter_map(|title| self.by_title.get(title))
            .filter_map(|id| self.categories.get(id))
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.categories.contains_key(&id)
    }

    /// Inserts all categories, or none of them if any title is already
    /// stored or repeated within the batch.
    pub fn insert_all(
        &mut self,
        new_categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PersistenceError> {
        let mut batch_titles = HashSet::new();
        for category in &new_categories {
            if self.by_title.contains_key(&category.title)
                || !batch_titles.insert(category.title.as_str())
            {
                return Err(PersistenceError::DuplicateCategory(category.title.clone()));
            }
        }

        let saved = new_categories
            .into_iter()
            .map(|category| {
                let id = self.next_id();
                let saved = Category {
                    id,
                    title: category.title,
                };
                self.by_title.insert(saved.title.clone(), id);
                self.categories.insert(id, saved.clone());
                saved
            })
            .collect();
        Ok(saved)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn next_id(&mut self) -> CategoryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
