//! Category storage operations backed by redb.

use super::rows::{load, remove, scan, store};
use super::tables::{CATEGORIES, QUESTIONS};
use crate::constants::CATEGORY_RECENT_QUESTIONS;
use crate::error::AppError;
use crate::listing::ListingQuery;
use crate::models::category::{apply_update, display_order, CategoryDetail, UpdateCategoryRequest};
use crate::models::question::QuestionBrief;
use crate::models::{Category, Question};
use redb::{ReadableDatabase, ReadableTableMetadata};
use std::sync::Arc;

/// Accessor for the `categories` table.
pub struct CategoryDb {
    db: Arc<redb::Database>,
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn name_taken(categories: &[Category], name: &str, except_id: Option<&str>) -> bool {
    let wanted = name_key(name);
    categories
        .iter()
        .filter(|c| Some(c.id.as_str()) != except_id)
        .any(|c| name_key(&c.name) == wanted)
}

impl CategoryDb {
    /// Create the `categories` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(CATEGORIES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    pub fn get(&self, id: &str) -> Result<Option<Category>, AppError> {
        let read_txn = self.db.begin_read()?;
        let categories = read_txn.open_table(CATEGORIES)?;
        load(&categories, id)
    }

    pub fn count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let categories = read_txn.open_table(CATEGORIES)?;
        Ok(categories.len()?)
    }

    /// List categories by display order, then name.
    ///
    /// # Arguments
    /// - `include_inactive`: Also return categories with `is_active == false`.
    pub fn list(&self, include_inactive: bool) -> Result<Vec<Category>, AppError> {
        let read_txn = self.db.begin_read()?;
        let categories = read_txn.open_table(CATEGORIES)?;
        let mut rows: Vec<Category> =
            scan(&categories, |c: &Category| include_inactive || c.is_active)?;
        rows.sort_by(display_order);
        Ok(rows)
    }

    /// A category with its most recent questions.
    ///
    /// # Returns
    /// `Ok(None)` when the category does not exist.
    pub fn detail(&self, id: &str) -> Result<Option<CategoryDetail>, AppError> {
        let read_txn = self.db.begin_read()?;
        let categories = read_txn.open_table(CATEGORIES)?;
        let Some(category) = load::<Category>(&categories, id)? else {
            return Ok(None);
        };

        let query = ListingQuery::default().with_category(id);
        let questions = read_txn.open_table(QUESTIONS)?;
        let mut recent: Vec<Question> = scan(&questions, |q: &Question| query.matches(q))?;
        recent.sort_by(|a, b| query.compare(a, b));
        let recent_questions = recent
            .iter()
            .take(CATEGORY_RECENT_QUESTIONS)
            .map(QuestionBrief::from)
            .collect();

        Ok(Some(CategoryDetail {
            category,
            recent_questions,
        }))
    }

    /// Insert a category at the end of the display order.
    ///
    /// # Returns
    /// The stored row with its assigned `order`.
    ///
    /// # Errors
    /// [`AppError::BadRequest`] when the name is already used (ignoring case).
    pub fn create(&self, mut category: Category) -> Result<Category, AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut categories = write_txn.open_table(CATEGORIES)?;
            let existing: Vec<Category> = scan(&categories, |_: &Category| true)?;
            if name_taken(&existing, &category.name, None) {
                return Err(AppError::BadRequest(
                    "Category name already exists".to_string(),
                ));
            }
            category.order = existing.iter().map(|c| c.order).max().unwrap_or(0) + 1;
            store(&mut categories, &category.id, &category)?;
        }
        write_txn.commit()?;
        Ok(category)
    }

    /// Apply a partial update.
    ///
    /// # Returns
    /// `Ok(None)` when the category does not exist.
    ///
    /// # Errors
    /// [`AppError::BadRequest`] when renaming onto an existing name.
    pub fn update(
        &self,
        id: &str,
        update: &UpdateCategoryRequest,
    ) -> Result<Option<Category>, AppError> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut categories = write_txn.open_table(CATEGORIES)?;
            let Some(mut category) = load::<Category>(&categories, id)? else {
                return Ok(None);
            };
            if let Some(name) = &update.name {
                let existing: Vec<Category> = scan(&categories, |_: &Category| true)?;
                if name_taken(&existing, name, Some(id)) {
                    return Err(AppError::BadRequest(
                        "Category name already exists".to_string(),
                    ));
                }
            }
            apply_update(&mut category, update);
            store(&mut categories, id, &category)?;
            category
        };
        write_txn.commit()?;
        Ok(Some(updated))
    }

    /// Delete an empty category.
    ///
    /// # Returns
    /// `Ok(true)` when removed, `Ok(false)` when missing.
    ///
    /// # Errors
    /// [`AppError::BadRequest`] when any question is still filed under it.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut categories = write_txn.open_table(CATEGORIES)?;
            let questions = write_txn.open_table(QUESTIONS)?;
            let Some(category) = load::<Category>(&categories, id)? else {
                return Ok(false);
            };
            let filed: Vec<Question> = scan(&questions, |q: &Question| q.category_id == id)?;
            if category.question_count > 0 || !filed.is_empty() {
                return Err(AppError::BadRequest(
                    "Cannot delete category that contains questions".to_string(),
                ));
            }
            remove(&mut categories, id)?
        };
        write_txn.commit()?;
        Ok(deleted)
    }
}
