//! Category slice - Default seed data, user categories and the default-category guard.
//!
//! The guard lives here and only here: every caller that edits or deletes a
//! category through the store inherits it, so a default category can never be
//! renamed or removed regardless of which screen asked for it.

use std::collections::HashMap;

use crate::{
    errors::{Error, Result},
    models::{Category, CategoryPatch, NewCategory, TransactionType},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Name shown for transactions whose category no longer exists.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
/// Neutral color used for unresolved categories.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#999999";

const DEFAULT_CATEGORIES: [(&str, &str, &str, TransactionType, &str); 9] = [
    ("salary", "Salary", "Maaş", TransactionType::Income, "#4CAF50"),
    ("freelance", "Freelance", "Serbest Çalışma", TransactionType::Income, "#8BC34A"),
    ("other-income", "Other Income", "Diğer Gelir", TransactionType::Income, "#CDDC39"),
    ("rent", "Rent", "Kira", TransactionType::Expense, "#F44336"),
    ("groceries", "Groceries", "Market", TransactionType::Expense, "#E91E63"),
    ("transportation", "Transportation", "Ulaşım", TransactionType::Expense, "#9C27B0"),
    ("utilities", "Utilities", "Faturalar", TransactionType::Expense, "#673AB7"),
    ("entertainment", "Entertainment", "Eğlence", TransactionType::Expense, "#3F51B5"),
    ("healthcare", "Healthcare", "Sağlık", TransactionType::Expense, "#2196F3"),
];

/// The built-in categories seeded on first run.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, localized, category_type, color)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            name_localized: Some((*localized).to_string()),
            color: (*color).to_string(),
            category_type: *category_type,
            is_default: true,
            created_at: None,
        })
        .collect()
}

/// Insertion-ordered category collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoriesState {
    categories: Vec<Category>,
}

impl Default for CategoriesState {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

impl CategoriesState {
    #[must_use]
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories of one type, in insertion order.
    pub fn of_type(&self, category_type: TransactionType) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| c.category_type == category_type)
    }

    /// Appends a user category with a generated id. User categories are never default.
    pub fn add(&mut self, new: NewCategory) -> String {
        self.add_at(new, Utc::now())
    }

    fn add_at(&mut self, new: NewCategory, created_at: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().to_string();
        debug!(%id, name = %new.name, "Adding category");
        self.categories.push(Category {
            id: id.clone(),
            name: new.name,
            name_localized: new.name_localized,
            color: new.color,
            category_type: new.category_type,
            is_default: false,
            created_at: Some(created_at),
        });
        id
    }

    /// Merges `patch` into a user category. Unknown ids and default categories are left alone.
    pub fn update(&mut self, id: &str, patch: CategoryPatch) -> bool {
        let Some(existing) = self.categories.iter_mut().find(|c| c.id == id) else {
            debug!(%id, "Ignoring update for unknown category");
            return false;
        };
        if existing.is_default {
            debug!(%id, "Refusing to edit default category");
            return false;
        }

        if let Some(name) = patch.name {
            existing.name = name;
        }
        if let Some(name_localized) = patch.name_localized {
            existing.name_localized = name_localized;
        }
        if let Some(color) = patch.color {
            existing.color = color;
        }
        if let Some(category_type) = patch.category_type {
            existing.category_type = category_type;
        }
        true
    }

    /// Removes a user category. Default categories and unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id || c.is_default);
        let removed = before != self.categories.len();
        if !removed {
            debug!(%id, "Category not deleted (unknown or default)");
        }
        removed
    }

    /// Bulk overwrite, used when rehydrating persisted state.
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Seeds the default set when the collection is empty. Returns whether anything was added.
    pub fn seed_defaults_if_empty(&mut self) -> bool {
        if !self.categories.is_empty() {
            return false;
        }
        self.categories = default_categories();
        info!(count = self.categories.len(), "Seeded default categories");
        true
    }
}

/// Unvalidated category input as collected from a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub name_localized: Option<String>,
    pub color: String,
    pub category_type: TransactionType,
}

impl CategoryDraft {
    /// Trims the name and rejects it when empty.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the name is blank or the color is missing.
    pub fn validate(self) -> Result<NewCategory> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name",
                message: "category name cannot be empty".to_string(),
            });
        }
        let color = self.color.trim().to_string();
        if color.is_empty() {
            return Err(Error::Validation {
                field: "color",
                message: "category color is required".to_string(),
            });
        }

        Ok(NewCategory {
            name,
            name_localized: self
                .name_localized
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            color,
            category_type: self.category_type,
        })
    }
}

/// Id-indexed view over a category list for read-side lookups.
#[derive(Debug, Clone)]
pub struct CategoryLookup<'a> {
    by_id: HashMap<&'a str, &'a Category>,
}

impl<'a> CategoryLookup<'a> {
    #[must_use]
    pub fn new(categories: &'a [Category]) -> Self {
        Self {
            by_id: categories.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    /// Category name, or [`UNKNOWN_CATEGORY_NAME`] for dangling references.
    #[must_use]
    pub fn name(&self, id: &str) -> &'a str {
        self.get(id).map_or(UNKNOWN_CATEGORY_NAME, |c| c.name.as_str())
    }

    /// Category color, or [`UNKNOWN_CATEGORY_COLOR`] for dangling references.
    #[must_use]
    pub fn color(&self, id: &str) -> &'a str {
        self.get(id)
            .map_or(UNKNOWN_CATEGORY_COLOR, |c| c.color.as_str())
    }
}
