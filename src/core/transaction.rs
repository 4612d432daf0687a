//! Transaction slice - Holds the transaction collection and its reducers.
//!
//! Reducers never fail: updates and deletes against unknown ids are silently ignored.
//! Input is validated beforehand with [`TransactionDraft::validate`], which reports
//! problems to the caller instead of the store.

use crate::{
    errors::{Error, Result},
    models::{Category, NewTransaction, Transaction, TransactionPatch, TransactionType},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, trace};
use uuid::Uuid;

/// Insertion-ordered transaction collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionsState {
    transactions: Vec<Transaction>,
}

impl TransactionsState {
    /// All transactions in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transaction with the given id, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends a transaction with a fresh id and creation timestamp, returning the id.
    pub fn add(&mut self, new: NewTransaction) -> String {
        self.add_at(new, Utc::now())
    }

    fn add_at(&mut self, new: NewTransaction, created_at: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().to_string();
        trace!(%id, amount = %new.amount, "Adding transaction");
        self.transactions.push(Transaction {
            id: id.clone(),
            amount: new.amount,
            transaction_type: new.transaction_type,
            category_id: new.category_id,
            description: new.description,
            date: new.date,
            created_at,
        });
        id
    }

    /// Merges `patch` into the matching transaction. Returns `false` if the id is unknown.
    ///
    /// A zero or negative `amount` in the patch is dropped; the other fields still apply.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> bool {
        let Some(existing) = self.transactions.iter_mut().find(|t| t.id == id) else {
            debug!(%id, "Ignoring update for unknown transaction");
            return false;
        };

        match patch.amount {
            Some(amount) if amount > Decimal::ZERO => existing.amount = amount,
            Some(amount) => debug!(%id, %amount, "Ignoring non-positive amount in update"),
            None => {}
        }
        if let Some(transaction_type) = patch.transaction_type {
            existing.transaction_type = transaction_type;
        }
        if let Some(category_id) = patch.category_id {
            existing.category_id = category_id;
        }
        if let Some(description) = patch.description {
            existing.description = description;
        }
        if let Some(date) = patch.date {
            existing.date = date;
        }
        true
    }

    /// Removes the transaction with the given id. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        before != self.transactions.len()
    }

    /// Bulk overwrite, used when rehydrating persisted state.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }
}

/// Unvalidated transaction input as collected from a form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// Required, must be positive
    pub amount: Option<Decimal>,
    /// Must match the category's type
    pub transaction_type: TransactionType,
    /// Required, must exist
    pub category_id: Option<String>,
    /// Optional note, trimmed on validation
    pub description: Option<String>,
    /// Defaults to today in the form
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Starts an expense draft dated `date`, the form's default type.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            amount: None,
            transaction_type: TransactionType::Expense,
            category_id: None,
            description: None,
            date,
        }
    }

    /// Checks the draft against the current categories.
    ///
    /// # Errors
    /// - [`Error::Validation`] when the amount or category is missing
    /// - [`Error::InvalidAmount`] when the amount is zero or negative
    /// - [`Error::CategoryNotFound`] when the category id is unknown
    /// - [`Error::CategoryTypeMismatch`] when the category is of the other type
    pub fn validate(self, categories: &[Category]) -> Result<NewTransaction> {
        let amount = self.amount.ok_or_else(|| Error::Validation {
            field: "amount",
            message: "amount is required".to_string(),
        })?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }

        let category_id = self
            .category_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Validation {
                field: "category",
                message: "category is required".to_string(),
            })?;

        let category = categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| Error::CategoryNotFound {
                id: category_id.clone(),
            })?;
        if category.category_type != self.transaction_type {
            return Err(Error::CategoryTypeMismatch {
                category_id,
                category_type: category.category_type,
                transaction_type: self.transaction_type,
            });
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewTransaction {
            amount,
            transaction_type: self.transaction_type,
            category_id,
            description,
            date: self.date,
        })
    }
}
