//! Unified error type for the finance tracker.
//!
//! Store reducers never fail; errors come from draft validation, the persistence
//! adapter, configuration loading and the relational export module.

use rust_decimal::Decimal;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::TransactionType;

/// All errors surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A draft failed validation before dispatch
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Human readable reason
        message: String,
    },

    /// Amounts must be strictly positive magnitudes
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Referenced category does not exist
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// The missing category id
        id: String,
    },

    /// Transaction type disagrees with the type of its category
    #[error("Category '{category_id}' is {category_type}, but the transaction is {transaction_type}")]
    CategoryTypeMismatch {
        /// Referenced category
        category_id: String,
        /// Type of the category
        category_type: TransactionType,
        /// Type of the transaction being created
        transaction_type: TransactionType,
    },

    /// The blob storage backend failed
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
    },

    /// The blob could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure outside the storage backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A unique, foreign key or check constraint rejected a write
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// Message reported by the database
        message: String,
    },

    /// The database could not be reached
    #[error("Database connection error: {message}")]
    Connection {
        /// Message reported by the driver
        message: String,
    },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A stored string did not map to a known enum value
    #[error("Unknown {kind} value: '{value}'")]
    UnknownValue {
        /// Which enum was being parsed
        kind: &'static str,
        /// The raw value
        value: String,
    },

    /// The background persistence task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message))
            | Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return Self::ConstraintViolation { message };
            }
            _ => {}
        }

        match err {
            DbErr::Conn(e) => Self::Connection {
                message: e.to_string(),
            },
            DbErr::ConnectionAcquire(e) => Self::Connection {
                message: e.to_string(),
            },
            other => {
                // SQLite reports CHECK failures as generic query errors
                let message = other.to_string();
                if message.contains("constraint failed") {
                    Self::ConstraintViolation { message }
                } else {
                    Self::Database(other)
                }
            }
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
