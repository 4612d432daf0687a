//! Relational export module - CRUD over the `SQLite` schema.
//!
//! The JSON blob is the source of truth. These tables are an export/import format:
//! [`snapshot::export_state`] replaces their contents with a store snapshot and
//! [`snapshot::import_state`] reads one back. The per-table functions mirror the
//! store reducers, including the default-category guard.

/// Category queries and default seeding
pub mod categories;
/// Key-value preference queries
pub mod settings;
/// Whole-state export and import
pub mod snapshot;
/// Transaction queries
pub mod transactions;

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    errors::{Error, Result},
    models::TransactionType,
};

pub use snapshot::{export_state, import_state};

pub(crate) fn parse_type(value: &str) -> Result<TransactionType> {
    TransactionType::from_str(value).map_err(|_| Error::UnknownValue {
        kind: "type",
        value: value.to_string(),
    })
}

pub(crate) fn amount_to_real(amount: Decimal) -> Result<f64> {
    amount.to_f64().ok_or_else(|| Error::UnknownValue {
        kind: "amount",
        value: amount.to_string(),
    })
}

/// Reads a `REAL` back as the shortest decimal that prints the same, so `12.1`
/// stays `12.1` rather than its binary expansion.
pub(crate) fn amount_from_real(value: f64) -> Result<Decimal> {
    let text = value.to_string();
    Decimal::from_str(&text).map_err(|_| Error::UnknownValue {
        kind: "amount",
        value: text,
    })
}
