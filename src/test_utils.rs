//! Shared test utilities for the finance tracker.
//!
//! Builders with sensible defaults for domain records plus an in-memory
//! database with all tables created.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;

use crate::{
    errors::Result,
    models::{NewTransaction, Transaction, TransactionType},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all database tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// Shorthand for a calendar date. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Parses a decimal literal such as `"12.50"`.
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Noon UTC on the given day, used as a deterministic `created_at`.
pub fn noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
}

/// Builds an expense payload without a description.
pub fn new_expense(amount: Decimal, category_id: &str, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        amount,
        transaction_type: TransactionType::Expense,
        category_id: category_id.to_string(),
        description: None,
        date,
    }
}

/// Builds an income payload without a description.
pub fn new_income(amount: Decimal, category_id: &str, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        transaction_type: TransactionType::Income,
        ..new_expense(amount, category_id, date)
    }
}

/// Builds a stored transaction created at noon on its own date.
///
/// # Arguments
/// * `id` - Transaction id
/// * `amount` - Decimal literal, e.g. `"42.50"`
/// * `transaction_type` - Income or expense
/// * `category_id` - Referenced category, not checked
/// * `date` - Transaction date
pub fn transaction(
    id: &str,
    amount: &str,
    transaction_type: TransactionType,
    category_id: &str,
    date: NaiveDate,
) -> Transaction {
    transaction_created_at(id, amount, transaction_type, category_id, date, noon(date))
}

/// Same as [`transaction`] with an explicit creation timestamp.
pub fn transaction_created_at(
    id: &str,
    amount: &str,
    transaction_type: TransactionType,
    category_id: &str,
    date: NaiveDate,
    created_at: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: dec(amount),
        transaction_type,
        category_id: category_id.to_string(),
        description: None,
        date,
        created_at,
    }
}
