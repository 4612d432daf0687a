//! Transaction queries.

use crate::{
    db::{amount_from_real, amount_to_real, parse_type},
    entities::{Category as CategoryEntity, Transaction as TransactionEntity, category, transaction},
    errors::Result,
    models::Transaction,
};
use chrono::NaiveTime;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, instrument};

/// A transaction joined with the display fields of its category.
///
/// The category fields are `None` when the referenced category is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub transaction: Transaction,
    pub category_name: Option<String>,
    pub category_name_localized: Option<String>,
    pub category_color: Option<String>,
}

fn to_active_model(tx: &Transaction) -> Result<transaction::ActiveModel> {
    Ok(transaction::ActiveModel {
        id: Set(tx.id.clone()),
        amount: Set(amount_to_real(tx.amount)?),
        description: Set(tx.description.clone()),
        category_id: Set(tx.category_id.clone()),
        date: Set(tx.date),
        transaction_type: Set(tx.transaction_type.to_string()),
        created_at: Set(Some(tx.created_at)),
    })
}

impl TryFrom<transaction::Model> for Transaction {
    type Error = crate::errors::Error;

    fn try_from(row: transaction::Model) -> Result<Self> {
        // Rows written by other tools may lack a timestamp; midnight keeps them ordered by date
        let created_at = row
            .created_at
            .unwrap_or_else(|| row.date.and_time(NaiveTime::MIN).and_utc());
        Ok(Self {
            amount: amount_from_real(row.amount)?,
            transaction_type: parse_type(&row.transaction_type)?,
            id: row.id,
            category_id: row.category_id,
            description: row.description,
            date: row.date,
            created_at,
        })
    }
}

/// Inserts a transaction row.
///
/// # Errors
/// [`Error::ConstraintViolation`](crate::errors::Error::ConstraintViolation) if the id exists
/// or the category does not
pub async fn insert_transaction<C: ConnectionTrait>(db: &C, tx: &Transaction) -> Result<()> {
    to_active_model(tx)?.insert(db).await?;
    Ok(())
}

/// Retrieves all transactions with their category, newest date first and
/// newest insertion first within a date.
pub async fn get_all_transactions<C: ConnectionTrait>(db: &C) -> Result<Vec<TransactionRow>> {
    let rows: Vec<(transaction::Model, Option<category::Model>)> = TransactionEntity::find()
        .find_also_related(CategoryEntity)
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::CreatedAt)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(tx, category)| {
            let (category_name, category_name_localized, category_color) = category
                .map_or((None, None, None), |c| {
                    (Some(c.name), c.name_localized, Some(c.color))
                });
            Ok(TransactionRow {
                transaction: Transaction::try_from(tx)?,
                category_name,
                category_name_localized,
                category_color,
            })
        })
        .collect()
}

/// Overwrites every mutable field of a transaction. `id` and `created_at` are kept.
///
/// # Returns
/// Whether a row with that id existed
#[instrument(skip(db, tx), fields(id = %tx.id))]
pub async fn update_transaction<C: ConnectionTrait>(db: &C, tx: &Transaction) -> Result<bool> {
    let result = TransactionEntity::update_many()
        .col_expr(transaction::Column::Amount, Expr::value(amount_to_real(tx.amount)?))
        .col_expr(
            transaction::Column::Description,
            Expr::value(tx.description.clone()),
        )
        .col_expr(
            transaction::Column::CategoryId,
            Expr::value(tx.category_id.clone()),
        )
        .col_expr(transaction::Column::Date, Expr::value(tx.date))
        .col_expr(
            transaction::Column::TransactionType,
            Expr::value(tx.transaction_type.to_string()),
        )
        .filter(transaction::Column::Id.eq(tx.id.as_str()))
        .exec(db)
        .await?;

    debug!(rows = result.rows_affected, "Transaction update executed");
    Ok(result.rows_affected > 0)
}

/// Deletes a transaction by id.
///
/// # Returns
/// Whether a row was deleted
#[instrument(skip(db))]
pub async fn delete_transaction<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool> {
    let result = TransactionEntity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        db::categories::seed_default_categories,
        errors::Error,
        models::TransactionType,
        test_utils::*,
    };
    use chrono::Duration;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn test_insert_and_list_in_display_order() -> Result<()> {
        let db = setup_test_db().await?;
        seed_default_categories(&db).await?;

        let day = date(2025, 5, 10);
        let older = transaction("old", "1", TransactionType::Expense, "rent", date(2025, 5, 1));
        let first = transaction("first", "2.25", TransactionType::Expense, "groceries", day);
        let mut second = transaction("second", "1000", TransactionType::Income, "salary", day);
        second.created_at += Duration::minutes(1);
        second.description = Some("May salary".to_string());

        for tx in [&older, &first, &second] {
            insert_transaction(&db, tx).await?;
        }

        let rows = get_all_transactions(&db).await?;
        let ids: Vec<&str> = rows.iter().map(|r| r.transaction.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first", "old"]);
        assert_eq!(rows[0].transaction, second);
        assert_eq!(rows[0].category_name.as_deref(), Some("Salary"));
        assert_eq!(rows[0].category_name_localized.as_deref(), Some("Maaş"));
        assert_eq!(rows[1].category_color.as_deref(), Some("#E91E63"));
        assert_eq!(rows[1].transaction.amount, dec("2.25"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let tx = transaction("t1", "5", TransactionType::Expense, "missing", date(2025, 5, 1));

        let err = insert_transaction(&db, &tx).await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_type_violates_check() -> Result<()> {
        let db = setup_test_db().await?;
        seed_default_categories(&db).await?;

        let err = db
            .execute(Statement::from_string(
                db.get_database_backend(),
                "INSERT INTO transactions (id, amount, category_id, date, type) \
                 VALUES ('x', 1.0, 'rent', '2025-05-01', 'transfer')",
            ))
            .await
            .map_err(Error::from)
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete() -> Result<()> {
        let db = setup_test_db().await?;
        seed_default_categories(&db).await?;
        let mut tx = transaction("t1", "5", TransactionType::Expense, "rent", date(2025, 5, 1));
        insert_transaction(&db, &tx).await?;

        tx.amount = dec("7.5");
        tx.category_id = "utilities".to_string();
        tx.description = Some("power".to_string());
        assert!(update_transaction(&db, &tx).await?);

        let rows = get_all_transactions(&db).await?;
        assert_eq!(rows[0].transaction, tx);
        assert_eq!(rows[0].category_name.as_deref(), Some("Utilities"));

        assert!(delete_transaction(&db, "t1").await?);
        assert!(!delete_transaction(&db, "t1").await?);
        let missing = transaction("nope", "1", TransactionType::Expense, "rent", date(2025, 5, 1));
        assert!(!update_transaction(&db, &missing).await?);
        assert!(get_all_transactions(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_row_without_timestamp_gets_midnight() -> Result<()> {
        let db = setup_test_db().await?;
        seed_default_categories(&db).await?;
        db.execute_unprepared(
            "INSERT INTO transactions (id, amount, category_id, date, type, created_at) \
             VALUES ('legacy', 3.5, 'rent', '2025-02-03', 'expense', NULL)",
        )
        .await?;

        let rows = get_all_transactions(&db).await?;
        assert_eq!(rows[0].transaction.created_at, noon(date(2025, 2, 3)) - Duration::hours(12));
        assert_eq!(rows[0].transaction.amount, dec("3.5"));
        Ok(())
    }
}
