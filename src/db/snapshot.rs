//! Whole-state export and import.

use crate::{
    db::{
        categories::{get_all_categories, insert_category},
        settings::{load_settings, save_settings},
        transactions::{get_all_transactions, insert_transaction},
    },
    entities::{Category, Setting, Transaction},
    errors::Result,
    persistence::{BLOB_VERSION, PersistedState},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::{info, instrument, warn};

/// Replaces the contents of all three tables with `snapshot`.
///
/// Runs inside a single database transaction: either the whole snapshot is
/// written or the previous contents are left untouched.
///
/// # Errors
/// [`Error::ConstraintViolation`](crate::errors::Error::ConstraintViolation) if a transaction
/// references a category that is not part of the snapshot
#[instrument(skip(db, snapshot), fields(
    transactions = snapshot.transactions.len(),
    categories = snapshot.categories.len()
))]
pub async fn export_state(db: &DatabaseConnection, snapshot: &PersistedState) -> Result<()> {
    let txn = db.begin().await?;
    match write_snapshot(&txn, snapshot).await {
        Ok(()) => {
            txn.commit().await?;
            info!("State exported to database");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Export failed, rolling back");
            txn.rollback().await?;
            Err(e)
        }
    }
}

async fn write_snapshot<C: ConnectionTrait>(db: &C, snapshot: &PersistedState) -> Result<()> {
    Transaction::delete_many().exec(db).await?;
    Category::delete_many().exec(db).await?;
    Setting::delete_many().exec(db).await?;

    for category in &snapshot.categories {
        insert_category(db, category).await?;
    }
    for tx in &snapshot.transactions {
        insert_transaction(db, tx).await?;
    }
    save_settings(db, &snapshot.settings).await
}

/// Reads the tables back into a snapshot.
///
/// Transactions come back newest first and categories defaults first, the order
/// the queries return them in.
#[instrument(skip(db))]
pub async fn import_state(db: &DatabaseConnection) -> Result<PersistedState> {
    let categories = get_all_categories(db).await?;
    let transactions = get_all_transactions(db)
        .await?
        .into_iter()
        .map(|row| row.transaction)
        .collect();
    let settings = load_settings(db).await?;

    Ok(PersistedState {
        version: BLOB_VERSION,
        transactions,
        categories,
        settings,
    })
}
