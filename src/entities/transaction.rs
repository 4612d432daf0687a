//! Transaction entity - Rows of the `transactions` table.
//!
//! Amounts are stored as `REAL` magnitudes; the sign is implied by `transaction_type`
//! (`type` column). `category_id` is a foreign key to `categories`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Positive amount
    pub amount: f64,
    /// Optional free-text note
    pub description: Option<String>,
    /// ID of the category this transaction belongs to
    pub category_id: String,
    /// Calendar date of the transaction (`YYYY-MM-DD`)
    pub date: Date,
    /// `"income"` or `"expense"`
    #[sea_orm(column_name = "type")]
    pub transaction_type: String,
    /// When the transaction was recorded
    pub created_at: Option<DateTimeUtc>,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
