//! Category entity - Rows of the `categories` table.
//!
//! `category_type` maps to the `type` column and holds `"income"` or `"expense"`.
//! Default categories carry `is_default = 1` and are protected by the queries in
//! [`crate::db::categories`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Readable id for defaults (`"salary"`), generated for user categories
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Turkish display name
    pub name_localized: Option<String>,
    /// `"income"` or `"expense"`
    #[sea_orm(column_name = "type")]
    pub category_type: String,
    /// Hex color, e.g. `"#4CAF50"`
    pub color: String,
    /// Built-in categories cannot be edited or deleted
    pub is_default: bool,
    /// Creation time, absent for built-in categories
    pub created_at: Option<DateTimeUtc>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
