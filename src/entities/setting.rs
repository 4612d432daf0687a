//! Setting entity - Key-value pairs of the `settings` table.
//! Stores one row per user preference (`language`, `currency`, `theme`, `notifications`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Setting database model - stores key-value preference pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Preference name (e.g., `"currency"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Preference value stored as string
    pub value: String,
}

/// `Setting` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
