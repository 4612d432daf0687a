//! Entity module - Contains all SeaORM entity definitions for the relational export.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

/// `categories` table
pub mod category;
/// `settings` key-value table
pub mod setting;
/// `transactions` table
pub mod transaction;

// Re-export specific types to avoid conflicts with the domain models
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
