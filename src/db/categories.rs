//! Category queries.
//!
//! Updates and deletes carry `is_default = 0` in their `WHERE` clause, so the
//! built-in categories are protected at the database level as well as in the store.

use crate::{
    core::category::default_categories,
    db::parse_type,
    entities::{Category as CategoryEntity, category},
    errors::Result,
    models::Category,
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument};

impl From<&Category> for category::ActiveModel {
    fn from(c: &Category) -> Self {
        Self {
            id: Set(c.id.clone()),
            name: Set(c.name.clone()),
            name_localized: Set(c.name_localized.clone()),
            category_type: Set(c.category_type.to_string()),
            color: Set(c.color.clone()),
            is_default: Set(c.is_default),
            created_at: Set(c.created_at),
        }
    }
}

impl TryFrom<category::Model> for Category {
    type Error = crate::errors::Error;

    fn try_from(row: category::Model) -> Result<Self> {
        Ok(Self {
            category_type: parse_type(&row.category_type)?,
            id: row.id,
            name: row.name,
            name_localized: row.name_localized,
            color: row.color,
            is_default: row.is_default,
            created_at: row.created_at,
        })
    }
}

/// Inserts a category row.
///
/// # Errors
/// [`Error::ConstraintViolation`](crate::errors::Error::ConstraintViolation) if the id already exists
pub async fn insert_category<C: ConnectionTrait>(db: &C, category: &Category) -> Result<()> {
    category::ActiveModel::from(category).insert(db).await?;
    Ok(())
}

/// Retrieves all categories, defaults first and then alphabetically by name.
pub async fn get_all_categories<C: ConnectionTrait>(db: &C) -> Result<Vec<Category>> {
    CategoryEntity::find()
        .order_by_desc(category::Column::IsDefault)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(Category::try_from)
        .collect()
}

/// Overwrites name, localized name, type and color of a user category.
///
/// # Returns
/// * `Ok(true)` - The row was updated
/// * `Ok(false)` - No such id, or the category is a default one
#[instrument(skip(db, category), fields(id = %category.id))]
pub async fn update_category<C: ConnectionTrait>(db: &C, category: &Category) -> Result<bool> {
    let result = CategoryEntity::update_many()
        .col_expr(category::Column::Name, Expr::value(category.name.clone()))
        .col_expr(
            category::Column::NameLocalized,
            Expr::value(category.name_localized.clone()),
        )
        .col_expr(
            category::Column::CategoryType,
            Expr::value(category.category_type.to_string()),
        )
        .col_expr(category::Column::Color, Expr::value(category.color.clone()))
        .filter(category::Column::Id.eq(category.id.as_str()))
        .filter(category::Column::IsDefault.eq(false))
        .exec(db)
        .await?;

    debug!(rows = result.rows_affected, "Category update executed");
    Ok(result.rows_affected > 0)
}

/// Deletes a user category. Default categories are never deleted.
///
/// # Returns
/// * `Ok(true)` - The row was deleted
/// * `Ok(false)` - No such id, or the category is a default one
///
/// # Errors
/// [`Error::ConstraintViolation`](crate::errors::Error::ConstraintViolation) while transactions
/// still reference the category
#[instrument(skip(db))]
pub async fn delete_category<C: ConnectionTrait>(db: &C, id: &str) -> Result<bool> {
    let result = CategoryEntity::delete_many()
        .filter(category::Column::Id.eq(id))
        .filter(category::Column::IsDefault.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Inserts the built-in categories when the table is empty.
///
/// # Returns
/// Whether the defaults were inserted
#[instrument(skip(db))]
pub async fn seed_default_categories<C: ConnectionTrait>(db: &C) -> Result<bool> {
    if CategoryEntity::find().count(db).await? > 0 {
        debug!("Categories already present, skipping seed");
        return Ok(false);
    }

    let defaults = default_categories();
    for category in &defaults {
        insert_category(db, category).await?;
    }
    info!(count = defaults.len(), "Default categories seeded");
    Ok(true)
}
