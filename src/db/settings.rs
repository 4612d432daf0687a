//! Key-value preference queries.
//!
//! Each [`Settings`] field is one row: `language`, `currency`, `theme` and
//! `notifications`, with values in their plain string form (`"tr"`, `"EUR"`,
//! `"dark"`, `"true"`).

use std::str::FromStr;

use crate::{
    entities::{Setting, setting},
    errors::{Error, Result},
    models::{Currency, Language, Settings, Theme},
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, instrument};

/// Row key of [`Settings::language`]
pub const LANGUAGE_KEY: &str = "language";
/// Row key of [`Settings::currency`]
pub const CURRENCY_KEY: &str = "currency";
/// Row key of [`Settings::theme`]
pub const THEME_KEY: &str = "theme";
/// Row key of [`Settings::notifications`]
pub const NOTIFICATIONS_KEY: &str = "notifications";

/// Retrieves a value from the `settings` table.
///
/// # Returns
/// * `Ok(Some(value))` - The key exists
/// * `Ok(None)` - The key has never been set
#[instrument(skip(db))]
pub async fn get_setting<C: ConnectionTrait>(db: &C, key: &str) -> Result<Option<String>> {
    let value = Setting::find()
        .filter(setting::Column::Key.eq(key))
        .one(db)
        .await?
        .map(|row| row.value);
    debug!(?value, "Setting read");
    Ok(value)
}

/// Sets or updates a value in the `settings` table (UPSERT on `key`).
#[instrument(skip(db))]
pub async fn set_setting<C: ConnectionTrait>(db: &C, key: &str, value: &str) -> Result<()> {
    let row = setting::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        ..Default::default()
    };
    Setting::insert(row)
        .on_conflict(
            OnConflict::column(setting::Column::Key)
                .update_column(setting::Column::Value)
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Writes every settings field.
pub async fn save_settings<C: ConnectionTrait>(db: &C, settings: &Settings) -> Result<()> {
    set_setting(db, LANGUAGE_KEY, &settings.language.to_string()).await?;
    set_setting(db, CURRENCY_KEY, &settings.currency.to_string()).await?;
    set_setting(db, THEME_KEY, &settings.theme.to_string()).await?;
    set_setting(db, NOTIFICATIONS_KEY, &settings.notifications.to_string()).await?;
    Ok(())
}

async fn load_value<C, T>(db: &C, key: &'static str, default: T) -> Result<T>
where
    C: ConnectionTrait,
    T: FromStr,
{
    match get_setting(db, key).await? {
        Some(raw) => T::from_str(&raw).map_err(|_| Error::UnknownValue { kind: key, value: raw }),
        None => Ok(default),
    }
}

/// Reads every settings field. Keys that were never written keep their default.
///
/// # Errors
/// [`Error::UnknownValue`] if a stored value is not recognized
pub async fn load_settings<C: ConnectionTrait>(db: &C) -> Result<Settings> {
    let defaults = Settings::default();
    Ok(Settings {
        language: load_value::<_, Language>(db, LANGUAGE_KEY, defaults.language).await?,
        currency: load_value::<_, Currency>(db, CURRENCY_KEY, defaults.currency).await?,
        theme: load_value::<_, Theme>(db, THEME_KEY, defaults.theme).await?,
        notifications: load_value::<_, bool>(db, NOTIFICATIONS_KEY, defaults.notifications).await?,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_set_setting_upserts() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(get_setting(&db, "currency").await?, None);

        set_setting(&db, "currency", "USD").await?;
        set_setting(&db, "currency", "EUR").await?;

        assert_eq!(get_setting(&db, "currency").await?.as_deref(), Some("EUR"));
        assert_eq!(Setting::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_round_trip_and_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(load_settings(&db).await?, Settings::default());

        let settings = Settings {
            language: Language::Tr,
            currency: Currency::Try,
            theme: Theme::Dark,
            notifications: false,
        };
        save_settings(&db, &settings).await?;

        assert_eq!(get_setting(&db, THEME_KEY).await?.as_deref(), Some("dark"));
        assert_eq!(load_settings(&db).await?, settings);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_value_is_reported() -> Result<()> {
        let db = setup_test_db().await?;
        set_setting(&db, CURRENCY_KEY, "GBP").await?;

        let err = load_settings(&db).await.unwrap_err();
        assert!(matches!(err, Error::UnknownValue { kind: "currency", .. }));
        Ok(())
    }
}
