//! Domain records shared by the store, the aggregation engine and both persistence formats.
//!
//! Field names serialize in camelCase (`categoryId`, `createdAt`, `isDefault`).
//! This is the crate's own blob format; it is not read or written by other clients.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow. Shared by transactions and categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Generated at creation, never changes
    pub id: String,
    /// Positive magnitude; the sign is implied by `transaction_type`
    pub amount: Decimal,
    /// Income or expense
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Not enforced; lookups fall back to an "Unknown" placeholder
    pub category_id: String,
    /// Free text note
    #[serde(default)]
    pub description: Option<String>,
    /// User-entered calendar date
    pub date: NaiveDate,
    /// Insertion timestamp, only used to order entries within a day
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount with the sign implied by the transaction type applied.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Validated payload for creating a transaction. Built by
/// [`TransactionDraft::validate`](crate::core::transaction::TransactionDraft::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Strictly positive magnitude
    pub amount: Decimal,
    /// Income or expense
    pub transaction_type: TransactionType,
    /// Category the transaction is filed under
    pub category_id: String,
    /// Trimmed, `None` when left blank
    pub description: Option<String>,
    /// Calendar date the money moved
    pub date: NaiveDate,
}

/// Partial update for a transaction. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// New magnitude; ignored unless strictly positive
    pub amount: Option<Decimal>,
    /// New direction
    pub transaction_type: Option<TransactionType>,
    /// New category reference
    pub category_id: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    /// New calendar date
    pub date: Option<NaiveDate>,
}

/// Grouping label for transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Readable for defaults (`"salary"`), generated for user categories
    pub id: String,
    /// Name shown in English and as the fallback
    pub name: String,
    /// Name shown when the interface language is Turkish
    #[serde(default)]
    pub name_localized: Option<String>,
    /// Display hint, e.g. `#4CAF50`
    pub color: String,
    /// Which transactions may use the category
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// Default categories can be neither edited nor deleted
    #[serde(default)]
    pub is_default: bool,
    /// Set for user categories, absent on the seeded defaults
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Name to display for the given interface language.
    #[must_use]
    pub fn display_name(&self, language: Language) -> &str {
        match (language, self.name_localized.as_deref()) {
            (Language::Tr, Some(localized)) if !localized.is_empty() => localized,
            _ => &self.name,
        }
    }
}

/// Validated payload for creating a user category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Trimmed display name
    pub name: String,
    /// Optional Turkish name
    pub name_localized: Option<String>,
    /// Display hint, e.g. `#4CAF50`
    pub color: String,
    /// Income or expense
    pub category_type: TransactionType,
}

/// Partial update for a user category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// New display name
    pub name: Option<String>,
    /// `Some(None)` clears the Turkish name
    pub name_localized: Option<Option<String>>,
    /// New color
    pub color: Option<String>,
    /// New direction
    pub category_type: Option<TransactionType>,
}

/// Interface language. Picks names, section titles and number separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Turkish
    Tr,
}

serde_plain::derive_display_from_serialize!(Language);
serde_plain::derive_fromstr_from_deserialize!(Language);

/// Display currency. Amounts are never converted, only labeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// Turkish lira
    Try,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    /// Symbol placed in front of formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Try => "₺",
        }
    }
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

serde_plain::derive_display_from_serialize!(Theme);
serde_plain::derive_fromstr_from_deserialize!(Theme);

/// User preferences. A singleton replaced field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Interface language
    pub language: Language,
    /// Symbol shown on amounts
    pub currency: Currency,
    /// Color scheme
    pub theme: Theme,
    /// Whether reminders are enabled
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            currency: Currency::Usd,
            theme: Theme::Light,
            notifications: true,
        }
    }
}

/// Several settings fields at once; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    /// New interface language
    pub language: Option<Language>,
    /// New display currency
    pub currency: Option<Currency>,
    /// New color scheme
    pub theme: Option<Theme>,
    /// New reminder setting
    pub notifications: Option<bool>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_enum_string_forms() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(Currency::Try.to_string(), "TRY");
        assert_eq!(Language::from_str("tr").unwrap(), Language::Tr);
        assert_eq!(Theme::from_str("dark").unwrap(), Theme::Dark);
        assert!(Currency::from_str("GBP").is_err());
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction {
            id: "1".to_string(),
            amount: Decimal::new(1250, 2),
            transaction_type: TransactionType::Expense,
            category_id: "groceries".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            created_at: DateTime::parse_from_rfc3339("2025-03-04T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["categoryId"], "groceries");
        assert_eq!(value["date"], "2025-03-04");
        assert_eq!(tx.signed_amount(), Decimal::new(-1250, 2));
    }

    #[test]
    fn test_display_name_prefers_localized_for_turkish() {
        let category = Category {
            id: "rent".to_string(),
            name: "Rent".to_string(),
            name_localized: Some("Kira".to_string()),
            color: "#F44336".to_string(),
            category_type: TransactionType::Expense,
            is_default: true,
            created_at: None,
        };
        assert_eq!(category.display_name(Language::En), "Rent");
        assert_eq!(category.display_name(Language::Tr), "Kira");
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency":"EUR"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.language, Language::En);
        assert!(settings.notifications);
    }
}
