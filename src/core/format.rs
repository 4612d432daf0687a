//! Display formatting for amounts and transaction rows.
//!
//! Everything here returns plain strings; the presentation layer decides colors
//! and layout.

use crate::{
    core::category::CategoryLookup,
    models::{Currency, Language, Transaction, TransactionType},
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Label used when a transaction row references a category that no longer exists.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown Category";

/// Formats an amount with the currency symbol, two decimals and grouped thousands.
///
/// English output uses `,` for thousands and `.` for decimals; Turkish swaps them.
/// Negative amounts are prefixed with `-` before the symbol.
///
/// # Arguments
/// * `amount` - Value to format, may be negative
/// * `currency` - Determines the symbol
/// * `language` - Determines the separators
///
/// # Returns
/// Formatted string like `"$1,234.50"`, `"-$20.00"` or `"₺1.234,50"`
#[must_use]
pub fn format_currency(amount: Decimal, currency: Currency, language: Language) -> String {
    // Halves round away from zero: 0.125 shows as 0.13
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let (group_sep, decimal_sep) = match language {
        Language::En => (',', '.'),
        Language::Tr => ('.', ','),
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let grouped = group_thousands(whole, group_sep);

    format!("{sign}{}{grouped}{decimal_sep}{fraction}", currency.symbol())
}

/// Inserts `separator` between every group of three digits, counting from the right.
fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a transaction magnitude with an explicit direction sign.
///
/// # Returns
/// `"+$50.00"` for income, `"-$20.00"` for expenses
#[must_use]
pub fn format_signed_amount(transaction: &Transaction, currency: Currency, language: Language) -> String {
    let sign = match transaction.transaction_type {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    let magnitude = format_currency(transaction.amount.abs(), currency, language);
    format!("{sign}{magnitude}")
}

/// Primary text of a transaction row: the description, else the category name,
/// else `"Unknown"`.
#[must_use]
pub fn row_title<'a>(transaction: &'a Transaction, lookup: &CategoryLookup<'a>) -> &'a str {
    transaction
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| lookup.name(&transaction.category_id))
}

/// Category text of a transaction row in the interface language.
#[must_use]
pub fn row_category<'a>(
    transaction: &Transaction,
    lookup: &CategoryLookup<'a>,
    language: Language,
) -> &'a str {
    lookup
        .get(&transaction.category_id)
        .map_or(UNKNOWN_CATEGORY_LABEL, |c| c.display_name(language))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::default_categories;
    use crate::test_utils::*;

    #[test]
    fn test_format_currency_english() {
        assert_eq!(
            format_currency(dec("1234.5"), Currency::Usd, Language::En),
            "$1,234.50"
        );
        assert_eq!(format_currency(dec("0"), Currency::Eur, Language::En), "€0.00");
        assert_eq!(
            format_currency(dec("-1234.5"), Currency::Usd, Language::En),
            "-$1,234.50"
        );
    }

    #[test]
    fn test_format_currency_turkish_swaps_separators() {
        assert_eq!(
            format_currency(dec("1234567.891"), Currency::Try, Language::Tr),
            "₺1.234.567,89"
        );
    }

    #[test]
    fn test_format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("0.125"), Currency::Usd, Language::En), "$0.13");
        assert_eq!(format_currency(dec("2.345"), Currency::Usd, Language::En), "$2.35");
        assert_eq!(format_currency(dec("-2.345"), Currency::Usd, Language::En), "-$2.35");
        assert_eq!(format_currency(dec("2.344"), Currency::Usd, Language::En), "$2.34");
    }

    #[test]
    fn test_format_currency_keeps_cents_of_large_amounts() {
        assert_eq!(
            format_currency(dec("10000000000000000.50"), Currency::Usd, Language::En),
            "$10,000,000,000,000,000.50"
        );
        assert_eq!(format_currency(dec("999.999"), Currency::Eur, Language::Tr), "€1.000,00");
        assert_eq!(format_currency(dec("100"), Currency::Usd, Language::En), "$100.00");
    }

    #[test]
    fn test_format_currency_tiny_negative_has_no_sign() {
        assert_eq!(
            format_currency(dec("-0.001"), Currency::Usd, Language::En),
            "$0.00"
        );
    }

    #[test]
    fn test_signed_amount_follows_type() {
        let income = transaction("a", "50", TransactionType::Income, "salary", date(2025, 1, 1));
        let expense = transaction("b", "20", TransactionType::Expense, "rent", date(2025, 1, 1));

        assert_eq!(format_signed_amount(&income, Currency::Usd, Language::En), "+$50.00");
        assert_eq!(format_signed_amount(&expense, Currency::Usd, Language::En), "-$20.00");
    }

    #[test]
    fn test_row_labels_fall_back() {
        let categories = default_categories();
        let lookup = CategoryLookup::new(&categories);

        let mut tx = transaction("a", "5", TransactionType::Expense, "rent", date(2025, 1, 1));
        assert_eq!(row_title(&tx, &lookup), "Rent");
        assert_eq!(row_category(&tx, &lookup, Language::Tr), "Kira");

        tx.description = Some("June rent".to_string());
        assert_eq!(row_title(&tx, &lookup), "June rent");

        tx.description = None;
        tx.category_id = "gone".to_string();
        assert_eq!(row_title(&tx, &lookup), "Unknown");
        assert_eq!(row_category(&tx, &lookup, Language::En), UNKNOWN_CATEGORY_LABEL);
    }
}
