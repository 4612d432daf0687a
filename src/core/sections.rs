//! Day sections for the transaction list.
//!
//! Transactions are bucketed by calendar day. The buckets for today and yesterday
//! carry literal titles and always come first; every other bucket is titled with
//! a locale date string and the list runs newest day first.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Language, Transaction};

/// Title of the bucket for the reference day.
pub const TODAY_TITLE: &str = "Today";
/// Title of the bucket for the day before the reference day.
pub const YESTERDAY_TITLE: &str = "Yesterday";

/// One day of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySection<'a> {
    /// Calendar day shared by every entry
    pub date: NaiveDate,
    /// "Today", "Yesterday" or a locale date string
    pub title: String,
    /// Net of the day: income minus expenses
    pub total: Decimal,
    /// Newest `created_at` first
    pub transactions: Vec<&'a Transaction>,
}

/// Formats a date the way the interface language writes it.
///
/// English uses `M/D/YYYY`, Turkish uses `DD.MM.YYYY`.
#[must_use]
pub fn locale_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => date.format("%-m/%-d/%Y").to_string(),
        Language::Tr => date.format("%d.%m.%Y").to_string(),
    }
}

/// Groups transactions into titled day sections.
///
/// # Arguments
/// * `transactions` - Any order
/// * `today` - Reference day for the "Today" and "Yesterday" titles
/// * `language` - Controls the date format of the other titles
///
/// # Returns
/// Sections ordered Today, Yesterday, then remaining days newest first
#[must_use]
pub fn group_into_sections<'a>(
    transactions: &'a [Transaction],
    today: NaiveDate,
    language: Language,
) -> Vec<DaySection<'a>> {
    let yesterday = today.checked_sub_days(Days::new(1));

    let mut by_day: BTreeMap<NaiveDate, Vec<&'a Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_day.entry(tx.date).or_default().push(tx);
    }

    let mut sections: Vec<DaySection<'a>> = by_day
        .into_iter()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let title = if date == today {
                TODAY_TITLE.to_string()
            } else if Some(date) == yesterday {
                YESTERDAY_TITLE.to_string()
            } else {
                locale_date(date, language)
            };
            DaySection {
                date,
                title,
                total: entries.iter().map(|t| t.signed_amount()).sum(),
                transactions: entries,
            }
        })
        .collect();

    let rank = |date: NaiveDate| {
        if date == today {
            0
        } else if Some(date) == yesterday {
            1
        } else {
            2
        }
    };
    sections.sort_by(|a, b| {
        rank(a.date)
            .cmp(&rank(b.date))
            .then_with(|| b.date.cmp(&a.date))
    });
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::test_utils::*;
    use chrono::Duration;

    #[test]
    fn test_today_then_yesterday_then_descending() {
        let today = date(2025, 6, 10);
        let transactions = vec![
            transaction("old", "1", TransactionType::Expense, "rent", date(2025, 6, 1)),
            transaction("y", "2", TransactionType::Expense, "rent", date(2025, 6, 9)),
            transaction("t", "3", TransactionType::Expense, "rent", today),
            transaction("future", "4", TransactionType::Expense, "rent", date(2025, 6, 20)),
            transaction("mid", "5", TransactionType::Expense, "rent", date(2025, 6, 5)),
        ];

        let sections = group_into_sections(&transactions, today, Language::En);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["Today", "Yesterday", "6/20/2025", "6/5/2025", "6/1/2025"]
        );
    }

    #[test]
    fn test_section_total_and_entry_order() {
        let today = date(2025, 6, 10);
        let morning = noon(today) - Duration::hours(3);
        let transactions = vec![
            transaction_created_at("inc", "50", TransactionType::Income, "salary", today, morning),
            transaction("exp", "20", TransactionType::Expense, "groceries", today),
        ];

        let sections = group_into_sections(&transactions, today, Language::En);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, TODAY_TITLE);
        assert_eq!(sections[0].total, dec("30"));
        let ids: Vec<&str> = sections[0].transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["exp", "inc"]);
    }

    #[test]
    fn test_turkish_titles() {
        let transactions = vec![transaction(
            "a",
            "1",
            TransactionType::Expense,
            "rent",
            date(2025, 3, 4),
        )];
        let sections = group_into_sections(&transactions, date(2025, 6, 10), Language::Tr);
        assert_eq!(sections[0].title, "04.03.2025");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_into_sections(&[], date(2025, 6, 10), Language::En).is_empty());
    }
}
