//! Monthly trend business logic
//!
//! Builds the six-month income/expense series shown on the analytics screen.
//! Months without activity are present with zero totals so the series always has
//! the same length.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionType};

/// Number of months in the trend, current month included.
pub const TREND_MONTHS: u32 = 6;

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPoint {
    /// Calendar year
    pub year: i32,
    /// Calendar month (1-12)
    pub month: u32,
    /// Short month name, e.g. `"Jan"`
    pub label: String,
    /// Sum of income amounts in the month
    pub income: Decimal,
    /// Sum of expense amounts in the month
    pub expense: Decimal,
}

/// Chronological monthly series ending at the current month.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthlyTrend {
    /// Oldest month first
    pub points: Vec<MonthlyPoint>,
}

impl MonthlyTrend {
    /// Month labels in chart order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Income series parallel to [`labels`](Self::labels).
    #[must_use]
    pub fn income(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.income).collect()
    }

    /// Expense series parallel to [`labels`](Self::labels).
    #[must_use]
    pub fn expense(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.expense).collect()
    }
}

/// Computes income and expense totals for the current month and the five before it.
///
/// # Arguments
/// * `transactions` - All transactions, any order
/// * `today` - Reference date; its month is the last point of the series
///
/// # Returns
/// Exactly [`TREND_MONTHS`] points, oldest first, zero-filled
#[must_use]
pub fn monthly_trend(transactions: &[Transaction], today: NaiveDate) -> MonthlyTrend {
    let current = first_of_month(today);

    let points = (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|start| {
            let mut point = MonthlyPoint {
                year: start.year(),
                month: start.month(),
                label: start.format("%b").to_string(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            };
            for tx in transactions
                .iter()
                .filter(|t| t.date.year() == point.year && t.date.month() == point.month)
            {
                match tx.transaction_type {
                    TransactionType::Income => point.income += tx.amount,
                    TransactionType::Expense => point.expense += tx.amount,
                }
            }
            point
        })
        .collect();

    MonthlyTrend { points }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_trend_has_six_points_with_zero_months() {
        let transactions = vec![
            transaction("a", "100", TransactionType::Income, "salary", date(2025, 3, 5)),
            transaction("b", "40", TransactionType::Expense, "rent", date(2025, 3, 9)),
            transaction("c", "7", TransactionType::Expense, "rent", date(2024, 12, 31)),
        ];

        let trend = monthly_trend(&transactions, date(2025, 3, 15));

        assert_eq!(trend.points.len(), 6);
        assert_eq!(trend.labels(), vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert_eq!(
            trend.income(),
            vec![Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, dec("100")]
        );
        assert_eq!(trend.points[2].expense, dec("7"));
        assert_eq!(trend.points[2].year, 2024);
        assert_eq!(trend.points[5].expense, dec("40"));
    }

    #[test]
    fn test_trend_ignores_older_and_future_months() {
        let transactions = vec![
            transaction("a", "1", TransactionType::Expense, "rent", date(2024, 9, 30)),
            transaction("b", "2", TransactionType::Expense, "rent", date(2025, 4, 1)),
            transaction("c", "3", TransactionType::Expense, "rent", date(2024, 3, 10)),
        ];

        let trend = monthly_trend(&transactions, date(2025, 3, 31));

        assert!(trend.expense().iter().all(|e| e.is_zero()));
    }

    #[test]
    fn test_trend_with_no_transactions() {
        let trend = monthly_trend(&[], date(2025, 1, 20));
        assert_eq!(trend.points.len(), 6);
        assert_eq!(trend.points[0].month, 8);
        assert_eq!(trend.points[5].month, 1);
    }
}
