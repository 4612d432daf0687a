//! Report generation business logic.
//!
//! This module provides the period filter, category breakdown, totals and the
//! composite dashboard and analytics reports. All functions are pure: they take
//! the transaction and category lists plus a reference date and return structured
//! data that the presentation layer formats.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        category::CategoryLookup,
        monthly::{MonthlyTrend, monthly_trend},
    },
    models::{Category, Transaction, TransactionType},
};

/// Maximum number of entries in a category breakdown.
pub const BREAKDOWN_LIMIT: usize = 8;
/// Number of transactions listed on the dashboard.
pub const RECENT_LIMIT: usize = 5;

/// Calendar window selectable on the analytics screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// Same month and year as the reference date
    #[default]
    ThisMonth,
    /// The month before the reference date, wrapping January to December
    LastMonth,
    /// Same year as the reference date
    ThisYear,
}

serde_plain::derive_display_from_serialize!(Period);
serde_plain::derive_fromstr_from_deserialize!(Period);

impl Period {
    /// Whether `date` falls inside this period relative to `today`.
    #[must_use]
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            Self::LastMonth => {
                let (year, month) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                date.year() == year && date.month() == month
            }
            Self::ThisYear => date.year() == today.year(),
        }
    }
}

/// Income, expense and net for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of income amounts
    pub income: Decimal,
    /// Sum of expense amounts
    pub expense: Decimal,
    /// Income minus expense
    pub net: Decimal,
}

/// Summed expenses for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    /// `None` for the shared bucket of transactions whose category no longer exists
    pub category_id: Option<String>,
    /// Category name, or "Unknown"
    pub name: String,
    /// Category color, or the neutral gray
    pub color: String,
    /// Total spent
    pub amount: Decimal,
}

/// Headline numbers and latest activity for the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary<'a> {
    /// Income dated in the current month
    pub monthly_income: Decimal,
    /// Expenses dated in the current month
    pub monthly_expenses: Decimal,
    /// `monthly_income - monthly_expenses`
    pub total_balance: Decimal,
    /// Newest transactions first, at most [`RECENT_LIMIT`]
    pub recent: Vec<&'a Transaction>,
}

/// Everything the analytics screen shows for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    /// Selected window
    pub period: Period,
    /// Totals for the selected window
    pub summary: Totals,
    /// Top spending categories in the selected window
    pub breakdown: Vec<CategorySpend>,
    /// Six-month series, independent of the selected window
    pub trend: MonthlyTrend,
}

/// Returns the transactions dated inside `period`, keeping input order.
///
/// # Arguments
/// * `transactions` - All transactions
/// * `period` - Window to keep
/// * `today` - Reference date the window is computed from
#[must_use]
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| period.contains(t.date, today))
        .collect()
}

/// Sums income and expense and computes the net.
#[must_use]
pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Income => totals.income += tx.amount,
            TransactionType::Expense => totals.expense += tx.amount,
        }
    }
    totals.net = totals.income - totals.expense;
    totals
}

/// Sums expenses per category and returns the largest ones.
///
/// Income is ignored. Transactions pointing at a missing category share a single
/// "Unknown" entry. The result is sorted by amount, largest first, with ties in
/// first-seen order, and cut to [`BREAKDOWN_LIMIT`] entries.
///
/// # Arguments
/// * `transactions` - Usually the output of [`filter_by_period`]
/// * `categories` - Used for names and colors
#[must_use]
pub fn category_breakdown<'a, I>(transactions: I, categories: &[Category]) -> Vec<CategorySpend>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let lookup = CategoryLookup::new(categories);
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();
    let mut entries: Vec<CategorySpend> = Vec::new();

    for tx in transactions
        .into_iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
    {
        let key = lookup.get(&tx.category_id).map(|c| c.id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            entries.push(CategorySpend {
                category_id: key.map(str::to_string),
                name: lookup.name(&tx.category_id).to_string(),
                color: lookup.color(&tx.category_id).to_string(),
                amount: Decimal::ZERO,
            });
            entries.len() - 1
        });
        entries[slot].amount += tx.amount;
    }

    entries.sort_by(|a, b| b.amount.cmp(&a.amount));
    entries.truncate(BREAKDOWN_LIMIT);
    entries
}

/// Cumulative net per day, oldest day first.
#[must_use]
pub fn running_balance(transactions: &[Transaction]) -> Vec<(NaiveDate, Decimal)> {
    let mut daily: Vec<(NaiveDate, Decimal)> = Vec::new();
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut balance = Decimal::ZERO;
    for tx in sorted {
        balance += tx.signed_amount();
        match daily.last_mut() {
            Some((day, value)) if *day == tx.date => *value = balance,
            _ => daily.push((tx.date, balance)),
        }
    }
    daily
}

/// Builds the home screen summary for the month containing `today`.
///
/// Recent transactions are ordered by date and then creation time, newest first,
/// so backdated entries do not crowd out current ones.
#[must_use]
pub fn dashboard_summary(transactions: &[Transaction], today: NaiveDate) -> DashboardSummary<'_> {
    let month = totals(filter_by_period(transactions, Period::ThisMonth, today));

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    recent.truncate(RECENT_LIMIT);

    DashboardSummary {
        monthly_income: month.income,
        monthly_expenses: month.expense,
        total_balance: month.net,
        recent,
    }
}

/// Totals for the transactions inside `period`.
#[must_use]
pub fn period_summary(transactions: &[Transaction], period: Period, today: NaiveDate) -> Totals {
    totals(filter_by_period(transactions, period, today))
}

/// Bundles the period summary, the breakdown for the period and the six-month trend.
#[must_use]
pub fn analytics_report(
    transactions: &[Transaction],
    categories: &[Category],
    period: Period,
    today: NaiveDate,
) -> AnalyticsReport {
    let in_period = filter_by_period(transactions, period, today);

    AnalyticsReport {
        period,
        summary: totals(in_period.iter().copied()),
        breakdown: category_breakdown(in_period, categories),
        trend: monthly_trend(transactions, today),
    }
}
