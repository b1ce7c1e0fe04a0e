//! Pure functions that derive totals, filtered and sorted lists, and
//! calendar-day groupings from a transaction snapshot.
//!
//! Every function here is total and deterministic over any snapshot the
//! store produces: no operation mutates its input, fails, or panics. The
//! dashboard recomputes everything from scratch on each snapshot, so the
//! only performance requirement is the O(n log n) sort.

use std::collections::HashMap;

use serde::Deserialize;
use time::{Date, UtcOffset};

use crate::{category::TransactionKind, transaction::Transaction};

/// Which transaction kinds the dashboard list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Show both kinds.
    #[default]
    All,
    /// Show only income.
    Income,
    /// Show only expenses.
    Expense,
}

impl TypeFilter {
    /// The filter as the lowercase string used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    /// Whether a transaction of `kind` passes this filter.
    pub fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionKind::Income,
            TypeFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// The key the dashboard list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first.
    #[default]
    Date,
    /// Largest magnitude first, regardless of kind.
    Amount,
}

impl SortBy {
    /// The sort key as the lowercase string used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Amount => "amount",
        }
    }
}

/// Sum the amounts of all transactions of `kind`.
///
/// An empty snapshot sums to `0.0`. Non-finite amounts count as zero, so
/// the result is always a finite number.
pub fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(Transaction::amount_or_zero)
        .sum()
}

/// The income total minus the expense total.
pub fn balance(transactions: &[Transaction]) -> f64 {
    total_by_kind(transactions, TransactionKind::Income)
        - total_by_kind(transactions, TransactionKind::Expense)
}

/// Keep only the transactions that pass `filter`, preserving order.
///
/// [TypeFilter::All] is an identity pass-through.
pub fn filter_by_kind(transactions: &[Transaction], filter: TypeFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction.kind))
        .cloned()
        .collect()
}

/// Sort transactions by `sort_by`, descending.
///
/// The sort is stable: transactions with equal keys keep their relative
/// snapshot order. The amount comparison goes through `partial_cmp` with an
/// `Equal` fallback so it stays total even if a non-finite amount slips
/// through.
pub fn sort_transactions(mut transactions: Vec<Transaction>, sort_by: SortBy) -> Vec<Transaction> {
    match sort_by {
        SortBy::Date => transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Amount => transactions.sort_by(|a, b| {
            b.amount_or_zero()
                .partial_cmp(&a.amount_or_zero())
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    transactions
}

/// One calendar day's worth of transactions in the dashboard list.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// The calendar day, in the grouping timezone.
    pub date: Date,
    /// A human label for the day, e.g. "Wednesday, 5 March 2025".
    pub label: String,
    /// The day's transactions, in input order.
    pub transactions: Vec<Transaction>,
}

/// Partition an already-sorted sequence into calendar-day buckets.
///
/// Bucket order follows the order of first occurrence in the input, not a
/// separate date sort, so an amount-sorted list produces buckets in the
/// order the days are first encountered. The partition is exact: every
/// transaction lands in exactly one bucket.
///
/// `offset` is the UTC offset of the timezone whose calendar the days are
/// taken from.
pub fn group_by_calendar_day(transactions: &[Transaction], offset: UtcOffset) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();
    let mut index_by_date: HashMap<Date, usize> = HashMap::new();

    for transaction in transactions {
        let date = transaction.created_at.to_offset(offset).date();

        let index = *index_by_date.entry(date).or_insert_with(|| {
            days.push(DayGroup {
                date,
                label: format_day_label(date),
                transactions: Vec::new(),
            });
            days.len() - 1
        });

        days[index].transactions.push(transaction.clone());
    }

    days
}

fn format_day_label(date: Date) -> String {
    format!(
        "{}, {} {} {}",
        date.weekday(),
        date.day(),
        date.month(),
        date.year()
    )
}
