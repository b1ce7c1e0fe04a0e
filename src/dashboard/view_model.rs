//! Assembles the render-ready dashboard structure from a snapshot and the
//! user's current filter and sort selection.
//!
//! Each change to either input rebuilds the whole structure; nothing is
//! patched incrementally, since snapshots always arrive in full and the
//! derivation is cheap.

use serde::Deserialize;
use time::UtcOffset;

use crate::{
    aggregation::{
        DayGroup, SortBy, TypeFilter, balance, filter_by_kind, group_by_calendar_day,
        sort_transactions, total_by_kind,
    },
    category::TransactionKind,
    transaction::Transaction,
};

/// The user's current filter and sort selection.
///
/// Carried in the dashboard URL's query string, so it is UI-local state
/// that resets to the defaults on a plain page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ViewState {
    /// Which transaction kinds the list shows.
    #[serde(default)]
    pub filter: TypeFilter,
    /// The key the list is sorted by.
    #[serde(default)]
    pub sort: SortBy,
}

/// The dashboard's headline figures and counts.
///
/// The money totals cover the whole snapshot; the `filtered_*` fields are
/// restricted to the records that pass the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Sum of all income amounts in the snapshot.
    pub income_total: f64,
    /// Sum of all expense amounts in the snapshot.
    pub expense_total: f64,
    /// Income total minus expense total.
    pub balance: f64,
    /// How many transactions the snapshot holds.
    pub total_count: usize,
    /// How many transactions pass the current filter.
    pub filtered_count: usize,
    /// How many income transactions the snapshot holds.
    pub income_count: usize,
    /// How many expense transactions the snapshot holds.
    pub expense_count: usize,
    /// Income total over the filtered set.
    pub filtered_income_total: f64,
    /// Expense total over the filtered set.
    pub filtered_expense_total: f64,
}

/// The fully derived, render-ready dashboard structure.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    /// The selection the structure was derived with.
    pub view: ViewState,
    /// Headline figures and counts.
    pub summary: Summary,
    /// The filtered, sorted list partitioned into calendar days.
    pub groups: Vec<DayGroup>,
}

impl DashboardViewModel {
    /// Derive the dashboard structure from `snapshot` under `view`.
    ///
    /// The list pipeline runs filter, then sort, then group, in that fixed
    /// order. Filtering after grouping would leave empty day buckets in the
    /// output, so the order is part of the contract, not an implementation
    /// detail.
    ///
    /// `offset` is the UTC offset used to decide which calendar day each
    /// transaction belongs to.
    pub fn build(snapshot: &[Transaction], view: ViewState, offset: UtcOffset) -> Self {
        let filtered = filter_by_kind(snapshot, view.filter);
        let sorted = sort_transactions(filtered, view.sort);
        let groups = group_by_calendar_day(&sorted, offset);

        let summary = Summary {
            income_total: total_by_kind(snapshot, TransactionKind::Income),
            expense_total: total_by_kind(snapshot, TransactionKind::Expense),
            balance: balance(snapshot),
            total_count: snapshot.len(),
            filtered_count: sorted.len(),
            income_count: snapshot
                .iter()
                .filter(|t| t.kind == TransactionKind::Income)
                .count(),
            expense_count: snapshot
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense)
                .count(),
            filtered_income_total: total_by_kind(&sorted, TransactionKind::Income),
            filtered_expense_total: total_by_kind(&sorted, TransactionKind::Expense),
        };

        Self {
            view,
            summary,
            groups,
        }
    }
}

#[cfg(test)]
mod view_model_tests {
    use time::{UtcOffset, macros::datetime};

    use crate::{
        aggregation::{SortBy, TypeFilter},
        category::TransactionKind,
        transaction::{Transaction, test_builder},
    };

    use super::{DashboardViewModel, ViewState};

    fn income(id: i64, amount: f64, created_at: time::OffsetDateTime) -> Transaction {
        test_builder(id, amount, TransactionKind::Income, created_at)
    }

    fn expense(id: i64, amount: f64, created_at: time::OffsetDateTime) -> Transaction {
        test_builder(id, amount, TransactionKind::Expense, created_at)
    }

    #[test]
    fn end_to_end_totals_match_the_snapshot() {
        let snapshot = vec![
            income(1, 100.0, datetime!(2025-10-01 09:00 UTC)),
            expense(2, 40.0, datetime!(2025-10-01 10:00 UTC)),
        ];

        let view_model =
            DashboardViewModel::build(&snapshot, ViewState::default(), UtcOffset::UTC);

        assert_eq!(view_model.summary.income_total, 100.0);
        assert_eq!(view_model.summary.expense_total, 40.0);
        assert_eq!(view_model.summary.balance, 60.0);
        assert_eq!(view_model.summary.total_count, 2);
        assert_eq!(view_model.summary.filtered_count, 2);
    }

    #[test]
    fn filter_runs_before_grouping() {
        // One income and one expense on the same day: filtering to income
        // must yield a single bucket containing only the income record, not
        // an empty expense bucket.
        let snapshot = vec![
            income(1, 100.0, datetime!(2025-10-01 09:00 UTC)),
            expense(2, 40.0, datetime!(2025-10-01 10:00 UTC)),
        ];

        let view = ViewState {
            filter: TypeFilter::Income,
            sort: SortBy::Date,
        };
        let view_model = DashboardViewModel::build(&snapshot, view, UtcOffset::UTC);

        assert_eq!(view_model.groups.len(), 1);
        assert_eq!(view_model.groups[0].transactions.len(), 1);
        assert_eq!(view_model.groups[0].transactions[0].id, 1);
        assert!(
            view_model
                .groups
                .iter()
                .all(|group| !group.transactions.is_empty()),
            "no group may be empty"
        );
    }

    #[test]
    fn grand_totals_ignore_the_filter_but_filtered_totals_do_not() {
        let snapshot = vec![
            income(1, 100.0, datetime!(2025-10-01 09:00 UTC)),
            expense(2, 40.0, datetime!(2025-10-01 10:00 UTC)),
        ];

        let view = ViewState {
            filter: TypeFilter::Expense,
            sort: SortBy::Date,
        };
        let view_model = DashboardViewModel::build(&snapshot, view, UtcOffset::UTC);

        // The cards keep showing the whole snapshot.
        assert_eq!(view_model.summary.income_total, 100.0);
        assert_eq!(view_model.summary.expense_total, 40.0);

        // The filtered figures cover only what the list shows.
        assert_eq!(view_model.summary.filtered_count, 1);
        assert_eq!(view_model.summary.filtered_income_total, 0.0);
        assert_eq!(view_model.summary.filtered_expense_total, 40.0);
    }

    #[test]
    fn per_kind_counts_cover_the_snapshot() {
        let snapshot = vec![
            income(1, 10.0, datetime!(2025-10-01 09:00 UTC)),
            income(2, 20.0, datetime!(2025-10-01 10:00 UTC)),
            expense(3, 30.0, datetime!(2025-10-01 11:00 UTC)),
        ];

        let view_model =
            DashboardViewModel::build(&snapshot, ViewState::default(), UtcOffset::UTC);

        assert_eq!(view_model.summary.income_count, 2);
        assert_eq!(view_model.summary.expense_count, 1);
    }

    #[test]
    fn sorting_by_amount_still_groups_by_first_occurrence() {
        let snapshot = vec![
            income(1, 10.0, datetime!(2025-10-01 09:00 UTC)),
            income(2, 90.0, datetime!(2025-10-02 09:00 UTC)),
            income(3, 50.0, datetime!(2025-10-01 15:00 UTC)),
        ];

        let view = ViewState {
            filter: TypeFilter::All,
            sort: SortBy::Amount,
        };
        let view_model = DashboardViewModel::build(&snapshot, view, UtcOffset::UTC);

        // Amount order: 2 (90, day 2), 3 (50, day 1), 1 (10, day 1).
        assert_eq!(view_model.groups.len(), 2);
        assert_eq!(view_model.groups[0].date, time::macros::date!(2025 - 10 - 02));
        assert_eq!(
            view_model.groups[1]
                .transactions
                .iter()
                .map(|t| t.id)
                .collect::<Vec<_>>(),
            vec![3, 1]
        );
    }

    #[test]
    fn rebuilding_with_identical_inputs_is_deterministic() {
        let snapshot = vec![
            income(1, 100.0, datetime!(2025-10-01 09:00 UTC)),
            expense(2, 40.0, datetime!(2025-10-02 10:00 UTC)),
        ];
        let view = ViewState::default();

        let first = DashboardViewModel::build(&snapshot, view, UtcOffset::UTC);
        let second = DashboardViewModel::build(&snapshot, view, UtcOffset::UTC);

        assert_eq!(first, second);
    }

    #[test]
    fn empty_snapshot_builds_an_empty_view_model() {
        let view_model = DashboardViewModel::build(&[], ViewState::default(), UtcOffset::UTC);

        assert_eq!(view_model.summary.income_total, 0.0);
        assert_eq!(view_model.summary.expense_total, 0.0);
        assert_eq!(view_model.summary.balance, 0.0);
        assert_eq!(view_model.summary.total_count, 0);
        assert!(view_model.groups.is_empty());
    }
}
