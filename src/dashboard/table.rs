//! The grouped transaction list with its filter and sort controls.

use maud::{Markup, html};

use crate::{
    aggregation::{DayGroup, SortBy, TypeFilter},
    category::TransactionKind,
    dashboard::view_model::DashboardViewModel,
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, PILL_ACTIVE_STYLE, PILL_INACTIVE_STYLE, format_currency},
    transaction::Transaction,
};

fn view_url(filter: TypeFilter, sort: SortBy) -> String {
    format!(
        "{}?filter={}&sort={}",
        endpoints::DASHBOARD_VIEW,
        filter.as_str(),
        sort.as_str()
    )
}

fn pill(label: &str, url: &str, is_active: bool) -> Markup {
    let style = if is_active {
        PILL_ACTIVE_STYLE
    } else {
        PILL_INACTIVE_STYLE
    };

    html!( a href=(url) class=(style) { (label) } )
}

/// Render the filter and sort controls.
///
/// The controls are plain links that reload the dashboard with a new query
/// string; the selection lives only in the URL and resets on a plain reload.
fn list_controls(view_model: &DashboardViewModel) -> Markup {
    let filter = view_model.view.filter;
    let sort = view_model.view.sort;

    html! {
        div class="flex flex-wrap items-center justify-between gap-3" {
            div class="flex items-center gap-2" aria-label="Filter by type" {
                (pill("All", &view_url(TypeFilter::All, sort), filter == TypeFilter::All))
                (pill("Income", &view_url(TypeFilter::Income, sort), filter == TypeFilter::Income))
                (pill("Expense", &view_url(TypeFilter::Expense, sort), filter == TypeFilter::Expense))
            }

            div class="flex items-center gap-2" aria-label="Sort by" {
                span class="text-sm text-gray-600 dark:text-gray-400" { "Sort by" }
                (pill("Date", &view_url(filter, SortBy::Date), sort == SortBy::Date))
                (pill("Amount", &view_url(filter, SortBy::Amount), sort == SortBy::Amount))
            }
        }
    }
}

fn list_header(view_model: &DashboardViewModel) -> Markup {
    let summary = &view_model.summary;

    html! {
        p class="text-sm text-gray-600 dark:text-gray-400" {
            "Showing " (summary.filtered_count) " of " (summary.total_count) " transactions"

            @match view_model.view.filter {
                TypeFilter::All => {
                    " (" (summary.income_count) " income, " (summary.expense_count) " expense)"
                }
                TypeFilter::Income => {
                    " totalling " (format_currency(summary.filtered_income_total))
                }
                TypeFilter::Expense => {
                    " totalling " (format_currency(summary.filtered_expense_total))
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionKind::Expense => ("-", "text-red-600 dark:text-red-400"),
    };
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        li class="flex items-center justify-between gap-4 py-3" {
            div class="min-w-0" {
                p class="font-medium truncate" { (transaction.description) }

                span class="inline-flex items-center px-2.5 py-0.5 text-xs font-semibold \
                    text-blue-800 bg-blue-100 rounded-full dark:bg-blue-900 dark:text-blue-300"
                {
                    (transaction.category)
                }
            }

            div class="flex items-center gap-4 shrink-0" {
                span class=(format!("font-semibold {amount_style}")) {
                    (sign) (format_currency(transaction.amount_or_zero()))
                }

                button
                    class=(BUTTON_DELETE_STYLE)
                    title="Delete transaction"
                    // The row is not removed here; it disappears when the
                    // next snapshot arrives over the event stream.
                    hx-delete=(delete_url)
                    hx-swap="none"
                    hx-target-error="#alert-container"
                    hx-confirm="Delete this transaction?"
                {
                    "Delete"
                }
            }
        }
    }
}

fn day_group_view(group: &DayGroup) -> Markup {
    html! {
        section {
            h3 class="text-sm font-semibold text-gray-600 dark:text-gray-400 \
                border-b border-gray-200 dark:border-gray-700 pb-1 mb-1"
            {
                (group.label)
            }

            ul class="divide-y divide-gray-100 dark:divide-gray-700" {
                @for transaction in &group.transactions {
                    (transaction_row(transaction))
                }
            }
        }
    }
}

/// Render the transaction list: controls, header, and the day groups.
pub fn transaction_list(view_model: &DashboardViewModel) -> Markup {
    html! {
        section class="w-full flex flex-col gap-4" {
            h2 class="text-xl font-semibold" { "Transactions" }

            (list_controls(view_model))

            @if view_model.groups.is_empty() {
                p class="text-gray-600 dark:text-gray-400 py-8 text-center" {
                    "No transactions yet. Add one to get started!"
                }
            } @else {
                (list_header(view_model))

                @for group in &view_model.groups {
                    (day_group_view(group))
                }
            }
        }
    }
}
