//! The summary cards showing total income, total expense, and balance.

use maud::{Markup, html};

use crate::{dashboard::view_model::Summary, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";

fn summary_card(title: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }

            p class=(format!("text-3xl font-bold {amount_style}")) {
                (format_currency(amount))
            }
        }
    }
}

/// Render the three summary cards.
///
/// The cards always show the whole snapshot, regardless of the list filter;
/// the filtered figures appear in the list header instead.
pub fn summary_cards(summary: &Summary) -> Markup {
    let balance_style = if summary.balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full" {
            (summary_card("Total Income", summary.income_total, "text-green-600 dark:text-green-400"))
            (summary_card("Total Expense", summary.expense_total, "text-red-600 dark:text-red-400"))
            (summary_card("Balance", summary.balance, balance_style))
        }
    }
}

#[cfg(test)]
mod summary_cards_tests {
    use crate::dashboard::view_model::Summary;

    use super::summary_cards;

    fn summary(income: f64, expense: f64) -> Summary {
        Summary {
            income_total: income,
            expense_total: expense,
            balance: income - expense,
            total_count: 0,
            filtered_count: 0,
            income_count: 0,
            expense_count: 0,
            filtered_income_total: 0.0,
            filtered_expense_total: 0.0,
        }
    }

    #[test]
    fn renders_all_three_cards() {
        let markup = summary_cards(&summary(100.0, 40.0)).into_string();

        assert!(markup.contains("Total Income"));
        assert!(markup.contains("Total Expense"));
        assert!(markup.contains("Balance"));
        assert!(markup.contains("$100.00"));
        assert!(markup.contains("$40.00"));
        assert!(markup.contains("$60.00"));
    }

    #[test]
    fn negative_balance_is_highlighted() {
        let markup = summary_cards(&summary(10.0, 40.0)).into_string();

        assert!(markup.contains("-$30.00"));
        assert!(markup.contains("text-red-600 dark:text-red-400\">-$30.00"));
    }
}
