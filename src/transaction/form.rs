//! The add-transaction form.
//!
//! The form posts to the transactions API and is swapped for a fresh empty
//! form on success. The list itself is not touched here; it only changes
//! when the store pushes a new snapshot to the dashboard's event stream.

use maud::{Markup, html};

use crate::{
    category::TransactionKind,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::TransactionDraft,
};

/// Render the `<option>` elements for the category select.
///
/// Swapped into the select whenever the user changes the transaction kind,
/// since each kind has its own fixed category list.
pub fn category_options(kind: TransactionKind, selected: &str) -> Markup {
    html! {
        option value="" disabled selected[selected.is_empty()] { "Select category" }

        @for category in kind.categories() {
            option value=(category) selected[*category == selected] { (category) }
        }
    }
}

fn kind_radio(kind: TransactionKind, checked: bool) -> Markup {
    let id = format!("kind-{}", kind.as_str());

    html! {
        div class="flex items-center gap-2" {
            input
                type="radio"
                name="kind"
                id=(id)
                value=(kind.as_str())
                class=(FORM_RADIO_INPUT_STYLE)
                checked[checked]
                // Changing the kind replaces the category options, because
                // each kind has its own category list.
                hx-get=(endpoints::CATEGORY_OPTIONS)
                hx-target="#category-select"
                hx-include="this";

            label for=(id) class=(FORM_LABEL_STYLE) { (kind.label()) }
        }
    }
}

/// Render the add-transaction form with the draft's values filled in.
///
/// Pass a default draft for an empty form.
pub fn transaction_form(draft: &TransactionDraft) -> Markup {
    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="space-y-4"
        {
            h2 class="text-xl font-semibold" { "Add Transaction" }

            div class="flex gap-6" {
                (kind_radio(TransactionKind::Income, draft.kind == TransactionKind::Income))
                (kind_radio(TransactionKind::Expense, draft.kind == TransactionKind::Expense))
            }

            div {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    placeholder="Enter description"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(draft.description);
            }

            div {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    type="number"
                    name="amount"
                    id="amount"
                    placeholder="0.00"
                    step="0.01"
                    min="0"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(draft.amount);
            }

            div {
                label for="category-select" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category-select"
                    class=(FORM_SELECT_STYLE)
                    required
                {
                    (category_options(draft.kind, &draft.category))
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE) {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Add Transaction"
            }
        }
    }
}
