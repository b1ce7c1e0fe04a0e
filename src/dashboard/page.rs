//! The dashboard page: summary cards, the add-transaction form, and the
//! live-updating transaction list.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error,
    alert::AlertTemplate,
    auth::Session,
    dashboard::{
        summary::summary_cards,
        table::transaction_list,
        view_model::{DashboardViewModel, ViewState},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::TransactionStore,
    timezone::get_local_offset,
    transaction::{TransactionDraft, transaction_form},
};

/// The state needed for displaying the dashboard page and its event stream.
#[derive(Debug, Clone)]
pub struct DashboardState<S>
where
    S: TransactionStore,
{
    /// The store holding the transaction collection.
    pub transaction_store: S,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl<S> FromRef<AppState<S>> for DashboardState<S>
where
    S: TransactionStore,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the parts of the dashboard that are replaced on every snapshot.
pub(super) fn dashboard_content(view_model: &DashboardViewModel) -> Markup {
    html! {
        (summary_cards(&view_model.summary))
        (transaction_list(view_model))
    }
}

/// Toggles the disconnected warning with the SSE connection state, so a
/// dead stream is visibly flagged instead of silently freezing the list.
const CONNECTION_WARNING_SCRIPT: &str = r#"
document.addEventListener('htmx:sseError', function () {
    document.getElementById('connection-warning').hidden = false;
});
document.addEventListener('htmx:sseOpen', function () {
    document.getElementById('connection-warning').hidden = true;
});
"#;

/// A route handler for displaying the dashboard page.
///
/// The page renders from the subscription's current snapshot and then keeps
/// itself up to date by listening to the dashboard event stream. The
/// filter/sort selection arrives as query parameters and is baked into the
/// event stream URL, so each selection change is a fresh page load.
pub async fn get_dashboard_page<S>(
    State(state): State<DashboardState<S>>,
    Extension(session): Extension<Session>,
    Query(view): Query<ViewState>,
) -> Response
where
    S: TransactionStore,
{
    let Some(offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    // This receiver only seeds the initial render; it is dropped when this
    // function returns. The long-lived subscription belongs to the event
    // stream handler.
    let receiver = match state.transaction_store.subscribe(session.user_id) {
        Ok(receiver) => receiver,
        Err(error) => {
            tracing::error!("could not subscribe to transactions: {error}");
            return error.into_response();
        }
    };
    let snapshot = receiver.current();
    let view_model = DashboardViewModel::build(&snapshot, view, offset);

    let events_url = format!(
        "{}?filter={}&sort={}",
        endpoints::DASHBOARD_EVENTS,
        view.filter.as_str(),
        view.sort.as_str()
    );

    let content = html! {
        (NavBar::new(endpoints::DASHBOARD_VIEW, Some(&session.email)).into_html())

        main class=(PAGE_CONTAINER_STYLE) {
            div class="w-full max-w-4xl flex flex-col gap-6" {
                div id="connection-warning" hidden {
                    (AlertTemplate::error(
                        "Live updates disconnected",
                        "The dashboard may be out of date. Reload the page to reconnect.",
                    )
                    .into_html())
                }

                div class="w-full bg-white dark:bg-gray-800 border border-gray-200 \
                    dark:border-gray-700 rounded-lg p-6 shadow-md"
                {
                    (transaction_form(&TransactionDraft::default()))
                }

                div
                    hx-ext="sse"
                    sse-connect=(events_url)
                    sse-swap="snapshot"
                    class="flex flex-col gap-6"
                {
                    (dashboard_content(&view_model))
                }
            }
        }
    };

    let head_elements = [HeadElement::ScriptSource(PreEscaped(
        CONNECTION_WARNING_SCRIPT.to_owned(),
    ))];

    base("Dashboard", &head_elements, &content).into_response()
}
