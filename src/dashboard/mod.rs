//! Dashboard module
//!
//! The signed-in landing page: summary cards, the add-transaction form, and
//! the transaction list, kept live by a server-sent event stream fed from
//! the store's snapshot subscription.

mod events;
mod page;
mod summary;
mod table;
mod view_model;

pub use events::get_dashboard_events;
pub use page::{DashboardState, get_dashboard_page};
pub use view_model::{DashboardViewModel, Summary, ViewState};
