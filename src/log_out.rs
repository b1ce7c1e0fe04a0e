//! The log-out route: invalidates the session cookies and returns the user
//! to the log-in page.
//!
//! Logging out tears down the dashboard page, which drops any live snapshot
//! subscription held by its event stream; a later sign-in subscribes afresh
//! rather than reusing anything from the old session.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::invalidate_auth_cookie, endpoints};

/// A route handler that logs out the current user and redirects to the
/// log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
