//! Cookie-based authentication: the session type, cookie handling, the auth
//! guard middleware, and redirect helpers.

mod cookie;
mod middleware;
mod redirect;

pub use cookie::{
    COOKIE_EXPIRY, COOKIE_USER_ID, DEFAULT_COOKIE_DURATION, invalidate_auth_cookie,
    set_auth_cookie,
};
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub use redirect::{build_log_in_redirect_url_from_target, normalize_redirect_url};

use crate::user::UserID;

/// The signed-in identity the rest of the app sees.
///
/// Handlers receive this as a request extension inserted by the auth guard;
/// a request without one never reaches a protected handler. Owner stamping
/// and owner-scoped subscriptions use `user_id`, never anything sent by the
/// client.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The signed-in user's ID.
    pub user_id: UserID,
    /// The signed-in user's email address.
    pub email: String,
}
