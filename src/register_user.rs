//! The registration page for creating a new account.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner,
        log_in_register,
    },
    state::create_cookie_key,
    store::TransactionStore,
    user::create_user,
};

/// The minimum number of characters the password should have to be considered
/// valid on the client side (server-side validation is done on top of this
/// validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 8;

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl RegistrationState {
    /// Create the cookie key from a string and set the default cookie duration.
    pub fn new(cookie_secret: &str, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
        }
    }
}

impl<S> FromRef<AppState<S>> for RegistrationState
where
    S: TransactionStore,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for a registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The email to register with.
    pub email: String,
    /// The chosen password.
    pub password: String,
    /// The password again, to catch typos.
    pub confirm_password: String,
}

#[derive(Default)]
struct RegistrationFormErrors<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(email: &str, errors: &RegistrationFormErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(email);

                @if let Some(error_message) = errors.email {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            div {
                label for="password" class=(FORM_LABEL_STYLE) { "Password" }

                input
                    type="password"
                    name="password"
                    id="password"
                    placeholder="••••••••"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    minlength=(PASSWORD_INPUT_MIN_LENGTH);

                @if let Some(error_message) = errors.password {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            div {
                label for="confirm-password" class=(FORM_LABEL_STYLE) { "Confirm Password" }

                input
                    type="password"
                    name="confirm_password"
                    id="confirm-password"
                    placeholder="••••••••"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    minlength=(PASSWORD_INPUT_MIN_LENGTH);

                @if let Some(error_message) = errors.confirm_password {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE) {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                    "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = registration_form("", &RegistrationFormErrors::default());
    let content = log_in_register("Create an account", &form);

    base("Register", &[], &content).into_response()
}

/// A route handler for creating a new user and signing them in.
///
/// On success, sets the auth cookie and redirects to the dashboard.
/// Otherwise, re-renders the form with an error message on the failing field.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let email = form.email.trim();

    if email.is_empty() || !email.contains('@') {
        return form_error_response(
            email,
            RegistrationFormErrors {
                email: Some("Enter a valid email address."),
                ..Default::default()
            },
        );
    }

    if form.password != form.confirm_password {
        return form_error_response(
            email,
            RegistrationFormErrors {
                confirm_password: Some("Passwords do not match."),
                ..Default::default()
            },
        );
    }

    let validated_password = match ValidatedPassword::new(&form.password, &[email]) {
        Ok(password) => password,
        Err(Error::TooWeak(reason)) => {
            return form_error_response(
                email,
                RegistrationFormErrors {
                    password: Some(&format!("Password is too weak: {reason}.")),
                    ..Default::default()
                },
            );
        }
        Err(error) => {
            tracing::error!("could not validate password: {error}");
            return error.into_response();
        }
    };

    let password_hash = match PasswordHash::new(validated_password) {
        Ok(password_hash) => password_hash,
        Err(error) => {
            tracing::error!("could not hash password: {error}");
            return error.into_response();
        }
    };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match create_user(email, password_hash, &connection) {
            Ok(user) => user,
            Err(Error::DuplicateEmail) => {
                return form_error_response(
                    email,
                    RegistrationFormErrors {
                        email: Some("That email is already registered. Try logging in instead."),
                        ..Default::default()
                    },
                );
            }
            Err(error) => {
                tracing::error!("could not create user: {error}");
                return error.into_response();
            }
        }
    };

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(updated_jar) => (
            updated_jar,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not set auth cookie: {error}");
            Error::InvalidDateFormat(error.to_string(), String::new()).into_response()
        }
    }
}

fn form_error_response(email: &str, errors: RegistrationFormErrors) -> Response {
    (StatusCode::OK, registration_form(email, &errors)).into_response()
}
