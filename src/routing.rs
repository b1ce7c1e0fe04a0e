//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    auth::{auth_guard, auth_guard_hx},
    dashboard::{get_dashboard_events, get_dashboard_page},
    internal_server_error::get_internal_server_error_page,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    logging::logging_middleware,
    not_found::get_404_not_found,
    register_user::{get_register_page, register_user},
    store::TransactionStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_category_options,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore,
{
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        // Logs form bodies with passwords redacted. Must stay off the
        // dashboard event stream route, which never finishes its body.
        .layer(middleware::from_fn(logging_middleware));

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page::<S>))
        .route(endpoints::DASHBOARD_EVENTS, get(get_dashboard_events::<S>))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These /api routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint::<S>),
            )
            .route(endpoints::CATEGORY_OPTIONS, get(get_category_options))
            .route(
                endpoints::TRANSACTION,
                delete(delete_transaction_endpoint::<S>),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod routing_tests {
    use std::sync::{Arc, Mutex};

    use axum::{http::StatusCode, response::IntoResponse};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, PasswordHash, endpoints,
        auth::COOKIE_USER_ID,
        db::initialize,
        store::SqliteTransactionStore,
        user::create_user,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_user(
            "foo@bar.baz",
            // bcrypt hash of "okon"
            PasswordHash::new_unchecked(
                "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm",
            ),
            &connection,
        )
        .unwrap();

        let connection = Arc::new(Mutex::new(connection));
        let store = SqliteTransactionStore::new(connection.clone());
        let state = AppState::new("a-test-cookie-secret", "Etc/UTC", connection, store);

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = super::get_index_page().await.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn dashboard_requires_authentication() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_see_other();
        let location = response.header("location");
        assert!(
            location
                .to_str()
                .unwrap()
                .starts_with(endpoints::LOG_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn logged_in_user_can_load_the_dashboard() {
        let server = get_test_server();

        let log_in_response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("email", "foo@bar.baz"), ("password", "okon")])
            .await;
        log_in_response.assert_status_see_other();
        let cookies = log_in_response.cookies();

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookies(cookies)
            .await;

        response.assert_status_ok();
        response.assert_text_contains("foo@bar.baz");
        response.assert_text_contains("Add Transaction");

        let document = scraper::Html::parse_document(&response.text());
        let card_selector = scraper::Selector::parse("section.grid > div").unwrap();
        assert_eq!(
            document.select(&card_selector).count(),
            3,
            "expected income, expense, and balance cards"
        );
    }

    #[tokio::test]
    async fn end_to_end_create_and_view_totals() {
        let server = get_test_server();

        let log_in_response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("email", "foo@bar.baz"), ("password", "okon")])
            .await;
        let cookies = log_in_response.cookies();

        server
            .post(endpoints::TRANSACTIONS_API)
            .add_cookies(cookies.clone())
            .form(&[
                ("description", "Salary for March"),
                ("amount", "100"),
                ("kind", "income"),
                ("category", "Salary"),
            ])
            .await
            .assert_status_ok();
        server
            .post(endpoints::TRANSACTIONS_API)
            .add_cookies(cookies.clone())
            .form(&[
                ("description", "Groceries"),
                ("amount", "40"),
                ("kind", "expense"),
                ("category", "Food"),
            ])
            .await
            .assert_status_ok();

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookies(cookies)
            .await;

        response.assert_status_ok();
        response.assert_text_contains("$100.00");
        response.assert_text_contains("$40.00");
        response.assert_text_contains("$60.00");
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found_page() {
        let server = get_test_server();

        let response = server.get("/definitely/not/a/route").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn coffee_route_is_a_teapot() {
        let server = get_test_server();

        let response = server.get(endpoints::COFFEE).await;

        response.assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn log_in_sets_cookie_for_protected_api() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("email", "foo@bar.baz"), ("password", "okon")])
            .await;

        assert!(response.maybe_cookie(COOKIE_USER_ID).is_some());
    }
}
