//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    listing::{get_all_stores_page, get_category_page},
    not_found::get_404_not_found,
    store::{
        create_store_endpoint, get_edit_store_page, get_new_store_page, get_type_options_endpoint,
        preview_store_endpoint, update_store_endpoint, validate_field_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_all_stores_page))
        .route(endpoints::CATEGORY_VIEW, get(get_category_page))
        .route(endpoints::NEW_STORE_VIEW, get(get_new_store_page))
        .route(endpoints::EDIT_STORE_VIEW, get(get_edit_store_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::POST_STORE, post(create_store_endpoint))
        .route(endpoints::PUT_STORE, put(update_store_endpoint))
        .route(
            endpoints::STORE_TYPE_OPTIONS,
            get(get_type_options_endpoint),
        )
        .route(endpoints::STORE_PREVIEW, post(preview_store_endpoint))
        .route(
            endpoints::VALIDATE_STORE_FIELD,
            post(validate_field_endpoint),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{AppState, build_router, endpoints, store::get_store};

    fn get_test_server() -> (TestServer, AppState) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");
        let server = TestServer::new(build_router(state.clone()));

        (server, state)
    }

    fn complete_form() -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "Joe's Deli"),
            ("category", "groceries"),
            ("type_", "deli"),
            ("primary_method", "phone"),
            ("available_methods", "phone"),
            ("available_methods", "email"),
            ("delivery", "yes"),
            ("pickup", "no"),
            ("url", "https://example.com"),
            ("phone", "613-555-0100"),
        ]
    }

    fn store_names(text: &str) -> Vec<String> {
        Html::parse_document(text)
            .select(&Selector::parse("#stores h2").unwrap())
            .map(|heading| heading.text().collect())
            .collect()
    }

    #[tokio::test]
    async fn created_store_appears_in_listing() {
        let (server, state) = get_test_server();

        // Load the listing first so that the cache must be refreshed.
        let response = server.get(endpoints::ROOT).await;
        response.assert_status_ok();
        assert!(store_names(&response.text()).is_empty());

        server
            .post(endpoints::POST_STORE)
            .form(&complete_form())
            .await
            .assert_status_ok();

        let response = server.get(endpoints::ROOT).await;
        assert_eq!(store_names(&response.text()), ["Joe's Deli"]);
        let response = server.get("/groceries").await;
        response.assert_status_ok();
        assert_eq!(store_names(&response.text()), ["Joe's Deli"]);
        server
            .get("/alcohol")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        let store = get_store(1, &connection).expect("Could not get store");
        assert!(store.details.methods.phone);
        assert!(store.details.methods.email);
        assert!(!store.details.methods.online);
        assert!(store.details.delivery);
        assert!(!store.details.pickup);
    }

    #[tokio::test]
    async fn updated_store_is_shown_after_redirect() {
        let (server, _state) = get_test_server();
        server
            .post(endpoints::POST_STORE)
            .form(&complete_form())
            .await
            .assert_status_ok();
        assert_eq!(
            store_names(&server.get(endpoints::ROOT).await.text()),
            ["Joe's Deli"]
        );

        let mut form = complete_form();
        form[0] = ("name", "Joe's Wines");
        form[1] = ("category", "alcohol");
        form[2] = ("type_", "wine");
        let response = server
            .put(&endpoints::format_endpoint(endpoints::PUT_STORE, 1))
            .form(&form)
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let redirect = response.header("hx-redirect");
        let redirect = redirect.to_str().expect("Could not read redirect");
        assert_eq!(redirect, "/?updated=true");

        let listing = server
            .get(endpoints::ROOT)
            .add_query_param("updated", "true")
            .await;
        assert_eq!(store_names(&listing.text()), ["Joe's Wines"]);
        assert!(listing.text().contains("Store updated"));
        server.get("/alcohol").await.assert_status_ok();
        server
            .get("/groceries")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_fields_do_not_create_store() {
        let (server, state) = get_test_server();
        let form: Vec<_> = complete_form()
            .into_iter()
            .filter(|(key, _)| *key != "name")
            .collect();

        let response = server.post(endpoints::POST_STORE).form(&form).await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        let items: Vec<String> = html
            .select(&Selector::parse("#form-errors li").unwrap())
            .map(|item| item.text().collect())
            .collect();
        assert_eq!(items, ["Store name"]);
        let connection = state.db_connection.lock().unwrap();
        assert!(
            crate::store::get_all_stores(&connection)
                .expect("Could not get stores")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn edit_page_for_unknown_store_is_not_found() {
        let (server, _state) = get_test_server();

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_STORE_VIEW, 42))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn type_options_follow_category() {
        let (server, _state) = get_test_server();

        let response = server
            .get(endpoints::STORE_TYPE_OPTIONS)
            .add_query_param("category", "restaurants")
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        let values: Vec<_> = html
            .select(&Selector::parse("#type-field option").unwrap())
            .filter_map(|option| option.value().attr("value").map(str::to_owned))
            .collect();
        assert_eq!(values, ["", "indian", "italian", "thai"]);
    }

    #[tokio::test]
    async fn preview_follows_form_values() {
        let (server, _state) = get_test_server();

        let response = server
            .post(endpoints::STORE_PREVIEW)
            .form(&complete_form())
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        let heading: Vec<String> = html
            .select(&Selector::parse("article h2").unwrap())
            .map(|heading| heading.text().collect())
            .collect();
        assert_eq!(heading, ["Joe's Deli"]);
        assert!(response.text().contains("tel:613-555-0100"));
        assert!(!response.text().contains("Edit"));
    }

    #[tokio::test]
    async fn validate_unknown_field_is_rejected() {
        let (server, _state) = get_test_server();

        let response = server
            .post(&endpoints::format_endpoint(
                endpoints::VALIDATE_STORE_FIELD,
                "description",
            ))
            .form(&[("description", "")])
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[tokio::test]
    async fn validate_field_reports_missing_value() {
        let (server, _state) = get_test_server();

        let response = server
            .post(&endpoints::format_endpoint(
                endpoints::VALIDATE_STORE_FIELD,
                "url",
            ))
            .form(&[("url", " ")])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Website URL required"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _state) = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let (server, _state) = get_test_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
