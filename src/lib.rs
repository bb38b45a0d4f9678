//! A directory of local stores, grouped by the goods they sell and how
//! customers order from them.
//!
//! This library provides a web server that directly serves HTML pages.
//! Stores can be browsed by category, added and edited.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod listing;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod store;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{
    Category, ContactMethod, MethodFlags, Store, StoreDetails, StoreId, StoreName, create_store,
    get_all_stores, get_store, update_store,
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a store name.
    #[error("Store name cannot be empty")]
    EmptyStoreName,

    /// A string did not match any of the store categories.
    #[error("\"{0}\" is not a valid store category")]
    InvalidCategory(String),

    /// A string did not match any of the ordering methods.
    #[error("\"{0}\" is not a valid shopping method")]
    InvalidContactMethod(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the cached store listing
    #[error("could not acquire the store listing lock")]
    ListingCacheLockError,

    /// Another store already has the requested name.
    #[error("a store with this name already exists, choose a different name")]
    DuplicateStoreName,

    /// Tried to update a store that does not exist
    #[error("tried to update a store that is not in the database")]
    UpdateMissingStore,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("store.name") =>
            {
                Error::DuplicateStoreName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFound.into_response(),
            Error::DatabaseLockError | Error::ListingCacheLockError => {
                InternalServerError::default().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::UpdateMissingStore => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update store".to_owned(),
                    details: "The store could not be found. \
                        It may have been removed since the page was loaded."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::Error;

    #[test]
    fn unique_name_violation_is_duplicate_store_name() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute_batch(
                "CREATE TABLE store (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
                INSERT INTO store (name) VALUES ('Joe''s Deli');",
            )
            .unwrap();

        let error = connection
            .execute("INSERT INTO store (name) VALUES ('Joe''s Deli')", [])
            .unwrap_err();

        assert_eq!(Error::from(error), Error::DuplicateStoreName);
    }

    #[test]
    fn no_rows_is_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[test]
    fn other_sql_errors_are_wrapped() {
        assert_eq!(
            Error::from(rusqlite::Error::InvalidQuery),
            Error::SqlError(rusqlite::Error::InvalidQuery)
        );
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn lock_errors_render_500_page() {
        assert_eq!(
            Error::DatabaseLockError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::ListingCacheLockError.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_store_alert_is_not_found() {
        let response = Error::UpdateMissingStore.into_alert_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
