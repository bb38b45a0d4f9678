//! Store creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    listing::ListingCache,
    store::{
        StoreFormData, create_store,
        form_view::{FormAction, server_error_messages, store_form, store_form_page},
    },
};

/// The state needed for creating a store.
#[derive(Debug, Clone)]
pub struct CreateStoreState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub listing: ListingCache,
}

impl FromRef<AppState> for CreateStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            listing: state.listing.clone(),
        }
    }
}

/// Render the page for adding a store.
pub async fn get_new_store_page(State(state): State<CreateStoreState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let listing = state
        .listing
        .get(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve stores: {error}"))?;

    Ok(store_form_page(
        FormAction::Create,
        listing.categories(),
        &StoreFormData::default(),
    )
    .into_response())
}

/// Handle store creation form submission.
///
/// Responds with the form and its errors if a required field is missing or
/// the store could not be saved, otherwise with an empty form and a
/// confirmation alert.
pub async fn create_store_endpoint(
    State(state): State<CreateStoreState>,
    Form(form): Form<StoreFormData>,
) -> Response {
    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            return store_form(FormAction::Create, &form, Some(&errors), &[]).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_store(details, &connection) {
        Ok(store) => {
            tracing::info!("Created store \"{}\" with ID {}", store.details.name, store.id);
            state.listing.refresh_after_change(&connection);

            html! {
                (store_form(FormAction::Create, &StoreFormData::default(), None, &[]))
                (Alert::Success { message: "Store added".to_owned() }.into_oob_html())
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("An error occurred while creating a store: {error}");

            store_form(
                FormAction::Create,
                &form,
                None,
                &server_error_messages(&error),
            )
            .into_response()
        }
    }
}
