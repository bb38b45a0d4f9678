//! Store editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    listing::ListingCache,
    store::{
        StoreFormData, StoreId, get_store, update_store,
        form_view::{FormAction, server_error_messages, store_form, store_form_page},
    },
};

/// The state needed for editing a store.
#[derive(Debug, Clone)]
pub struct EditStoreState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub listing: ListingCache,
}

impl FromRef<AppState> for EditStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            listing: state.listing.clone(),
        }
    }
}

/// Render the page for editing a store, filled in with its current values.
pub async fn get_edit_store_page(
    State(state): State<EditStoreState>,
    Path(store_id): Path<StoreId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let listing = state
        .listing
        .get(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve stores: {error}"))?;

    Ok(store_form_page(
        FormAction::Update(store_id),
        listing.categories(),
        &StoreFormData::from_store(&store),
    )
    .into_response())
}

/// Handle store edit form submission.
///
/// On success the client is sent back to the listing, which confirms the
/// update.
pub async fn update_store_endpoint(
    State(state): State<EditStoreState>,
    Path(store_id): Path<StoreId>,
    Form(form): Form<StoreFormData>,
) -> Response {
    let action = FormAction::Update(store_id);

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            return store_form(action, &form, Some(&errors), &[]).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_store(store_id, &details, &connection) {
        Ok(()) => {
            tracing::info!("Updated store \"{}\" with ID {store_id}", details.name);
            state.listing.refresh_after_change(&connection);

            (
                HxRedirect(format!("{}?updated=true", endpoints::ROOT)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::UpdateMissingStore) => {
            tracing::error!("Tried to update store {store_id} which does not exist");
            Error::UpdateMissingStore.into_alert_response()
        }
        Err(error) => {
            tracing::error!("An error occurred while updating store {store_id}: {error}");

            store_form(action, &form, None, &server_error_messages(&error)).into_response()
        }
    }
}
