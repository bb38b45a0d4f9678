//! The pages that list all stores or the stores in one category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base_with_alert},
    listing::{ListingCache, card::store_card},
    navigation::NavBar,
    store::{Category, Store},
};

/// The state needed for the listing pages.
#[derive(Debug, Clone)]
pub struct ListingPageState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub listing: ListingCache,
}

impl FromRef<AppState> for ListingPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            listing: state.listing.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// Set after a store was updated to show a confirmation.
    #[serde(default)]
    pub updated: bool,
}

/// Render every store, sorted by name.
pub async fn get_all_stores_page(
    State(state): State<ListingPageState>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let listing = state
        .listing
        .get(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve stores: {error}"))?;
    let stores: Vec<&Store> = listing.all().iter().collect();

    Ok(listing_view(
        "All Stores",
        endpoints::ROOT,
        listing.categories(),
        &stores,
        query.updated,
    )
    .into_response())
}

/// Render the stores in one category.
///
/// Responds with the 404 page if `category` is unknown or no store has it.
pub async fn get_category_page(
    State(state): State<ListingPageState>,
    Path(category): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, Error> {
    let category: Category = category.parse().map_err(|_| Error::NotFound)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let listing = state
        .listing
        .get(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve stores: {error}"))?;
    let stores = listing.by_category(category).ok_or(Error::NotFound)?;

    Ok(listing_view(
        category.label(),
        &endpoints::format_endpoint(endpoints::CATEGORY_VIEW, category),
        listing.categories(),
        &stores,
        query.updated,
    )
    .into_response())
}

fn listing_view(
    title: &str,
    active_endpoint: &str,
    categories: &[Category],
    stores: &[&Store],
    show_updated_alert: bool,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint, categories).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-screen-xl space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (title) }

                    a href=(endpoints::NEW_STORE_VIEW) class=(LINK_STYLE) { "Add store" }
                }

                @if stores.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No stores have been added yet. "
                        a href=(endpoints::NEW_STORE_VIEW) class=(LINK_STYLE) { "Add the first one." }
                    }
                } @else {
                    ul id="stores" class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3"
                    {
                        @for store in stores {
                            li { (store_card(store)) }
                        }
                    }
                }
            }
        }
    };
    let alert = show_updated_alert.then(|| {
        Alert::Success {
            message: "Store updated".to_owned(),
        }
        .into_html()
    });

    base_with_alert(title, &content, alert)
}
