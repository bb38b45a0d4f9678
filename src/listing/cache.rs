//! The cached result of fetching every store.

use std::sync::{Arc, RwLock};

use rusqlite::Connection;

use crate::{Error, listing::StoreListing, store::get_all_stores};

/// Holds the most recently fetched [StoreListing].
///
/// The listing is fetched on first use and replaced wholesale by
/// [ListingCache::refresh] after every change to the stores.
#[derive(Debug, Clone, Default)]
pub struct ListingCache {
    listing: Arc<RwLock<Option<Arc<StoreListing>>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached listing, fetching it if there is none.
    ///
    /// # Errors
    /// Returns [Error::ListingCacheLockError] if the cache lock is poisoned,
    /// or any error from fetching the stores.
    pub fn get(&self, connection: &Connection) -> Result<Arc<StoreListing>, Error> {
        let cached = self
            .listing
            .read()
            .inspect_err(|error| tracing::error!("could not acquire listing cache lock: {error}"))
            .map_err(|_| Error::ListingCacheLockError)?
            .clone();

        match cached {
            Some(listing) => Ok(listing),
            None => self.refresh(connection),
        }
    }

    /// Fetch every store and replace the cached listing.
    ///
    /// # Errors
    /// Returns [Error::ListingCacheLockError] if the cache lock is poisoned,
    /// or any error from fetching the stores.
    pub fn refresh(&self, connection: &Connection) -> Result<Arc<StoreListing>, Error> {
        let listing = Arc::new(StoreListing::new(get_all_stores(connection)?));

        let mut cached = self
            .listing
            .write()
            .inspect_err(|error| tracing::error!("could not acquire listing cache lock: {error}"))
            .map_err(|_| Error::ListingCacheLockError)?;
        *cached = Some(listing.clone());

        Ok(listing)
    }

    /// Drop the cached listing so that the next [ListingCache::get] fetches it again.
    pub fn invalidate(&self) {
        match self.listing.write() {
            Ok(mut cached) => *cached = None,
            Err(poisoned) => {
                tracing::error!("listing cache lock was poisoned, clearing it");
                *poisoned.into_inner() = None;
                self.listing.clear_poison();
            }
        }
    }

    /// Refresh the listing after a change to the stores.
    ///
    /// The change has already been saved, so a failed refresh is logged and
    /// the cache is invalidated instead of failing the request.
    pub fn refresh_after_change(&self, connection: &Connection) {
        if let Err(error) = self.refresh(connection) {
            tracing::error!("could not refresh the store listing: {error}");
            self.invalidate();
        }
    }
}

#[cfg(test)]
mod listing_cache_tests {
    use rusqlite::Connection;

    use crate::{
        listing::ListingCache,
        store::{create_store, create_store_table, db::test_utils::store_details},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_store_table(&connection).expect("Could not create store table");
        connection
    }

    #[test]
    fn get_fetches_on_first_use() {
        let connection = get_test_connection();
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");
        let cache = ListingCache::new();

        let listing = cache.get(&connection).expect("Could not get listing");

        assert_eq!(listing.all().len(), 1);
    }

    #[test]
    fn get_returns_cached_listing_until_refreshed() {
        let connection = get_test_connection();
        let cache = ListingCache::new();
        assert!(cache.get(&connection).unwrap().all().is_empty());

        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");

        assert!(cache.get(&connection).unwrap().all().is_empty());
        let refreshed = cache.refresh(&connection).expect("Could not refresh listing");
        assert_eq!(refreshed.all().len(), 1);
        assert_eq!(cache.get(&connection).unwrap().all().len(), 1);
    }

    #[test]
    fn invalidate_forces_refetch() {
        let connection = get_test_connection();
        let cache = ListingCache::new();
        assert!(cache.get(&connection).unwrap().all().is_empty());
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");

        cache.invalidate();

        assert_eq!(cache.get(&connection).unwrap().all().len(), 1);
    }

    #[test]
    fn clones_share_the_listing() {
        let connection = get_test_connection();
        let cache = ListingCache::new();
        let other = cache.clone();
        assert!(cache.get(&connection).unwrap().all().is_empty());
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");

        other.refresh_after_change(&connection);

        assert_eq!(cache.get(&connection).unwrap().all().len(), 1);
    }

    #[test]
    fn failed_refresh_invalidates_cache() {
        let connection = get_test_connection();
        let cache = ListingCache::new();
        assert!(cache.get(&connection).unwrap().all().is_empty());
        connection
            .execute_batch("DROP TABLE store;")
            .expect("Could not drop store table");

        cache.refresh_after_change(&connection);

        assert!(cache.get(&connection).is_err());
    }
}
