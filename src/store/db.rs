//! Database operations for stores.
//!
//! These four functions are the whole data-access contract: create, update,
//! fetch one and fetch all.

use rusqlite::{Connection, Row, named_params, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    store::{Category, ContactMethod, MethodFlags, Store, StoreDetails, StoreId, StoreName},
};

const SELECT_STORE_COLUMNS: &str = "SELECT id, name, category, type, description, url, \
    primary_method, method_phone, method_online, method_form, method_email, email, phone, \
    delivery, pickup, image, inverted_image, created_at FROM store";

/// Create a store and return it with its generated ID and creation time.
///
/// # Errors
/// Returns [Error::DuplicateStoreName] if a store with the same name exists.
pub fn create_store(details: StoreDetails, connection: &Connection) -> Result<Store, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO store (name, category, type, description, url, primary_method, \
            method_phone, method_online, method_form, method_email, email, phone, \
            delivery, pickup, image, inverted_image, created_at)
        VALUES (:name, :category, :type, :description, :url, :primary_method, \
            :method_phone, :method_online, :method_form, :method_email, :email, :phone, \
            :delivery, :pickup, :image, :inverted_image, :created_at);",
        named_params! {
            ":name": details.name.as_ref(),
            ":category": details.category.as_str(),
            ":type": details.store_type,
            ":description": details.description,
            ":url": details.url,
            ":primary_method": details.primary_method.as_str(),
            ":method_phone": details.methods.phone,
            ":method_online": details.methods.online,
            ":method_form": details.methods.form,
            ":method_email": details.methods.email,
            ":email": details.email,
            ":phone": details.phone,
            ":delivery": details.delivery,
            ":pickup": details.pickup,
            ":image": details.image,
            ":inverted_image": details.inverted_image,
            ":created_at": created_at,
        },
    )?;

    let id = connection.last_insert_rowid();

    Ok(Store {
        id,
        details,
        created_at,
    })
}

/// Replace every user-editable field of the store `store_id` with `details`.
///
/// # Errors
/// Returns [Error::UpdateMissingStore] if the store doesn't exist and
/// [Error::DuplicateStoreName] if another store already has the new name.
pub fn update_store(
    store_id: StoreId,
    details: &StoreDetails,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE store SET
            name = :name,
            category = :category,
            type = :type,
            description = :description,
            url = :url,
            primary_method = :primary_method,
            method_phone = :method_phone,
            method_online = :method_online,
            method_form = :method_form,
            method_email = :method_email,
            email = :email,
            phone = :phone,
            delivery = :delivery,
            pickup = :pickup,
            image = :image,
            inverted_image = :inverted_image
        WHERE id = :id;",
        named_params! {
            ":id": store_id,
            ":name": details.name.as_ref(),
            ":category": details.category.as_str(),
            ":type": details.store_type,
            ":description": details.description,
            ":url": details.url,
            ":primary_method": details.primary_method.as_str(),
            ":method_phone": details.methods.phone,
            ":method_online": details.methods.online,
            ":method_form": details.methods.form,
            ":method_email": details.methods.email,
            ":email": details.email,
            ":phone": details.phone,
            ":delivery": details.delivery,
            ":pickup": details.pickup,
            ":image": details.image,
            ":inverted_image": details.inverted_image,
        },
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingStore);
    }

    Ok(())
}

/// Retrieve a single store by ID.
pub fn get_store(store_id: StoreId, connection: &Connection) -> Result<Store, Error> {
    connection
        .prepare(&format!("{SELECT_STORE_COLUMNS} WHERE id = :id;"))?
        .query_row(&[(":id", &store_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve every store, in no particular order.
pub fn get_all_stores(connection: &Connection) -> Result<Vec<Store>, Error> {
    connection
        .prepare(&format!("{SELECT_STORE_COLUMNS};"))?
        .query_map([], map_row)?
        .map(|maybe_store| maybe_store.map_err(|error| error.into()))
        .collect()
}

/// Initialize the store table and indexes.
pub fn create_store_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS store (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL,
            type TEXT NOT NULL,
            description TEXT,
            url TEXT NOT NULL,
            primary_method TEXT NOT NULL,
            method_phone INTEGER NOT NULL,
            method_online INTEGER NOT NULL,
            method_form INTEGER NOT NULL,
            method_email INTEGER NOT NULL,
            email TEXT,
            phone TEXT,
            delivery INTEGER NOT NULL,
            pickup INTEGER NOT NULL,
            image TEXT,
            inverted_image INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_store_category ON store(category);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Store, rusqlite::Error> {
    let raw_name: String = row.get(1)?;
    let raw_category: String = row.get(2)?;
    let raw_primary_method: String = row.get(6)?;

    let category = raw_category
        .parse::<Category>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, error.into()))?;
    let primary_method = raw_primary_method
        .parse::<ContactMethod>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, error.into()))?;

    let details = StoreDetails {
        name: StoreName::new_unchecked(&raw_name),
        category,
        store_type: row.get(3)?,
        description: row.get(4)?,
        url: row.get(5)?,
        primary_method,
        methods: MethodFlags {
            phone: row.get(7)?,
            online: row.get(8)?,
            form: row.get(9)?,
            email: row.get(10)?,
        },
        email: row.get(11)?,
        phone: row.get(12)?,
        delivery: row.get(13)?,
        pickup: row.get(14)?,
        image: row.get(15)?,
        inverted_image: row.get(16)?,
    };

    Ok(Store {
        id: row.get(0)?,
        details,
        created_at: row.get(17)?,
    })
}


#[cfg(test)]
mod store_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        store::{Category, ContactMethod, MethodFlags, StoreName},
    };

    use super::{
        create_store, create_store_table, get_all_stores, get_store,
        test_utils::{store_details, store_details_in},
        update_store,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_store_table(&connection).expect("Could not create store table");
        connection
    }

    #[test]
    fn create_table_is_idempotent() {
        let connection = get_test_db_connection();

        assert_eq!(Ok(()), create_store_table(&connection));
    }

    #[test]
    fn create_store_succeeds() {
        let connection = get_test_db_connection();
        let details = store_details("Joe's Deli");

        let store = create_store(details.clone(), &connection).expect("Could not create store");

        assert!(store.id > 0);
        assert_eq!(store.details, details);
    }

    #[test]
    fn create_store_fails_on_duplicate_name() {
        let connection = get_test_db_connection();
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");

        let result = create_store(store_details("Joe's Deli"), &connection);

        assert_eq!(result, Err(Error::DuplicateStoreName));
    }

    #[test]
    fn get_store_round_trips_every_field() {
        let connection = get_test_db_connection();
        let inserted = create_store(store_details("Joe's Deli"), &connection)
            .expect("Could not create store");

        let selected = get_store(inserted.id, &connection).expect("Could not get store");

        assert_eq!(selected.id, inserted.id);
        assert_eq!(selected.details, inserted.details);
        assert_eq!(
            selected.created_at.unix_timestamp(),
            inserted.created_at.unix_timestamp()
        );
    }

    #[test]
    fn get_store_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted = create_store(store_details("Joe's Deli"), &connection)
            .expect("Could not create store");

        let selected = get_store(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_stores_returns_every_store() {
        let connection = get_test_db_connection();
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");
        create_store(
            store_details_in("Corner Cellar", Category::Alcohol, "wine"),
            &connection,
        )
        .expect("Could not create store");

        let stores = get_all_stores(&connection).expect("Could not get stores");

        let mut names: Vec<_> = stores
            .iter()
            .map(|store| store.details.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, ["Corner Cellar", "Joe's Deli"]);
    }

    #[test]
    fn get_all_stores_on_empty_table_returns_empty() {
        let connection = get_test_db_connection();

        assert_eq!(get_all_stores(&connection), Ok(vec![]));
    }

    #[test]
    fn update_store_replaces_fields() {
        let connection = get_test_db_connection();
        let store = create_store(store_details("Joe's Deli"), &connection)
            .expect("Could not create store");
        let mut new_details = store_details_in("Joe's Wines", Category::Alcohol, "wine");
        new_details.primary_method = ContactMethod::Online;
        new_details.methods = MethodFlags::from_selected(&[ContactMethod::Online]);
        new_details.description = None;

        update_store(store.id, &new_details, &connection).expect("Could not update store");

        let updated = get_store(store.id, &connection).expect("Could not get store");
        assert_eq!(updated.details, new_details);
        assert_eq!(
            updated.created_at.unix_timestamp(),
            store.created_at.unix_timestamp()
        );
    }

    #[test]
    fn update_store_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        let result = update_store(999999, &store_details("Nowhere"), &connection);

        assert_eq!(result, Err(Error::UpdateMissingStore));
    }

    #[test]
    fn update_store_to_existing_name_fails() {
        let connection = get_test_db_connection();
        create_store(store_details("Joe's Deli"), &connection).expect("Could not create store");
        let other = create_store(store_details("Ann's Bakery"), &connection)
            .expect("Could not create store");

        let result = update_store(other.id, &store_details("Joe's Deli"), &connection);

        assert_eq!(result, Err(Error::DuplicateStoreName));
        let unchanged = get_store(other.id, &connection).expect("Could not get store");
        assert_eq!(unchanged.details.name, StoreName::new_unchecked("Ann's Bakery"));
    }
}
