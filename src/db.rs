//! Database setup shared by the server and the utility binaries.

use rusqlite::Connection;

use crate::{Error, store::create_store_table};

/// Create the tables for the domain models if they do not already exist.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_store_table(connection)?;

    Ok(())
}
