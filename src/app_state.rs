//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, stores::SQLiteTransactionStore,
};

/// The state of the REST server.
///
/// The server is generic over the store that holds the transactions, see
/// [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone)]
pub struct AppState<T> {
    /// The store that holds the transactions.
    pub store: T,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to work out the current month when a request does not name one.
    pub local_timezone: String,

    /// The config that controls how to page through transactions.
    pub pagination_config: PaginationConfig,
}

impl<T> AppState<T> {
    /// Create a new [AppState] around `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(store: T, local_timezone: &str, pagination_config: PaginationConfig) -> Self {
        Self {
            store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    local_timezone: &str,
    pagination_config: PaginationConfig,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let store = SQLiteTransactionStore::new(connection);

    Ok(AppState::new(store, local_timezone, pagination_config))
}
