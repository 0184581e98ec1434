//! Contains the SQLite backed store implementations.

mod transaction;

pub use transaction::SQLiteTransactionStore;
