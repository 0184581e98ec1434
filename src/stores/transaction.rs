//! Defines the transaction store traits.

use crate::{
    Error,
    categories::CategoryCount,
    transaction::{Transaction, TransactionBuilder, TransactionQuery},
};

/// Reads transactions from one consistent view of a store.
///
/// Every read takes a [TransactionQuery] and only considers the transactions
/// that satisfy it.
pub trait TransactionReader {
    /// Retrieve the transactions selected by `query`, ordered by ID.
    ///
    /// The query's `offset` and `limit` are applied after ordering.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions selected by `query`, ignoring `offset` and `limit`.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error>;

    /// Sum the price of the transactions selected by `query`.
    ///
    /// Returns zero when no transactions are selected.
    fn sum_price(&self, query: &TransactionQuery) -> Result<f64, Error>;

    /// Count the transactions selected by `query` for each category.
    ///
    /// Categories are ordered by name and only categories with at least one
    /// selected transaction are included.
    fn count_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategoryCount>, Error>;
}

/// Handles the bulk import and retrieval of transactions.
///
/// Reads never modify the store. Use [TransactionStore::read] when several
/// reads must agree with each other, e.g. a page and the total it is out of.
pub trait TransactionStore {
    /// Import many transactions at once.
    ///
    /// Either every transaction is stored or, on error, none of them are.
    fn import(&mut self, builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error>;

    /// Run `f` against a view of the store that no import can change until
    /// `f` returns.
    fn read<R>(
        &self,
        f: impl FnOnce(&dyn TransactionReader) -> Result<R, Error>,
    ) -> Result<R, Error>;

    /// See [TransactionReader::get_query].
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        self.read(|reader| reader.get_query(query))
    }

    /// See [TransactionReader::count].
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        self.read(|reader| reader.count(query))
    }

    /// See [TransactionReader::sum_price].
    fn sum_price(&self, query: &TransactionQuery) -> Result<f64, Error> {
        self.read(|reader| reader.sum_price(query))
    }

    /// See [TransactionReader::count_by_category].
    fn count_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategoryCount>, Error> {
        self.read(|reader| reader.count_by_category(query))
    }
}
