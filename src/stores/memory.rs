//! Implements a transaction store that keeps transactions in memory.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use crate::{
    Error,
    categories::CategoryCount,
    stores::{TransactionReader, TransactionStore},
    transaction::{Transaction, TransactionBuilder, TransactionQuery},
};

/// Stores transactions in a vector shared between clones of the store.
///
/// Selects exactly the same transactions as
/// [SQLiteTransactionStore](crate::stores::SQLiteTransactionStore), which
/// makes it a drop-in replacement when a database is not wanted, e.g. in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn import(&mut self, builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error> {
        let mut transactions = self
            .transactions
            .write()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let first_id = transactions.last().map_or(1, |last| last.id + 1);
        let imported: Vec<Transaction> = builders
            .into_iter()
            .zip(first_id..)
            .map(|(builder, id)| builder.finalise(id))
            .collect();

        transactions.extend(imported.iter().cloned());

        Ok(imported)
    }

    /// Holds the read lock while `f` runs, so imports wait for it to finish.
    fn read<R>(
        &self,
        f: impl FnOnce(&dyn TransactionReader) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let transactions = self
            .transactions
            .read()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        f(&Snapshot {
            transactions: &transactions,
        })
    }
}

/// The transactions of an [InMemoryTransactionStore] while its read lock is held.
struct Snapshot<'a> {
    transactions: &'a [Transaction],
}

impl Snapshot<'_> {
    fn matching<'s>(
        &'s self,
        query: &'s TransactionQuery,
    ) -> impl Iterator<Item = &'s Transaction> {
        self.transactions
            .iter()
            .filter(move |transaction| query.matches(transaction))
    }
}

impl TransactionReader for Snapshot<'_> {
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(self
            .matching(query)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        Ok(self.matching(query).count() as u64)
    }

    fn sum_price(&self, query: &TransactionQuery) -> Result<f64, Error> {
        Ok(self
            .matching(query)
            .fold(0.0, |total, transaction| total + transaction.price))
    }

    fn count_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategoryCount>, Error> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

        for transaction in self.matching(query) {
            *counts.entry(transaction.category.as_str()).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount::new(category, count))
            .collect())
    }
}
