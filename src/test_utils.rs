#![allow(missing_docs)]

use time::macros::datetime;

use crate::{
    stores::{InMemoryTransactionStore, TransactionStore},
    transaction::Transaction,
};

/// A store with one March sale for 150 in "Electronics" and one April sale
/// for 50 in "Toys".
pub(crate) fn march_and_april_store() -> InMemoryTransactionStore {
    let mut store = InMemoryTransactionStore::new();

    store
        .import(vec![
            Transaction::build("Headphones", 150.0, datetime!(2021-03-10 10:00 UTC))
                .description("Noise cancelling")
                .category("Electronics"),
            Transaction::build("Yo-yo", 50.0, datetime!(2021-04-02 15:30 UTC))
                .description("Classic wooden toy")
                .category("Toys"),
        ])
        .expect("Could not import test transactions");

    store
}
