//! Contains the trait and implementations for objects that store [transactions](crate::transaction).

mod memory;
mod transaction;

pub mod sqlite;

pub use memory::InMemoryTransactionStore;
pub use sqlite::SQLiteTransactionStore;
pub use transaction::{TransactionReader, TransactionStore};

#[cfg(test)]
mod store_contract_tests {
    //! Checks that every store implementation selects the same transactions.

    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        categories::CategoryCount,
        db::initialize,
        month::MonthPredicate,
        search::SearchTerm,
        transaction::{PriceRange, Transaction, TransactionQuery},
    };

    use super::{InMemoryTransactionStore, SQLiteTransactionStore, TransactionStore};

    fn sqlite_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    fn seed(store: &mut impl TransactionStore) -> Vec<Transaction> {
        store
            .import(vec![
                Transaction::build("Desk Lamp", 45.5, datetime!(2021-03-02 10:00 UTC))
                    .description("A bright LED lamp")
                    .category("home"),
                Transaction::build("Backpack", 150.0, datetime!(2022-03-20 18:30 UTC))
                    .description("Fits a 15 inch laptop")
                    .category("bags"),
                Transaction::build("Phone", 999.0, datetime!(2021-03-28 08:00 UTC))
                    .description("Unlocked smartphone")
                    .category("electronics"),
                Transaction::build("Charger", 150.0, datetime!(2021-04-01 09:00 UTC))
                    .description("USB-C phone charger")
                    .category("electronics"),
                Transaction::build("Lampshade", 20.0, datetime!(2021-11-11 11:11 UTC))
                    .category("home"),
            ])
            .expect("Could not import transactions")
    }

    fn check_contract(store: &mut impl TransactionStore) {
        let imported = seed(store);
        assert_eq!(imported.len(), 5);

        let all = store.get_query(&TransactionQuery::default()).unwrap();
        assert_eq!(all, imported, "stores should return transactions in ID order");

        let march = TransactionQuery::in_month(MonthPredicate::parse("March"));
        let got: Vec<_> = store
            .get_query(&march)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.title)
            .collect();
        assert_eq!(got, ["Desk Lamp", "Backpack", "Phone"]);
        assert_eq!(store.count(&march).unwrap(), 3);
        assert_eq!(store.sum_price(&march).unwrap(), 1194.5);

        let not_march = TransactionQuery::outside_month(MonthPredicate::parse("March"));
        assert_eq!(store.count(&not_march).unwrap(), 2);

        let unrecognized = TransactionQuery::in_month(MonthPredicate::Unrecognized);
        assert_eq!(store.count(&unrecognized).unwrap(), 0);
        assert_eq!(store.sum_price(&unrecognized).unwrap(), 0.0);
        assert_eq!(
            store
                .count(&TransactionQuery::outside_month(MonthPredicate::Unrecognized))
                .unwrap(),
            5
        );

        let lamp_search =
            TransactionQuery::default().search(SearchTerm::new(Some("LAMP")));
        assert_eq!(store.count(&lamp_search).unwrap(), 2);

        let description_search =
            TransactionQuery::default().search(SearchTerm::new(Some("laptop")));
        assert_eq!(store.count(&description_search).unwrap(), 1);

        let price_search = TransactionQuery::in_month(MonthPredicate::parse("march"))
            .search(SearchTerm::new(Some("150")));
        let got = store.get_query(&price_search).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Backpack");

        let wildcard_search = TransactionQuery::default().search(SearchTerm::new(Some("%")));
        assert_eq!(store.count(&wildcard_search).unwrap(), 0);

        let cheap = TransactionQuery::default().price_range(PriceRange {
            above: None,
            up_to: Some(100.0),
        });
        assert_eq!(store.count(&cheap).unwrap(), 2);

        let window = TransactionQuery::default().window(1, 2);
        let got: Vec<_> = store
            .get_query(&window)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(got, [imported[1].id, imported[2].id]);
        assert_eq!(store.count(&window).unwrap(), 5, "count should ignore the window");

        let past_end = TransactionQuery::default().window(10, 2);
        assert!(store.get_query(&past_end).unwrap().is_empty());

        let by_category = store.count_by_category(&march).unwrap();
        assert_eq!(
            by_category,
            [
                CategoryCount::new("bags", 1),
                CategoryCount::new("electronics", 1),
                CategoryCount::new("home", 1),
            ]
        );
        assert!(store.count_by_category(&unrecognized).unwrap().is_empty());

        let word_start_search =
            TransactionQuery::default().search(SearchTerm::new(Some(" lamp")));
        let got: Vec<_> = store
            .get_query(&word_start_search)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.title)
            .collect();
        assert_eq!(got, ["Desk Lamp"]);

        let (page, total) = store
            .read(|reader| {
                let total = reader.count(&march)?;
                let page = reader.get_query(&march.clone().window(0, 2))?;

                Ok((page, total))
            })
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(total, 3);
    }

    fn check_non_ascii_search(store: &mut impl TransactionStore) {
        store
            .import(vec![
                Transaction::build("ÉCLAIR BOX", 12.0, datetime!(2021-06-01 10:00 UTC))
                    .description("Crème pâtissière filling")
                    .category("bakery"),
                Transaction::build("Straße sign", 30.0, datetime!(2021-06-02 10:00 UTC))
                    .category("home"),
            ])
            .expect("Could not import transactions");

        for (term, want) in [
            ("ÉCLAIR", 1),
            ("éclair box", 1),
            ("CRÈME", 1),
            ("PÂTISSIÈRE", 1),
            ("straße", 1),
            ("eclair", 0),
        ] {
            let query = TransactionQuery::default().search(SearchTerm::new(Some(term)));

            assert_eq!(store.count(&query).unwrap(), want, "search for {term:?}");
        }
    }

    #[test]
    fn sqlite_store_satisfies_contract() {
        check_contract(&mut sqlite_store());
    }

    #[test]
    fn in_memory_store_satisfies_contract() {
        check_contract(&mut InMemoryTransactionStore::new());
    }

    #[test]
    fn sqlite_store_searches_non_ascii_text() {
        check_non_ascii_search(&mut sqlite_store());
    }

    #[test]
    fn in_memory_store_searches_non_ascii_text() {
        check_non_ascii_search(&mut InMemoryTransactionStore::new());
    }
}
