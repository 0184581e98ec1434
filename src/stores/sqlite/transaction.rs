//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::UtcOffset;

use crate::{
    Error,
    categories::CategoryCount,
    db::{CreateTable, MapRow},
    month::{MonthPredicate, month_of_sale},
    stores::{TransactionReader, TransactionStore},
    transaction::{MonthFilter, Transaction, TransactionBuilder, TransactionQuery},
};

/// Stores transactions in a SQLite database.
///
/// Each row also records the month of the sale and the lowercased title and
/// description, so that queries compare plain columns instead of converting
/// dates and text on every request. These are derived in Rust so that they
/// agree with [InMemoryTransactionStore](crate::stores::InMemoryTransactionStore).
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The database must have been set up with [initialize](crate::db::initialize).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Import many transactions inside a single SQL transaction.
    ///
    /// Sale dates are stored in UTC.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error, in which case no
    /// transactions are imported.
    fn import(&mut self, builders: Vec<TransactionBuilder>) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock_connection()?;

        let tx = connection.unchecked_transaction()?;
        let mut imported_transactions = Vec::with_capacity(builders.len());

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(
            "INSERT INTO \"transaction\"
                (title, description, price, date_of_sale, category, sale_month, title_lower, description_lower)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, title, description, price, date_of_sale, category",
        )?;

        for builder in builders {
            let sale_month = u8::from(month_of_sale(builder.date_of_sale));
            let title_lower = builder.title.to_lowercase();
            let description_lower = builder.description.to_lowercase();

            let transaction = stmt.query_row(
                (
                    builder.title,
                    builder.description,
                    builder.price,
                    builder.date_of_sale.to_offset(UtcOffset::UTC),
                    builder.category,
                    sale_month,
                    title_lower,
                    description_lower,
                ),
                Self::map_row,
            )?;

            imported_transactions.push(transaction);
        }

        drop(stmt);

        tx.commit()?;
        Ok(imported_transactions)
    }

    /// Run `f` inside one SQL transaction while holding the connection lock.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] if the lock is poisoned, an
    /// [Error::SqlError] if the SQL transaction cannot be started, or the
    /// error returned by `f`.
    fn read<R>(
        &self,
        f: impl FnOnce(&dyn TransactionReader) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let connection = self.lock_connection()?;
        let tx = connection.unchecked_transaction()?;

        let result = f(&SQLiteReader { connection: &tx })?;

        tx.commit()?;
        Ok(result)
    }
}

/// Runs the read queries of a [SQLiteTransactionStore] on a locked connection.
struct SQLiteReader<'a> {
    connection: &'a Connection,
}

impl TransactionReader for SQLiteReader<'_> {
    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let (where_clause, parameters) = build_where_clause(query);

        let mut query_string_parts = vec![
            "SELECT id, title, description, price, date_of_sale, category FROM \"transaction\""
                .to_owned(),
            where_clause,
            "ORDER BY id ASC".to_owned(),
        ];

        // SQLite only accepts an offset together with a limit, -1 means no limit.
        let offset = to_sql_integer(query.offset);
        match query.limit {
            Some(limit) => {
                query_string_parts.push(format!("LIMIT {} OFFSET {offset}", to_sql_integer(limit)))
            }
            None if offset > 0 => query_string_parts.push(format!("LIMIT -1 OFFSET {offset}")),
            None => {}
        }

        let query_string = query_string_parts.join(" ");

        self.connection
            .prepare(&query_string)?
            .query_map(
                params_from_iter(parameters.iter()),
                SQLiteTransactionStore::map_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Count the transactions matching `query`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let (where_clause, parameters) = build_where_clause(query);
        let query_string = format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}");

        let count: i64 = self.connection.query_row(
            &query_string,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(count as u64)
    }

    /// Sum the price of the transactions matching `query`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn sum_price(&self, query: &TransactionQuery) -> Result<f64, Error> {
        let (where_clause, parameters) = build_where_clause(query);
        // TOTAL returns 0.0 instead of NULL when there are no rows.
        let query_string = format!("SELECT TOTAL(price) FROM \"transaction\" {where_clause}");

        self.connection
            .query_row(
                &query_string,
                params_from_iter(parameters.iter()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    /// Count the transactions matching `query` per category.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategoryCount>, Error> {
        let (where_clause, parameters) = build_where_clause(query);
        let query_string = format!(
            "SELECT category, COUNT(id) FROM \"transaction\" {where_clause} \
            GROUP BY category ORDER BY category ASC"
        );

        self.connection
            .prepare(&query_string)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                let category = row.get(0)?;
                let count: i64 = row.get(1)?;

                Ok(CategoryCount {
                    category,
                    count: count as u64,
                })
            })?
            .map(|maybe_count| maybe_count.map_err(Error::SqlError))
            .collect()
    }
}

/// Translate the conditions of `query` into a `WHERE` clause and its parameters.
///
/// Returns an empty clause if the query has no conditions.
fn build_where_clause(query: &TransactionQuery) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut parameters = Vec::new();

    match query.month {
        Some(MonthFilter::Matching(MonthPredicate::Month(month))) => {
            parameters.push(Value::Integer(u8::from(month).into()));
            conditions.push(format!("sale_month = ?{}", parameters.len()));
        }
        Some(MonthFilter::NotMatching(MonthPredicate::Month(month))) => {
            parameters.push(Value::Integer(u8::from(month).into()));
            conditions.push(format!("sale_month != ?{}", parameters.len()));
        }
        Some(MonthFilter::Matching(MonthPredicate::Unrecognized)) => {
            conditions.push("0 = 1".to_owned());
        }
        Some(MonthFilter::NotMatching(MonthPredicate::Unrecognized)) | None => {}
    }

    if let Some(search) = &query.search {
        parameters.push(Value::Text(search.text().to_owned()));
        let text_parameter = parameters.len();

        let mut search_conditions = vec![
            format!("instr(title_lower, ?{text_parameter}) > 0"),
            format!("instr(description_lower, ?{text_parameter}) > 0"),
        ];

        if let Some(price) = search.price() {
            parameters.push(Value::Real(price));
            search_conditions.push(format!("price = ?{}", parameters.len()));
        }

        conditions.push(format!("({})", search_conditions.join(" OR ")));
    }

    if let Some(price_range) = query.price_range {
        if let Some(above) = price_range.above {
            parameters.push(Value::Real(above));
            conditions.push(format!("price > ?{}", parameters.len()));
        }

        if let Some(up_to) = price_range.up_to {
            parameters.push(Value::Real(up_to));
            conditions.push(format!("price <= ?{}", parameters.len()));
        }
    }

    if conditions.is_empty() {
        (String::new(), parameters)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), parameters)
    }
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL,
                    date_of_sale TEXT NOT NULL,
                    category TEXT NOT NULL,
                    sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                    title_lower TEXT NOT NULL,
                    description_lower TEXT NOT NULL
                    )",
            (),
        )?;

        // Month predicates are evaluated on every request.
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_sale_month ON \"transaction\"(sale_month, category);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let title = row.get(offset + 1)?;
        let description = row.get(offset + 2)?;
        let price = row.get(offset + 3)?;
        let date_of_sale = row.get(offset + 4)?;
        let category = row.get(offset + 5)?;

        Ok(Transaction {
            id,
            title,
            description,
            price,
            date_of_sale,
            category,
        })
    }
}
