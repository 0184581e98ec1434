//! Summary statistics for the sales of a month.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::MonthPredicate,
    stores::{TransactionReader, TransactionStore},
    transaction::TransactionQuery,
};

/// The revenue and number of items sold in a month.
///
/// "Sold" means sold within the requested month and "not sold" means sold in
/// any other month, across the entire store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// The sum of the prices of the items sold in the month.
    pub total_sale_amount: f64,
    /// The number of items sold in the month.
    pub total_sold_items: u64,
    /// The number of items sold outside the month.
    pub total_not_sold_items: u64,
}

/// Compute the [SalesStatistics] for `month`.
///
/// # Errors
/// Returns an error if any of the underlying queries fail.
pub fn get_statistics(
    store: &impl TransactionStore,
    month: MonthPredicate,
) -> Result<SalesStatistics, Error> {
    store.read(|reader| read_statistics(reader, month))
}

/// Compute the [SalesStatistics] for `month` from a single view of a store.
pub(crate) fn read_statistics(
    reader: &dyn TransactionReader,
    month: MonthPredicate,
) -> Result<SalesStatistics, Error> {
    let in_month = TransactionQuery::in_month(month);

    Ok(SalesStatistics {
        total_sale_amount: reader.sum_price(&in_month)?,
        total_sold_items: reader.count(&in_month)?,
        total_not_sold_items: reader.count(&TransactionQuery::outside_month(month))?,
    })
}

/// The state needed for the aggregate views of a month.
#[derive(Debug, Clone)]
pub struct ReportState<T> {
    /// The store to read transactions from.
    pub store: T,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl<T: Clone> FromRef<AppState<T>> for ReportState<T> {
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the aggregate views.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// The name of the month, defaults to the current month.
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolve the requested month, see [MonthPredicate::from_request].
    pub fn predicate(&self, local_timezone: &str) -> Result<MonthPredicate, Error> {
        MonthPredicate::from_request(self.month.as_deref(), local_timezone)
    }
}

/// A route handler for the statistics of a month.
pub async fn get_statistics_endpoint<T>(
    State(state): State<ReportState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SalesStatistics>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = query.predicate(&state.local_timezone)?;

    get_statistics(&state.store, month)
        .inspect_err(|error| tracing::error!("could not compute statistics: {error}"))
        .map(Json)
}
