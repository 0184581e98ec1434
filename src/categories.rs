//! Counts the sales of a month per category, i.e. the data for a pie chart.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::MonthPredicate,
    statistics::{MonthQuery, ReportState},
    stores::{TransactionReader, TransactionStore},
    transaction::TransactionQuery,
};

/// The number of sales in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of sales in the category.
    pub count: u64,
}

impl CategoryCount {
    /// Create a count for `category`.
    pub fn new(category: &str, count: u64) -> Self {
        Self {
            category: category.to_owned(),
            count,
        }
    }
}

/// Count the sales of `month` per category.
///
/// Only categories with at least one sale in the month are included, ordered
/// by category name.
///
/// # Errors
/// Returns an error if the store could not be queried.
pub fn get_category_distribution(
    store: &impl TransactionStore,
    month: MonthPredicate,
) -> Result<Vec<CategoryCount>, Error> {
    store.read(|reader| read_category_distribution(reader, month))
}

/// Count the sales of `month` per category from a single view of a store.
pub(crate) fn read_category_distribution(
    reader: &dyn TransactionReader,
    month: MonthPredicate,
) -> Result<Vec<CategoryCount>, Error> {
    reader.count_by_category(&TransactionQuery::in_month(month))
}

/// A route handler for the category distribution of a month.
pub async fn get_category_distribution_endpoint<T>(
    State(state): State<ReportState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = query.predicate(&state.local_timezone)?;

    get_category_distribution(&state.store, month)
        .inspect_err(|error| tracing::error!("could not compute category distribution: {error}"))
        .map(Json)
}
