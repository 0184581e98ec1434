//! Counts the sales of a month per price range, i.e. the data for a bar chart.

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
    transaction::{PriceRange, TransactionQuery},
};

/// A fixed price interval of the histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label reported for the bucket.
    pub label: &'static str,
    /// The prices that fall into the bucket.
    pub range: PriceRange,
}

const fn bucket(label: &'static str, above: Option<f64>, up_to: Option<f64>) -> PriceBucket {
    PriceBucket {
        label,
        range: PriceRange { above, up_to },
    }
}

/// The price buckets in the order they are reported.
///
/// Buckets are contiguous: each covers `(above, up_to]`. The first bucket has
/// no lower bound so that free items are still counted, and the last has no
/// upper bound.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    bucket("0-100", None, Some(100.0)),
    bucket("101-200", Some(100.0), Some(200.0)),
    bucket("201-300", Some(200.0), Some(300.0)),
    bucket("301-400", Some(300.0), Some(400.0)),
    bucket("401-500", Some(400.0), Some(500.0)),
    bucket("501-600", Some(500.0), Some(600.0)),
    bucket("601-700", Some(600.0), Some(700.0)),
    bucket("701-800", Some(700.0), Some(800.0)),
    bucket("801-900", Some(800.0), Some(900.0)),
    bucket("901-above", Some(900.0), None),
];

/// The number of sales in one price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// The bucket label, e.g. "101-200".
    pub range: String,
    /// The number of sales in the month within the bucket.
    pub count: u64,
}

/// Count the sales of `month` in each of the [PRICE_BUCKETS].
///
/// Every bucket is reported, in order, including the empty ones.
///
/// # Errors
/// Returns an error if the count for any bucket fails, no partial histogram
/// is returned.
pub fn get_histogram(
    store: &impl TransactionStore,
    month: MonthPredicate,
) -> Result<Vec<HistogramBucket>, Error> {
    store.read(|reader| read_histogram(reader, month))
}

/// Count the sales of `month` per bucket from a single view of a store.
pub(crate) fn read_histogram(
    reader: &dyn TransactionReader,
    month: MonthPredicate,
) -> Result<Vec<HistogramBucket>, Error> {
    PRICE_BUCKETS
        .iter()
        .map(|bucket| -> Result<HistogramBucket, Error> {
            let query = TransactionQuery::in_month(month).price_range(bucket.range);

            Ok(HistogramBucket {
                range: bucket.label.to_owned(),
                count: reader.count(&query)?,
            })
        })
        .collect()
}

/// A route handler for the price histogram of a month.
pub async fn get_histogram_endpoint<T>(
    State(state): State<ReportState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<HistogramBucket>>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = query.predicate(&state.local_timezone)?;

    get_histogram(&state.store, month)
        .inspect_err(|error| tracing::error!("could not compute histogram: {error}"))
        .map(Json)
}
