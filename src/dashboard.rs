//! Combines the aggregate views of a month into a single response.
//!
//! A dashboard shows the statistics, the price histogram and the category
//! distribution side by side, so they are served together to save the client
//! three round trips.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    categories::{CategoryCount, read_category_distribution},
    histogram::{HistogramBucket, read_histogram},
    month::MonthPredicate,
    statistics::{MonthQuery, ReportState, SalesStatistics, read_statistics},
    stores::TransactionStore,
};

/// Every aggregate view of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The name of the month, `None` if the requested month was not recognised.
    pub month: Option<String>,
    /// See [get_statistics](crate::statistics::get_statistics).
    pub statistics: SalesStatistics,
    /// See [get_histogram](crate::histogram::get_histogram).
    pub histogram: Vec<HistogramBucket>,
    /// See [get_category_distribution](crate::categories::get_category_distribution).
    pub categories: Vec<CategoryCount>,
}

/// Compute every aggregate view for `month`.
///
/// All three views are read from the same state of the store, so the
/// histogram and category counts always add up to the number of items sold.
///
/// # Errors
/// Returns an error if any aggregate fails, no partial summary is returned.
pub fn get_dashboard_summary(
    store: &impl TransactionStore,
    month: MonthPredicate,
) -> Result<DashboardSummary, Error> {
    let month_name = match month {
        MonthPredicate::Month(month) => Some(month.to_string()),
        MonthPredicate::Unrecognized => None,
    };

    store.read(|reader| {
        Ok(DashboardSummary {
            month: month_name,
            statistics: read_statistics(reader, month)?,
            histogram: read_histogram(reader, month)?,
            categories: read_category_distribution(reader, month)?,
        })
    })
}

/// A route handler for the dashboard summary of a month.
pub async fn get_dashboard_endpoint<T>(
    State(state): State<ReportState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DashboardSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = query.predicate(&state.local_timezone)?;

    get_dashboard_summary(&state.store, month)
        .inspect_err(|error| tracing::error!("could not compute dashboard summary: {error}"))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use axum_test::TestServer;
    use time::macros::datetime;

    use crate::{
        AppState, build_router, endpoints,
        categories::CategoryCount,
        month::MonthPredicate,
        stores::{InMemoryTransactionStore, TransactionStore},
        test_utils::march_and_april_store,
        transaction::Transaction,
    };

    use super::{DashboardSummary, get_dashboard_summary};

    #[test]
    fn summary_for_march() {
        let store = march_and_april_store();

        let got = get_dashboard_summary(&store, MonthPredicate::parse("march")).unwrap();

        assert_eq!(got.month.as_deref(), Some("March"));
        assert_eq!(got.statistics.total_sale_amount, 150.0);
        assert_eq!(got.histogram[1].count, 1);
        assert_eq!(got.categories, [CategoryCount::new("Electronics", 1)]);
    }

    #[test]
    fn unrecognized_month_has_no_name() {
        let store = march_and_april_store();

        let got = get_dashboard_summary(&store, MonthPredicate::parse("Marchx")).unwrap();

        assert_eq!(got.month, None);
        assert_eq!(got.statistics.total_sold_items, 0);
        assert!(got.categories.is_empty());
    }

    #[test]
    fn summary_is_consistent_during_imports() {
        let store = InMemoryTransactionStore::new();
        let march = MonthPredicate::parse("March");

        thread::scope(|scope| {
            let mut writer = store.clone();
            scope.spawn(move || {
                for i in 0..200 {
                    writer
                        .import(vec![
                            Transaction::build(
                                "Kettle",
                                f64::from(i),
                                datetime!(2021-03-05 08:00 UTC),
                            )
                            .category("kitchen"),
                            Transaction::build("Scarf", 25.0, datetime!(2021-09-05 08:00 UTC))
                                .category("clothing"),
                        ])
                        .unwrap();
                }
            });

            for _ in 0..200 {
                let got = get_dashboard_summary(&store, march).unwrap();

                let sold = got.statistics.total_sold_items;
                let histogram_total: u64 =
                    got.histogram.iter().map(|bucket| bucket.count).sum();
                let category_total: u64 =
                    got.categories.iter().map(|category| category.count).sum();
                assert_eq!(histogram_total, sold);
                assert_eq!(category_total, sold);
                assert_eq!(got.statistics.total_not_sold_items, sold);
            }
        });
    }

    #[tokio::test]
    async fn endpoint_returns_summary() {
        let state = AppState::new(march_and_april_store(), "Etc/UTC", Default::default());
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let response = server
            .get(endpoints::DASHBOARD_API)
            .add_query_param("month", "April")
            .await;

        response.assert_status_ok();
        let got = response.json::<DashboardSummary>();
        assert_eq!(got.month.as_deref(), Some("April"));
        assert_eq!(got.statistics.total_sold_items, 1);
        assert_eq!(got.statistics.total_not_sold_items, 1);
        assert_eq!(got.categories, [CategoryCount::new("Toys", 1)]);
    }
}
