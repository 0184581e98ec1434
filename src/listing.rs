//! Lists the transactions of a month one page at a time.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::MonthPredicate,
    pagination::{PageRequest, PaginationConfig},
    search::SearchTerm,
    stores::TransactionStore,
    transaction::{Transaction, TransactionQuery},
};

/// One page of the transactions matching a month and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The number of matching transactions across all pages.
    pub total: u64,
    /// The requested page number.
    pub page: u64,
    /// The number of pages needed to show every matching transaction.
    pub total_pages: u64,
}

/// Get one page of the transactions sold in `month` that match `search`.
///
/// Requesting a page past the last page returns an empty page.
///
/// # Errors
/// Returns an error if the store could not be queried.
pub fn list_transactions(
    store: &impl TransactionStore,
    month: MonthPredicate,
    page_request: PageRequest,
    search: Option<SearchTerm>,
) -> Result<TransactionPage, Error> {
    let query = TransactionQuery::in_month(month).search(search);
    let page_query = query
        .clone()
        .window(page_request.offset(), page_request.limit);

    // The total and the page are read together so that they always agree.
    store.read(|reader| {
        let total = reader.count(&query)?;
        let transactions = reader.get_query(&page_query)?;

        Ok(TransactionPage {
            transactions,
            total,
            page: page_request.page,
            total_pages: page_request.page_count(total),
        })
    })
}

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct ListingState<T> {
    /// The store to read transactions from.
    pub store: T,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls the default page and page size.
    pub pagination_config: PaginationConfig,
}

impl<T: Clone> FromRef<AppState<T>> for ListingState<T> {
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for listing transactions.
///
/// Numbers are kept as strings so that malformed values can fall back to
/// their defaults instead of rejecting the request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListingQuery {
    /// The name of the month, defaults to the current month.
    pub month: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub limit: Option<String>,
    /// Text to look for in titles and descriptions, or a price.
    pub search: Option<String>,
}

/// A route handler for listing a page of transactions as JSON.
pub async fn get_transactions_endpoint<T>(
    State(state): State<ListingState<T>>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<TransactionPage>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let month = MonthPredicate::from_request(query.month.as_deref(), &state.local_timezone)?;
    let page_request = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        &state.pagination_config,
    );
    let search = SearchTerm::new(query.search.as_deref());

    list_transactions(&state.store, month, page_request, search)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))
        .map(Json)
}
