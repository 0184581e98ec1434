//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    categories::get_category_distribution_endpoint,
    dashboard::get_dashboard_endpoint,
    endpoints,
    histogram::get_histogram_endpoint,
    import::import_endpoint,
    listing::get_transactions_endpoint,
    statistics::get_statistics_endpoint,
    stores::TransactionStore,
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::INIT_API, post(import_endpoint::<T>))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions_endpoint::<T>))
        .route(endpoints::STATISTICS_API, get(get_statistics_endpoint::<T>))
        .route(endpoints::BAR_CHART_API, get(get_histogram_endpoint::<T>))
        .route(
            endpoints::PIE_CHART_API,
            get(get_category_distribution_endpoint::<T>),
        )
        .route(endpoints::DASHBOARD_API, get(get_dashboard_endpoint::<T>))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}
