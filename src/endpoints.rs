//! The API endpoints URIs.

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route for initializing the store with seed data.
pub const INIT_API: &str = "/api/init";
/// The route for listing a page of the transactions of a month.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the sales statistics of a month.
pub const STATISTICS_API: &str = "/api/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART_API: &str = "/api/barchart";
/// The route for the category distribution of a month.
pub const PIE_CHART_API: &str = "/api/piechart";
/// The route for every aggregate view of a month at once.
pub const DASHBOARD_API: &str = "/api/dashboard";
