//! Bulk import of seed transactions.
//!
//! Seed data is a JSON array of product sales, see [TransactionBuilder] for
//! the shape of each record.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    stores::TransactionStore,
    transaction::{Transaction, TransactionBuilder},
};

/// Parse a JSON array of seed records.
///
/// # Errors
/// Returns [Error::InvalidSeedData] if `json` is not an array of valid
/// records, or if a record has a negative price.
pub fn parse_seed_data(json: &str) -> Result<Vec<TransactionBuilder>, Error> {
    let builders: Vec<TransactionBuilder> =
        serde_json::from_str(json).map_err(|error| Error::InvalidSeedData(error.to_string()))?;

    if let Some(builder) = builders.iter().find(|builder| builder.price < 0.0) {
        return Err(Error::InvalidSeedData(format!(
            "\"{}\" has a negative price of {}",
            builder.title, builder.price
        )));
    }

    Ok(builders)
}

/// Store every builder in `store` as one all-or-nothing batch.
///
/// # Errors
/// Returns an error if the store rejects the batch, in which case nothing is
/// imported.
pub fn import_transactions(
    store: &mut impl TransactionStore,
    builders: Vec<TransactionBuilder>,
) -> Result<Vec<Transaction>, Error> {
    let start_time = std::time::Instant::now();
    let count = builders.len();

    let imported = store.import(builders)?;

    tracing::info!(
        "Imported {} of {count} transactions in {:.2?}",
        imported.len(),
        start_time.elapsed()
    );

    Ok(imported)
}

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct ImportState<T> {
    /// The store to import transactions into.
    pub store: T,
}

impl<T: Clone> FromRef<AppState<T>> for ImportState<T> {
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The response to a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// The number of transactions that were stored.
    pub imported: usize,
}

/// Route handler for initializing the store with seed data from the request body.
pub async fn import_endpoint<T>(
    State(state): State<ImportState<T>>,
    body: String,
) -> Result<Json<ImportSummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let builders = parse_seed_data(&body)
        .inspect_err(|error| tracing::debug!("Failed to parse seed data: {error}"))?;

    let mut store = state.store;
    let imported = import_transactions(&mut store, builders)
        .inspect_err(|error| tracing::error!("Failed to import transactions: {error}"))?;

    Ok(Json(ImportSummary {
        imported: imported.len(),
    }))
}
