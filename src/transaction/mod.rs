//! Sales transactions and the queries used to select them.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - `TransactionQuery`, the storage-neutral description of a selection

mod core;
mod query;

pub use self::core::{Transaction, TransactionBuilder};
pub use self::query::{MonthFilter, PriceRange, TransactionQuery};
