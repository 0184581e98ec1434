//! Defines the core data model for sales transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database_id::TransactionId;

// ============================================================================
// MODELS
// ============================================================================

/// A product sale, i.e. an item that was sold for `price` on `date_of_sale`.
///
/// To create a new `Transaction`, use [Transaction::build] and hand the
/// builder to a [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The name of the product that was sold.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The amount of money the product sold for.
    pub price: f64,
    /// When the sale happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The product category, e.g. "electronics" or "men's clothing".
    pub category: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            description: String::new(),
            price,
            date_of_sale,
            category: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Builders are also the shape of seed data, so they deserialize from records
/// such as:
///
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven Foldsack No. 1 Backpack",
///   "price": 329.85,
///   "description": "Your perfect pack for everyday use",
///   "category": "men's clothing",
///   "sold": false,
///   "dateOfSale": "2021-11-27T20:29:54+05:30"
/// }
/// ```
///
/// Keys other than the five the builder uses are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBuilder {
    /// The name of the product that was sold.
    pub title: String,

    /// A text description of the product.
    #[serde(default)]
    pub description: String,

    /// The amount of money the product sold for, expected to be non-negative.
    pub price: f64,

    /// When the sale happened.
    ///
    /// Any UTC offset is accepted, the month of the sale is always taken in
    /// UTC (see [month_of_sale](crate::month::month_of_sale)).
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,

    /// The product category.
    #[serde(default)]
    pub category: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Create the [Transaction] stored under `id`.
    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            date_of_sale: self.date_of_sale,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{Transaction, TransactionBuilder};

    #[test]
    fn builder_deserializes_seed_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Foldsack No. 1 Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }"#;

        let got: TransactionBuilder = serde_json::from_str(json).unwrap();

        let want = Transaction::build(
            "Fjallraven Foldsack No. 1 Backpack",
            329.85,
            datetime!(2021-11-27 20:29:54 +05:30),
        )
        .description("Your perfect pack for everyday use")
        .category("men's clothing");
        assert_eq!(want, got);
    }

    #[test]
    fn transaction_serializes_with_camel_case_keys() {
        let transaction = Transaction::build("Lamp", 12.5, datetime!(2022-03-04 05:06:07 UTC))
            .category("home")
            .finalise(7);

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(got["id"], 7);
        assert_eq!(got["title"], "Lamp");
        assert_eq!(got["price"], 12.5);
        assert_eq!(got["dateOfSale"], "2022-03-04T05:06:07Z");
        assert_eq!(got["category"], "home");
    }
}
