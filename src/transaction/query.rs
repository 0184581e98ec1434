//! The storage-neutral description of which transactions to fetch.

use crate::{month::MonthPredicate, search::SearchTerm};

use super::Transaction;

/// Defines how transactions should be selected from a
/// [TransactionStore](crate::stores::TransactionStore).
///
/// All set conditions must hold for a transaction to be selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Select transactions by the month they were sold in.
    pub month: Option<MonthFilter>,
    /// Select transactions matching a free-text search.
    pub search: Option<SearchTerm>,
    /// Select transactions whose price falls within a range.
    pub price_range: Option<PriceRange>,
    /// Skip this many of the selected transactions.
    pub offset: u64,
    /// Return at most this many transactions, `None` returns all of them.
    pub limit: Option<u64>,
}

impl TransactionQuery {
    /// Select the transactions sold in the month chosen by `predicate`.
    pub fn in_month(predicate: MonthPredicate) -> Self {
        Self {
            month: Some(MonthFilter::Matching(predicate)),
            ..Default::default()
        }
    }

    /// Select the transactions sold outside the month chosen by `predicate`.
    pub fn outside_month(predicate: MonthPredicate) -> Self {
        Self {
            month: Some(MonthFilter::NotMatching(predicate)),
            ..Default::default()
        }
    }

    /// Narrow the query with an optional search.
    pub fn search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    /// Narrow the query to a price range.
    pub fn price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Select a window of `limit` transactions starting after `offset`.
    pub fn window(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Whether `transaction` satisfies every condition of the query.
    ///
    /// `offset` and `limit` are not conditions and are ignored here.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let month_matches = self
            .month
            .is_none_or(|month| month.matches(transaction));
        let search_matches = self.search.as_ref().is_none_or(|search| {
            search.matches(
                &transaction.title,
                &transaction.description,
                transaction.price,
            )
        });
        let price_matches = self
            .price_range
            .is_none_or(|range| range.contains(transaction.price));

        month_matches && search_matches && price_matches
    }
}

/// Selects transactions by whether they were sold in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Transactions sold in the month.
    Matching(MonthPredicate),
    /// Transactions sold in any other month.
    ///
    /// The complement of an unrecognised month is every transaction.
    NotMatching(MonthPredicate),
}

impl MonthFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            MonthFilter::Matching(predicate) => predicate.matches(transaction.date_of_sale),
            MonthFilter::NotMatching(predicate) => !predicate.matches(transaction.date_of_sale),
        }
    }
}

/// A half-open price interval `(above, up_to]`, either side may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    /// Exclusive lower bound.
    pub above: Option<f64>,
    /// Inclusive upper bound.
    pub up_to: Option<f64>,
}

impl PriceRange {
    /// Whether `price` lies in the interval.
    pub fn contains(&self, price: f64) -> bool {
        self.above.is_none_or(|above| price > above) && self.up_to.is_none_or(|up_to| price <= up_to)
    }
}
