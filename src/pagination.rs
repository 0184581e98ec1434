//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of items on a page, always greater than zero.
    pub limit: u64,
}

impl PageRequest {
    /// Parse the raw `page` and `limit` query parameters.
    ///
    /// Values that are missing, not whole numbers, or less than one are
    /// replaced with the defaults from `config` instead of being rejected.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, config: &PaginationConfig) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(config.default_page.max(1)),
            limit: parse_positive(limit).unwrap_or(config.default_page_size.max(1)),
        }
    }

    /// The number of items before the start of this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// The number of pages needed to show `total` items, zero when there are no items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value?.trim().parse::<u64>().ok().filter(|&value| value > 0)
}
