//! Target URL construction for search, closed-search, and category pages.

use crate::auction::models::{SearchRequest, SortOrder};

/// Default marketplace host.
pub const DEFAULT_BASE_URL: &str = "https://auctions.yahoo.co.jp";

/// Listings per results page. The site accepts this as `n`.
pub const PAGE_SIZE: u32 = 50;

const LIVE_SEARCH_PATH: &str = "/search/search";
const CLOSED_SEARCH_PATH: &str = "/closedsearch/closedsearch";

/// Builds target URLs from search requests.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl QueryBuilder {
    /// Creates a builder against the given host (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a request, or `None` if it names neither a query nor a category.
    ///
    /// A keyword query takes precedence over a category.
    pub fn build(&self, request: &SearchRequest) -> Option<String> {
        if let Some(query) = request.keyword() {
            return Some(self.search_url(query, request));
        }
        request.category_id().map(|id| self.category_url(id, request.page))
    }

    /// Builds the URL for the item-detail variant. Absolute URLs pass through.
    pub fn item_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    fn search_url(&self, query: &str, request: &SearchRequest) -> String {
        // The site expects '+' separators, which then get percent-encoded themselves.
        let encoded = urlencoding::encode(&query.replace(' ', "+")).into_owned();
        let path = if request.closed { CLOSED_SEARCH_PATH } else { LIVE_SEARCH_PATH };

        let mut url = format!("{}{}?p={}&va={}", self.base_url, path, encoded, encoded);

        // Both the current and the legacy parameter names are sent.
        if let Some(min) = request.price_min {
            url.push_str(&format!("&aucminprice={}&min={}", min, min));
        }
        if let Some(max) = request.price_max {
            url.push_str(&format!("&aucmaxprice={}&max={}", max, max));
        }

        if !request.closed {
            if let Some(hours) = request.auction_hours {
                url.push_str(&format!("&auchours={}", hours));
            }
        }

        if let Some(key) = request.sort_by {
            url.push_str("&s1=");
            url.push_str(key.site_param());
            if request.sort_order == SortOrder::Desc {
                url.push_str("&o1=d");
            }
        }

        url.push_str(&format!("&b={}&n={}", page_offset(request.page), PAGE_SIZE));
        url
    }

    fn category_url(&self, id: &str, page: u32) -> String {
        format!("{}/category/{}?p={}", self.base_url, id, page.max(1))
    }
}

/// 1-based index of the first listing on `page`.
pub fn page_offset(page: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(PAGE_SIZE) + 1
}
