//! Data models for auction search requests, listings, and categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback title when no title selector matches.
pub const UNKNOWN_TITLE: &str = "unknown";

/// Fallback link when no anchor is found.
pub const UNKNOWN_LINK: &str = "#";

/// Image used whenever a listing has no absolute image URL.
pub const PLACEHOLDER_IMAGE: &str = "/static/no-image.png";

/// Fallback remaining-time text.
pub const UNKNOWN_TIME: &str = "unknown";

/// Fallback shipping-fee text.
pub const UNDETERMINED_SHIPPING: &str = "undetermined";

/// Fallback title for item detail pages.
pub const NO_TITLE_INFO: &str = "no title information";

/// Key used to sort listings after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Bids,
    Time,
}

impl SortKey {
    /// Returns the site's compact `s1` sort parameter value.
    pub fn site_param(&self) -> &'static str {
        match self {
            SortKey::Price => "cbids",
            SortKey::Bids => "bids",
            SortKey::Time => "end",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "bids" => Ok(SortKey::Bids),
            "time" => Ok(SortKey::Time),
            _ => Err(format!("Unknown sort key: {}. Use: price, bids, time", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Price => write!(f, "price"),
            SortKey::Bids => write!(f, "bids"),
            SortKey::Time => write!(f, "time"),
        }
    }
}

/// Sort direction. Ascending is the implicit default on the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}. Use: asc, desc", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// A normalized search request, echoed back in every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text keyword search
    pub search_query: Option<String>,
    /// Raw category id for category browsing
    pub category: Option<String>,
    /// 1-based page number
    #[serde(rename = "current_page")]
    pub page: u32,
    /// Search completed auctions instead of live ones
    pub closed: bool,
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    /// Only auctions ending within this many hours (live search only)
    pub auction_hours: Option<u32>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            search_query: None,
            category: None,
            page: 1,
            closed: false,
            sort_by: None,
            sort_order: SortOrder::Asc,
            price_min: None,
            price_max: None,
            auction_hours: None,
        }
    }
}

impl SearchRequest {
    /// Creates a keyword search for page 1.
    pub fn query(query: impl Into<String>) -> Self {
        Self { search_query: Some(query.into()), ..Self::default() }
    }

    /// Creates a category browse request for page 1.
    pub fn category(id: impl Into<String>) -> Self {
        Self { category: Some(id.into()), ..Self::default() }
    }

    /// Sets the page, clamping to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Marks the request as a closed-auction search.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the sort key and direction.
    pub fn sorted(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = Some(key);
        self.sort_order = order;
        self
    }

    /// Sets the price bounds.
    pub fn price_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Sets the "ending within N hours" filter.
    pub fn ending_within(mut self, hours: Option<u32>) -> Self {
        self.auction_hours = hours;
        self
    }

    /// Returns the keyword query if it is set and non-empty.
    pub fn keyword(&self) -> Option<&str> {
        self.search_query.as_deref().filter(|q| !q.is_empty())
    }

    /// Returns the category id if it is set and non-empty.
    pub fn category_id(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// True if the request names something to fetch.
    pub fn has_criteria(&self) -> bool {
        self.keyword().is_some() || self.category_id().is_some()
    }
}

/// Parses a raw price bound from user input. Blank input means "no bound".
pub fn parse_price_bound(raw: Option<&str>) -> Result<Option<u64>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| format!("Invalid price bound: '{}'", s)),
    }
}

/// A single auction listing extracted from a results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub link: String,
    /// Current price in yen
    pub price: u64,
    /// Absolute image URL or [`PLACEHOLDER_IMAGE`]
    pub image_url: String,
    /// Free-text remaining time as shown on the page
    pub remaining_time: String,
    pub bid_count: u64,
    /// Free-text shipping fee as shown on the page
    pub shipping_fee: String,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            link: UNKNOWN_LINK.to_string(),
            price: 0,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            remaining_time: UNKNOWN_TIME.to_string(),
            bid_count: 0,
            shipping_fee: UNDETERMINED_SHIPPING.to_string(),
        }
    }
}

impl Item {
    /// True if the image is the placeholder rather than a fetched URL.
    pub fn has_placeholder_image(&self) -> bool {
        self.image_url == PLACEHOLDER_IMAGE
    }
}

/// A category link shown alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Numeric category id
    pub id: String,
    pub name: String,
    pub link: String,
}

/// Complete response for one request. Always well-formed, even on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
    #[serde(flatten)]
    pub request: SearchRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultEnvelope {
    /// Creates a successful envelope.
    pub fn new(request: SearchRequest, items: Vec<Item>, categories: Vec<Category>) -> Self {
        Self { items, categories, request, error: None }
    }

    /// Creates an empty envelope carrying an error message.
    pub fn failed(request: SearchRequest, error: impl Into<String>) -> Self {
        Self { items: Vec::new(), categories: Vec::new(), request, error: Some(error.into()) }
    }

    /// Returns number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items were found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Basic details from a single auction item page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemDetail {
    /// Creates a detail record that only carries the failure.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self { url: url.into(), title: NO_TITLE_INFO.to_string(), error: Some(error.into()) }
    }
}
