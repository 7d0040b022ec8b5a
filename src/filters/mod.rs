//! Post-fetch filtering and sorting of extracted listings.

pub mod price;
pub mod sort;

use crate::auction::{Item, SearchRequest};
use tracing::debug;

pub use price::PriceFilter;
pub use sort::sort_items;

/// Trait for filtering items.
pub trait Filter: Send + Sync {
    /// Returns true if the item passes the filter.
    fn matches(&self, item: &Item) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if an item passes all filters.
    pub fn matches(&self, item: &Item) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Filters a collection of items, keeping their order.
    pub fn apply(&self, items: Vec<Item>) -> Vec<Item> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from a request.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-filters items locally by the request's price bounds, then sorts them.
///
/// The site's own price filtering is not exact, so bounds are always
/// enforced here as well.
pub fn apply_post_fetch(items: Vec<Item>, request: &SearchRequest) -> Vec<Item> {
    let filters =
        FilterChainBuilder::new().price_range(request.price_min, request.price_max).build();

    if !filters.is_empty() {
        debug!("Applying filters: {}", filters.descriptions().join(", "));
    }

    let mut items = filters.apply(items);

    if let Some(key) = request.sort_by {
        sort_items(&mut items, key, request.sort_order);
    }

    items
}
