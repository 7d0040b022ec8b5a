//! Price range filter.

use super::Filter;
use crate::auction::Item;

/// Filters items by price range. Bounds are inclusive.
pub struct PriceFilter {
    min: Option<u64>,
    max: Option<u64>,
}

impl PriceFilter {
    /// Creates a new price filter with optional min/max bounds.
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, item: &Item) -> bool {
        // Unparsable prices are 0 and are judged like any other price.
        if let Some(min) = self.min {
            if item.price < min {
                return false;
            }
        }

        if let Some(max) = self.max {
            if item.price > max {
                return false;
            }
        }

        true
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Price: ¥{} - ¥{}", min, max),
            (Some(min), None) => format!("Price: >= ¥{}", min),
            (None, Some(max)) => format!("Price: <= ¥{}", max),
            (None, None) => "Price: any".to_string(),
        }
    }
}
