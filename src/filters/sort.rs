//! Post-fetch ordering of listings.

use crate::auction::{Item, SortKey, SortOrder};
use std::cmp::Ordering;

/// Compares two items by a sort key, ascending.
///
/// Remaining time compares as text, so "10時間" sorts before "2日".
pub fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Bids => a.bid_count.cmp(&b.bid_count),
        SortKey::Time => a.remaining_time.cmp(&b.remaining_time),
    }
}

/// Stable-sorts items in place. Items with equal keys keep their page order
/// in both directions.
pub fn sort_items(items: &mut [Item], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Desc => items.sort_by(|a, b| compare(b, a, key)),
    }
}
