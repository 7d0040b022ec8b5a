//! Ordered CSS selector fallback chains for auction HTML parsing.
//!
//! Each chain lists the current markup first and older or looser markup
//! after it. The site serves different markup to different page types and
//! experiment cohorts, so order matters: the first selector that yields data
//! wins.
//!
//! **Update process**: When a field starts falling back, capture an HTML
//! sample, prepend the new selector to the chain, and add a test fixture.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::warn;

/// An ordered list of selectors tried until one yields data.
pub struct SelectorChain {
    selectors: Vec<(&'static str, Selector)>,
}

impl SelectorChain {
    /// Compiles a chain. Selectors that fail to parse are logged and left out.
    pub fn new(sources: &[&'static str]) -> Self {
        let selectors = sources
            .iter()
            .filter_map(|source| match Selector::parse(source) {
                Ok(selector) => Some((*source, selector)),
                Err(e) => {
                    warn!("Failed to compile selector '{}': {}", source, e);
                    None
                }
            })
            .collect();

        Self { selectors }
    }

    /// Returns the selector sources in priority order.
    pub fn sources(&self) -> Vec<&'static str> {
        self.selectors.iter().map(|(source, _)| *source).collect()
    }

    /// Returns every match of the first selector that matches anything in the document.
    pub fn select_all<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for (_, selector) in &self.selectors {
            let matches: Vec<_> = document.select(selector).collect();
            if !matches.is_empty() {
                return matches;
            }
        }
        Vec::new()
    }

    /// Returns the trimmed text of the first match with non-empty text.
    pub fn text(&self, scope: ElementRef) -> Option<String> {
        self.selectors.iter().find_map(|(_, selector)| {
            let element = scope.select(selector).next()?;
            non_empty(element_text(element))
        })
    }

    /// Returns an attribute of the first match carrying a non-empty value.
    pub fn attr(&self, scope: ElementRef, name: &str) -> Option<String> {
        self.selectors.iter().find_map(|(_, selector)| {
            let value = scope.select(selector).next()?.value().attr(name)?;
            non_empty(value.trim().to_string())
        })
    }

    /// Like [`SelectorChain::text`], scoped to the whole document.
    pub fn document_text(&self, document: &Html) -> Option<String> {
        self.selectors.iter().find_map(|(_, selector)| {
            let element = document.select(selector).next()?;
            non_empty(element_text(element))
        })
    }
}

/// Collects and trims all text below an element.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Selectors for search, closed-search, and category result pages.
pub mod listing {
    use super::*;

    /// Listing card container, current then legacy layout.
    pub static ITEM: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".Product", ".productList .product"]));

    /// Listing title.
    pub static TITLE: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::new(&[".Product__title a", ".Product__title", ".title a"])
    });

    /// Anchor carrying the listing URL in `href`.
    pub static LINK: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::new(&["a.Product__anchor", ".Product__title a", ".title a"])
    });

    /// Current price text.
    pub static PRICE: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::new(&[".Product__priceValue", ".Product__price", ".price"])
    });

    /// Thumbnail carrying the image URL in `src`.
    pub static IMAGE: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".Product__imageData", "img"]));

    /// Remaining time text.
    pub static TIME: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".Product__time", ".remainTime"]));

    /// Bid count text.
    pub static BIDS: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".Product__bid", ".bidCount"]));

    /// Shipping fee text.
    pub static SHIPPING: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".Product__postage"]));

    /// Category links in the sidebar, current then legacy layout.
    pub static CATEGORY: LazyLock<SelectorChain> = LazyLock::new(|| {
        SelectorChain::new(&[".SearchMode .SearchMode__item", ".category li a"])
    });
}

/// Selectors for individual auction item pages.
pub mod detail {
    use super::*;

    /// Item title on the detail page.
    pub static TITLE: LazyLock<SelectorChain> =
        LazyLock::new(|| SelectorChain::new(&[".ProductTitle__text"]));
}
