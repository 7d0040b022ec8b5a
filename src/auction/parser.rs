//! HTML parser for auction result pages and item pages.

use crate::auction::models::{
    Category, Item, ItemDetail, NO_TITLE_INFO, PLACEHOLDER_IMAGE, UNDETERMINED_SHIPPING,
    UNKNOWN_LINK, UNKNOWN_TIME, UNKNOWN_TITLE,
};
use crate::auction::selectors::{detail, element_text, listing};
use regex_lite::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, trace, warn};

static CATEGORY_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/category/(\d+)").ok());

/// Failure to extract a single listing. Only that listing is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{field} '{text}' is out of range")]
    NumberOutOfRange { field: &'static str, text: String },
}

/// Items and categories extracted from one results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<Item>,
    pub categories: Vec<Category>,
}

/// Parser for auction HTML pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a results page. Never fails: missing markup yields empty sequences.
    pub fn parse_listing(&self, html: &str) -> Listing {
        let document = Html::parse_document(html);

        let containers = listing::ITEM.select_all(&document);
        if containers.is_empty() {
            debug!("No listing containers matched {:?}", listing::ITEM.sources());
        }

        let mut items = Vec::new();
        for element in containers {
            match self.parse_item(element) {
                Ok(item) => {
                    trace!("Parsed item: {} ({} yen)", item.title, item.price);
                    items.push(item);
                }
                Err(e) => {
                    warn!("Skipping listing: {}", e);
                }
            }
        }

        let categories = self.parse_categories(&document);

        let without_image = items.iter().filter(|item| item.has_placeholder_image()).count();
        debug!(
            "Parsed {} items ({} without image) and {} categories",
            items.len(),
            without_image,
            categories.len()
        );

        Listing { items, categories }
    }

    /// Parses the basic details of an item page.
    pub fn parse_item_detail(&self, html: &str, url: &str) -> ItemDetail {
        let document = Html::parse_document(html);

        let title =
            detail::TITLE.document_text(&document).unwrap_or_else(|| NO_TITLE_INFO.to_string());

        ItemDetail { url: url.to_string(), title, error: None }
    }

    /// Parses a single listing card, falling back per field.
    fn parse_item(&self, element: ElementRef) -> Result<Item, ExtractError> {
        let title = listing::TITLE.text(element).unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let link =
            listing::LINK.attr(element, "href").unwrap_or_else(|| UNKNOWN_LINK.to_string());

        let price = match listing::PRICE.text(element) {
            Some(text) => parse_digits("price", &text)?,
            None => 0,
        };

        let image_url = normalize_image_url(listing::IMAGE.attr(element, "src"));

        let remaining_time =
            listing::TIME.text(element).unwrap_or_else(|| UNKNOWN_TIME.to_string());

        let bid_count = match listing::BIDS.text(element) {
            Some(text) => parse_digits("bid count", &text)?,
            None => 0,
        };

        let shipping_fee =
            listing::SHIPPING.text(element).unwrap_or_else(|| UNDETERMINED_SHIPPING.to_string());

        Ok(Item { title, link, price, image_url, remaining_time, bid_count, shipping_fee })
    }

    /// Parses category links. Entries without a numeric id are dropped.
    fn parse_categories(&self, document: &Html) -> Vec<Category> {
        listing::CATEGORY
            .select_all(document)
            .into_iter()
            .filter_map(|element| {
                let link = element.value().attr("href").unwrap_or_default();
                let Some(id) = category_id(link) else {
                    trace!("Dropping category entry without id: '{}'", link);
                    return None;
                };

                Some(Category { id, name: element_text(element), link: link.to_string() })
            })
            .collect()
    }
}

/// Extracts the digits from noisy text like "¥12,345" or "入札 3".
///
/// Text without digits parses as 0.
pub fn parse_digits(field: &'static str, text: &str) -> Result<u64, ExtractError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse()
        .map_err(|_| ExtractError::NumberOutOfRange { field, text: text.to_string() })
}

/// Keeps absolute http(s) URLs and replaces anything else with the placeholder.
pub fn normalize_image_url(src: Option<String>) -> String {
    match src {
        Some(src) if src.starts_with("http://") || src.starts_with("https://") => src,
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Extracts the numeric id from a `/category/<digits>` link.
pub fn category_id(link: &str) -> Option<String> {
    let re = CATEGORY_ID.as_ref()?;
    re.captures(link).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Numeric parsing

    #[test]
    fn test_parse_digits_yen() {
        assert_eq!(parse_digits("price", "¥12,345"), Ok(12345));
        assert_eq!(parse_digits("price", "12,345円"), Ok(12345));
        assert_eq!(parse_digits("price", " 980 円 "), Ok(980));
    }

    #[test]
    fn test_parse_digits_without_digits() {
        assert_eq!(parse_digits("price", ""), Ok(0));
        assert_eq!(parse_digits("bid count", "-"), Ok(0));
        assert_eq!(parse_digits("bid count", "なし"), Ok(0));
    }

    #[test]
    fn test_parse_digits_ignores_fullwidth_digits() {
        // Only ASCII digits count, as on the site's own numeric fields.
        assert_eq!(parse_digits("price", "１２３"), Ok(0));
    }

    #[test]
    fn test_parse_digits_out_of_range() {
        let err = parse_digits("price", "99999999999999999999999").unwrap_err();
        assert!(matches!(err, ExtractError::NumberOutOfRange { field: "price", .. }));
        assert!(err.to_string().contains("price"));
    }

    // Image normalization

    #[test]
    fn test_normalize_image_url() {
        assert_eq!(
            normalize_image_url(Some("https://auctions.c.yimg.jp/a.jpg".to_string())),
            "https://auctions.c.yimg.jp/a.jpg"
        );
        assert_eq!(normalize_image_url(Some("http://x/a.jpg".to_string())), "http://x/a.jpg");
        assert_eq!(normalize_image_url(Some("/img/a.jpg".to_string())), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image_url(Some("data:image/gif;base64,R0".to_string())), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image_url(Some("javascript:alert(1)".to_string())), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image_url(None), PLACEHOLDER_IMAGE);
    }

    // Category ids

    #[test]
    fn test_category_id() {
        assert_eq!(category_id("/category/2084005116"), Some("2084005116".to_string()));
        assert_eq!(
            category_id("https://auctions.yahoo.co.jp/category/list/2084005116/?p=1"),
            None
        );
        assert_eq!(
            category_id("https://auctions.yahoo.co.jp/category/23000?p=2"),
            Some("23000".to_string())
        );
        assert_eq!(category_id("/search/search?p=x"), None);
        assert_eq!(category_id(""), None);
    }

    // Listing parsing

    #[test]
    fn test_parse_listing_current_markup() {
        let html = r#"
            <ul>
              <li class="Product">
                <a class="Product__anchor" href="https://page.auctions.yahoo.co.jp/jp/auction/a1"></a>
                <h3 class="Product__title"><a href="https://page.auctions.yahoo.co.jp/jp/auction/a1">Nintendo Switch 本体</a></h3>
                <span class="Product__priceValue">¥12,345</span>
                <img class="Product__imageData" src="https://auctions.c.yimg.jp/a1.jpg">
                <span class="Product__time">2日</span>
                <span class="Product__bid">5</span>
                <span class="Product__postage">送料無料</span>
              </li>
            </ul>
        "#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(listing.items.len(), 1);

        let item = &listing.items[0];
        assert_eq!(item.title, "Nintendo Switch 本体");
        assert_eq!(item.link, "https://page.auctions.yahoo.co.jp/jp/auction/a1");
        assert_eq!(item.price, 12345);
        assert_eq!(item.image_url, "https://auctions.c.yimg.jp/a1.jpg");
        assert_eq!(item.remaining_time, "2日");
        assert_eq!(item.bid_count, 5);
        assert_eq!(item.shipping_fee, "送料無料");
    }

    #[test]
    fn test_parse_listing_legacy_markup() {
        let html = r#"
            <div class="productList">
              <div class="product">
                <div class="title"><a href="/jp/auction/b2">Old Layout Lens</a></div>
                <div class="price">3,000円</div>
                <img src="https://auctions.c.yimg.jp/b2.jpg">
                <div class="remainTime">10時間</div>
                <div class="bidCount">入札 12</div>
              </div>
            </div>
        "#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(listing.items.len(), 1);

        let item = &listing.items[0];
        assert_eq!(item.title, "Old Layout Lens");
        assert_eq!(item.link, "/jp/auction/b2");
        assert_eq!(item.price, 3000);
        assert_eq!(item.image_url, "https://auctions.c.yimg.jp/b2.jpg");
        assert_eq!(item.remaining_time, "10時間");
        assert_eq!(item.bid_count, 12);
        assert_eq!(item.shipping_fee, UNDETERMINED_SHIPPING);
    }

    #[test]
    fn test_parse_listing_all_fallbacks() {
        let html = r#"<div class="Product"><span>nothing useful</span></div>"#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(listing.items, vec![Item::default()]);
    }

    #[test]
    fn test_parse_listing_relative_image_replaced() {
        let html = r#"<div class="Product"><img class="Product__imageData" src="/thumb.jpg"></div>"#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(listing.items[0].image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_parse_listing_skips_broken_item_only() {
        let html = r#"
            <div class="Product"><span class="Product__priceValue">100</span></div>
            <div class="Product"><span class="Product__priceValue">999999999999999999999999</span></div>
            <div class="Product"><span class="Product__priceValue">300</span></div>
        "#;

        let listing = Parser::new().parse_listing(html);
        let prices: Vec<u64> = listing.items.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![100, 300]);
    }

    #[test]
    fn test_parse_listing_no_containers() {
        let html = r#"<html><body><div id="empty">該当する商品はありません</div></body></html>"#;

        let listing = Parser::new().parse_listing(html);
        assert!(listing.items.is_empty());
        assert!(listing.categories.is_empty());
    }

    #[test]
    fn test_parse_listing_empty_document() {
        assert_eq!(Parser::new().parse_listing(""), Listing::default());
    }

    #[test]
    fn test_parse_categories() {
        let html = r#"
            <div class="SearchMode">
              <a class="SearchMode__item" href="/category/2084005116">ゲーム</a>
              <a class="SearchMode__item" href="/search/search?p=x">すべて</a>
              <a class="SearchMode__item"> No link </a>
              <a class="SearchMode__item" href="https://auctions.yahoo.co.jp/category/23000?p=1"> 家電 </a>
            </div>
        "#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(
            listing.categories,
            vec![
                Category {
                    id: "2084005116".to_string(),
                    name: "ゲーム".to_string(),
                    link: "/category/2084005116".to_string(),
                },
                Category {
                    id: "23000".to_string(),
                    name: "家電".to_string(),
                    link: "https://auctions.yahoo.co.jp/category/23000?p=1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_categories_legacy_markup() {
        let html = r#"<ul class="category"><li><a href="/category/26318">本</a></li></ul>"#;

        let listing = Parser::new().parse_listing(html);
        assert_eq!(listing.categories.len(), 1);
        assert_eq!(listing.categories[0].id, "26318");
        assert_eq!(listing.categories[0].name, "本");
    }

    // Item detail parsing

    #[test]
    fn test_parse_item_detail() {
        let html = r#"<h1 class="ProductTitle__text">PlayStation 5</h1>"#;
        let detail = Parser::new().parse_item_detail(html, "https://page.auctions.yahoo.co.jp/x");
        assert_eq!(detail.title, "PlayStation 5");
        assert_eq!(detail.url, "https://page.auctions.yahoo.co.jp/x");
        assert!(detail.error.is_none());
    }

    #[test]
    fn test_parse_item_detail_missing_title() {
        let detail = Parser::new().parse_item_detail("<html></html>", "u");
        assert_eq!(detail.title, NO_TITLE_INFO);
    }
}
