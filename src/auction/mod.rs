//! Auction-specific modules for URL building, HTTP fetching, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod query;
pub mod selectors;

pub use client::{AuctionClient, AuctionFetch};
pub use models::{Category, Item, ItemDetail, ResultEnvelope, SearchRequest, SortKey, SortOrder};
pub use parser::{Listing, Parser};
pub use query::QueryBuilder;
