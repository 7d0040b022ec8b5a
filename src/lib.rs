//! auc-crawler - Fast, stateless Yahoo! Auctions listing search CLI
//!
//! Builds search URLs, extracts listings and categories from result pages
//! through ordered selector fallback chains, and filters and sorts them
//! locally.

pub mod auction;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;

pub use auction::models::{Category, Item, ItemDetail, ResultEnvelope, SearchRequest};
pub use auction::models::{SortKey, SortOrder};
pub use config::Config;
