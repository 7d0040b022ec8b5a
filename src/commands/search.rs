//! Search command: the fetch, extract, filter, and sort pipeline.

use crate::auction::{
    AuctionClient, AuctionFetch, Listing, Parser, QueryBuilder, ResultEnvelope, SearchRequest,
};
use crate::commands::CommandOutput;
use crate::config::Config;
use crate::filters::apply_post_fetch;
use crate::format::Formatter;
use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request-level problems reported inside the envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("no search query or category specified")]
    MissingCriteria,
}

/// Executes one search, closed-search, or category request.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the request and returns formatted output.
    pub async fn execute(&self, request: SearchRequest) -> CommandOutput {
        let envelope = self.run(request).await;
        let text = Formatter::new(self.config.format).format_envelope(&envelope);
        CommandOutput { text, error: envelope.error }
    }

    /// Runs the request against the live site. Always returns an envelope.
    pub async fn run(&self, request: SearchRequest) -> ResultEnvelope {
        if !request.has_criteria() {
            return missing_criteria(request);
        }

        match AuctionClient::new(&self.config) {
            Ok(client) => self.run_with_client(&client, request).await,
            Err(e) => {
                warn!("Failed to create HTTP client: {:#}", e);
                ResultEnvelope::failed(request, format!("{:#}", e))
            }
        }
    }

    /// Runs the request with a provided client (for testing).
    pub async fn run_with_client(
        &self,
        client: &impl AuctionFetch,
        request: SearchRequest,
    ) -> ResultEnvelope {
        let builder = QueryBuilder::new(self.config.base_url());

        let Some(url) = builder.build(&request) else {
            return missing_criteria(request);
        };

        info!("Fetching page {} of {}", request.page, url);

        match fetch_listing(client, &url).await {
            Ok(listing) => {
                let extracted = listing.items.len();
                let items = apply_post_fetch(listing.items, &request);
                debug!("{} items extracted, {} after filtering", extracted, items.len());

                ResultEnvelope::new(request, items, listing.categories)
            }
            Err(e) => {
                warn!("Scraping failed: {:#}", e);
                ResultEnvelope::failed(request, format!("{:#}", e))
            }
        }
    }
}

async fn fetch_listing(client: &impl AuctionFetch, url: &str) -> Result<Listing> {
    let html = client.fetch(url).await?;
    Ok(Parser::new().parse_listing(&html))
}

fn missing_criteria(request: SearchRequest) -> ResultEnvelope {
    info!("No search criteria given");
    ResultEnvelope::failed(request, SearchError::MissingCriteria.to_string())
}
