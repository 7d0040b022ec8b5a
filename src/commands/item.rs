//! Item detail command implementation.

use crate::auction::{AuctionClient, AuctionFetch, ItemDetail, Parser, QueryBuilder};
use crate::commands::CommandOutput;
use crate::config::Config;
use crate::format::Formatter;
use tracing::{info, warn};

/// Fetches basic details for a single auction item page.
pub struct ItemCommand {
    config: Config,
}

impl ItemCommand {
    /// Creates a new item command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the item and returns formatted output.
    pub async fn execute(&self, url: &str) -> CommandOutput {
        let detail = self.run(url).await;
        let text = Formatter::new(self.config.format).format_item_detail(&detail);
        CommandOutput { text, error: detail.error }
    }

    /// Fetches the item. Failures are reported in [`ItemDetail::error`].
    pub async fn run(&self, url: &str) -> ItemDetail {
        match AuctionClient::new(&self.config) {
            Ok(client) => self.run_with_client(&client, url).await,
            Err(e) => ItemDetail::failed(url, format!("{:#}", e)),
        }
    }

    /// Fetches the item with a provided client (for testing).
    pub async fn run_with_client(&self, client: &impl AuctionFetch, url: &str) -> ItemDetail {
        let url = url.trim();
        if url.is_empty() {
            return ItemDetail::failed(url, "no item URL specified");
        }

        let url = QueryBuilder::new(self.config.base_url()).item_url(url);
        info!("Fetching item: {}", url);

        match client.fetch(&url).await {
            Ok(html) => Parser::new().parse_item_detail(&html, &url),
            Err(e) => {
                warn!("Item fetch failed: {:#}", e);
                ItemDetail::failed(url, format!("{:#}", e))
            }
        }
    }
}
