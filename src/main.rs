//! auc-crawler - Fast, stateless Yahoo! Auctions listing search CLI

use anyhow::{anyhow, Result};
use auc_crawler::auction::models::parse_price_bound;
use auc_crawler::auction::{SearchRequest, SortKey, SortOrder};
use auc_crawler::commands::{ItemCommand, SearchCommand};
use auc_crawler::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "auc-crawler",
    version,
    about = "Fast, stateless Yahoo! Auctions listing search CLI",
    long_about = "Searches live and closed Yahoo! Auctions listings, browses categories, \
                  and filters or sorts the extracted results locally."
)]
struct Cli {
    /// Marketplace host override
    #[arg(long, global = true, env = "AUC_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AUC_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "AUC_TIMEOUT")]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search live (or closed) auctions
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,

        /// Results page (50 listings per page)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Search completed auctions instead of live ones
        #[arg(long)]
        closed: bool,

        /// Sort key: price, bids, time
        #[arg(long)]
        sort_by: Option<SortKey>,

        /// Sort direction: asc, desc
        #[arg(long, default_value = "asc")]
        sort_order: SortOrder,

        /// Minimum price in yen (blank for none)
        #[arg(long)]
        price_min: Option<String>,

        /// Maximum price in yen (blank for none)
        #[arg(long)]
        price_max: Option<String>,

        /// Only auctions ending within this many hours
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        auction_hours: Option<u32>,
    },

    /// Search completed auctions
    Closed {
        /// Search query
        query: String,

        /// Results page (50 listings per page)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Browse a category by id
    #[command(alias = "c")]
    Category {
        /// Numeric category id
        id: String,

        /// Results page
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Show basic details for an auction item page
    #[command(alias = "i")]
    Item {
        /// Item page URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let output = match cli.command {
        Commands::Search {
            query,
            page,
            closed,
            sort_by,
            sort_order,
            price_min,
            price_max,
            auction_hours,
        } => {
            let price_min = parse_price_bound(price_min.as_deref()).map_err(|e| anyhow!(e))?;
            let price_max = parse_price_bound(price_max.as_deref()).map_err(|e| anyhow!(e))?;

            let request = SearchRequest {
                sort_by,
                sort_order,
                ..SearchRequest::query(query)
                    .with_page(page)
                    .closed(closed)
                    .price_range(price_min, price_max)
                    .ending_within(auction_hours)
            };

            SearchCommand::new(config).execute(request).await
        }

        Commands::Closed { query, page } => {
            let request = SearchRequest::query(query).with_page(page).closed(true);
            SearchCommand::new(config).execute(request).await
        }

        Commands::Category { id, page } => {
            let request = SearchRequest::category(id).with_page(page);
            SearchCommand::new(config).execute(request).await
        }

        Commands::Item { url } => ItemCommand::new(config).execute(&url).await,
    };

    println!("{}", output.text);

    output.into_result()
}
