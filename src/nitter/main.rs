use clap::Parser;
use nscr::{Scraper, ScraperConfig};

#[derive(clap::Parser)]
#[command(version, about = "Scrape a Nitter mirror for profiles and user search results")]
struct Args {
    /// Mirror instance to scrape.
    #[arg(long, env = "NITTER_MIRROR", default_value = nscr::config::DEFAULT_MIRROR_DOMAIN)]
    mirror_domain: String,

    /// Origin image CDN proxied URLs are rewritten to.
    #[arg(long, env = "NITTER_CDN", default_value = nscr::config::DEFAULT_CDN_DOMAIN)]
    cdn_domain: String,

    /// Settling delay after navigation, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    settle_delay_ms: u64,

    /// Bound on concurrently offloaded browser calls.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch a profile: card, timeline, photo rail.
    Profile { username: String },
    /// Search users matching a query.
    Search {
        query: String,
        /// Lower date bound, YYYY-MM-DD.
        #[arg(long)]
        since: Option<String>,
        /// Upper date bound, YYYY-MM-DD.
        #[arg(long)]
        until: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let args = Args::parse();
    let scraper = Scraper::new(ScraperConfig {
        mirror_domain: args.mirror_domain,
        cdn_domain: args.cdn_domain,
        settle_delay_ms: args.settle_delay_ms,
        worker_pool_size: args.workers,
    })?;

    let json = match args.command {
        Commands::Profile { username } => {
            serde_json::to_string_pretty(&scraper.get_profile(&username).await?)?
        }
        Commands::Search {
            query,
            since,
            until,
        } => serde_json::to_string_pretty(
            &scraper
                .search(&query, since.as_deref(), until.as_deref())
                .await?,
        )?,
    };
    println!("{json}");

    Ok(())
}
