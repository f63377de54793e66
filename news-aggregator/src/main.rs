use clap::{Parser, Subcommand};
use news_aggregator::{api, service, AggregatorConfig, CacheConfig, FetchConfig, NewsService};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "news-aggregator", about = "Aggregates AI news from a fixed set of feeds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve GET /api/rss-feeds over HTTP
    Serve {
        #[arg(long, env = "NEWS_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
        #[arg(long, env = "NEWS_CACHE_MINUTES", default_value_t = 30)]
        cache_minutes: i64,
    },
    /// Run one aggregation pass and print the response JSON
    Fetch {
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            cache_minutes,
        } => {
            let cache_config = CacheConfig {
                window: chrono::Duration::minutes(cache_minutes),
            };
            let service =
                NewsService::from_config(FetchConfig::default(), AggregatorConfig::default(), cache_config)?;
            let app = api::router(Arc::new(service));

            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!("Starting news aggregator on {}", bind);
            axum::serve(listener, app).await?;
        }
        Command::Fetch { pretty } => {
            let service = NewsService::from_config(
                FetchConfig::default(),
                AggregatorConfig::default(),
                CacheConfig::default(),
            )?;
            let response = service.get_articles().await;
            println!("{}", service::render_json(&response, pretty)?);
            if response.is_error() {
                anyhow::bail!("aggregation failed");
            }
        }
    }

    Ok(())
}
