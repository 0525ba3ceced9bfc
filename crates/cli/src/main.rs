use anyhow::Context;
use clap::Parser;
use quote_core::ingest::provider::AlphaVantageClient;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;

#[derive(Debug, Parser)]
#[command(name = "quote_cli", about = "Look up the latest daily bar for a ticker")]
struct Args {
    /// Ticker symbol, e.g. AAPL. Case does not matter.
    #[arg(conflicts_with = "event")]
    symbol: Option<String>,

    /// Path to a JSON invocation event of the form `{"symbol": ..}`.
    #[arg(long)]
    event: Option<std::path::PathBuf>,

    /// Indent the printed response.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = quote_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let request = input::resolve_request(args.symbol.as_deref(), args.event.as_deref())?;

    let provider = AlphaVantageClient::from_settings(&settings)?;
    let resp = match quote_core::handler::lookup_latest_quote(&provider, &request).await {
        Ok(resp) => resp,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&resp)
    } else {
        serde_json::to_string(&resp)
    }
    .context("failed to serialize invocation response")?;
    println!("{out}");

    Ok(())
}

fn init_sentry(settings: &quote_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
