use clap::Parser;
use soscout_core::{Config, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod menu;

#[derive(Parser)]
#[command(name = "soscout")]
#[command(version, about = "Interactive Stack Overflow user browser", long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Cli {} = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    };

    let mut session = Session::new(&config)?;
    menu::run(&mut session).await
}
