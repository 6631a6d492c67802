use std::path::PathBuf;

use clap::Parser;
use gridactions::config::{AppConfig, create_app};

#[derive(Parser)]
/// Serves a demo admin grid with per-row action buttons.
pub struct Args {
    /// TOML configuration file. Falls back to `GRIDACTIONS_CONFIG`.
    #[clap(long, short)]
    config: Option<PathBuf>,
    /// Address to listen on, overriding the configuration.
    #[clap(long, short)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let path = args
        .config
        .or_else(|| std::env::var_os("GRIDACTIONS_CONFIG").map(PathBuf::from));
    let mut config = match path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let app = create_app(&config)?;
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("Listening on http://{}{}", config.bind, config.base_path);
    axum::serve(listener, app).await?;

    Ok(())
}
