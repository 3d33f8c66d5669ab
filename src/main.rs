//! `products-api` binary: serve the API, or clear the products table.

use clap::{Parser, Subcommand};
use products_api::{app, connect, serve, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "products-api", version, about = "REST API for products")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Same as the `clear` subcommand.
    #[arg(long)]
    clear: bool,

    /// Serve from a throwaway in-memory store when DATABASE_URL is not set.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default).
    Serve,
    /// Drop and recreate the products table, then exit.
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let clearing = cli.clear || matches!(cli.command, Some(Command::Clear));
    let mut config = Config::from_env()?;
    // Clearing only makes sense against a real database.
    config.in_memory = cli.in_memory && !clearing;

    let store = match connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "error connecting to the database");
            return Err(e.into());
        }
    };

    if clearing {
        let result = store.reset().await;
        store.close().await;
        result?;
        tracing::info!("database cleared");
        return Ok(());
    }

    let state = AppState::new(store.clone());
    let listener = TcpListener::bind(config.bind_addr).await?;
    let result = serve(listener, app(state, &config)).await;
    store.close().await;
    result?;
    Ok(())
}
