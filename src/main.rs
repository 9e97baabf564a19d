//! Server binary: `onlinestore serve` and `onlinestore init-db [--fill]`.

use clap::{Parser, Subcommand};
use onlinestore::{apply_migrations, build_router, drop_all, store, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "onlinestore", about = "Online store inventory API")]
struct Cli {
    /// Overrides DATABASE_URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Overrides BIND_ADDR.
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Drop and recreate all tables.
    InitDb {
        /// Insert demo data afterwards.
        #[arg(long)]
        fill: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("onlinestore=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    let pool = store::connect(&settings).await?;

    match cli.command {
        Command::InitDb { fill } => {
            drop_all(&pool).await?;
            apply_migrations(&pool).await?;
            if fill {
                store::populate(&pool).await?;
            }
            tracing::info!(fill, "database initialised");
        }
        Command::Serve { bind } => {
            apply_migrations(&pool).await?;
            let addr = bind.unwrap_or(settings.bind_addr);
            let app = build_router(AppState { pool }, settings.body_limit);
            let listener = TcpListener::bind(addr).await?;
            tracing::info!("listening on {}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
