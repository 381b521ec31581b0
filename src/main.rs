use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;

use cinegraph_client::{
    config::Config,
    console::{Command, Session},
    services::CineGraphProvider,
    InteractionController,
};

/// CineGraph - find a movie by name and get graph-based recommendations
#[derive(Parser)]
#[command(name = "cinegraph")]
#[command(about = "Terminal client for the CineGraph recommendation service", long_about = None)]
struct Cli {
    /// Base URL of the recommendation service (overrides CINEGRAPH_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides CINEGRAPH_REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by name and print the matches
    Search {
        /// Movie name, e.g. "Batman"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Print recommendations for a movie id
    Recommend {
        /// Movie id, as listed by `search`
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?.with_overrides(cli.api_url, cli.timeout_secs);
    let provider = CineGraphProvider::from_config(&config)
        .with_context(|| format!("Failed to set up client for {}", config.api_url))?;

    tracing::info!(api_url = %provider.api_url(), "Using recommendation service");

    let controller = InteractionController::new(Arc::new(provider.clone()));
    let mut session = Session::new(controller.clone(), tokio::io::stdout());

    let one_shot = match cli.command {
        Some(Commands::Search { query }) => Command::Search(query.join(" ")),
        Some(Commands::Recommend { id }) => Command::Recommend(Some(id)),
        None => {
            match provider.ping().await {
                Ok(message) => println!("{}", message),
                Err(e) => {
                    tracing::warn!(error = %e, "Recommendation service not reachable");
                    eprintln!(
                        "Warning: {} is not answering yet; commands will report errors until it does.",
                        config.api_url
                    );
                }
            }
            session.run(BufReader::new(tokio::io::stdin())).await?;
            return Ok(());
        }
    };

    session.execute(one_shot).await?;

    // One-shot commands exit non-zero when the operation failed
    if controller.snapshot().await.error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
