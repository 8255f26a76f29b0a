//! Ravens CLI
//!
//! ```bash
//! ravens serve                      # http://0.0.0.0:3005/ravens/
//! ravens serve --port 8080          # Custom port
//! ravens serve --config ravens.yaml # Explicit config file
//! ravens routes                     # List mounted routes
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ravens_config::Config;
use ravens_web::pages::pages;
use ravens_web::routes::print_routes;
use ravens_web::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ravens")]
#[command(about = "Apply for a licence to control ravens")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Print the route table
    Routes {
        /// Config file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

const DEFAULT_FILTER: &str = "ravens=info,ravens_web=info,tower_http=info";

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    Config::load(path.map(PathBuf::as_path)).context("loading configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config,
            json_logs,
        } => {
            init_logging(json_logs);

            let mut config = load_config(config.as_ref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!(
                addr = %config.server.bind_addr(),
                prefix = %config.application.path_prefix,
                "Starting ravens"
            );
            let state = AppState::new(config).context("building application state")?;
            ravens_web::serve(Arc::new(state))
                .await
                .context("serving")?;
        }

        Commands::Routes { config } => {
            let config = load_config(config.as_ref())?;
            let state = AppState::new(config).context("building application state")?;
            print_routes(&state.application, &pages(&state.application));
        }
    }

    Ok(())
}
