//! Command line interface
//!
//! `campdir serve` runs the HTTP server (the default when no subcommand is
//! given); `campdir seed` imports or destroys data through the normal
//! store paths.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::{Config, RunMode};
use crate::geo::{Geocoder, HttpGeocoder};
use crate::http::{self, AppState};
use crate::logger::Logger;
use crate::seed;
use crate::store::Store;
use crate::upload::PhotoStore;

#[derive(Debug, Parser)]
#[command(name = "campdir", about = "Bootcamp directory REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,

    /// Import or destroy seed data
    Seed {
        /// Import records from the data directory
        #[arg(short = 'i', long, conflicts_with = "delete")]
        import: bool,

        /// Delete all records
        #[arg(short = 'd', long)]
        delete: bool,

        /// Directory holding bootcamps.json and courses.json
        #[arg(long, default_value = "_data")]
        data_dir: PathBuf,
    },
}

/// Parse arguments and dispatch
pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))
        }
        Command::Seed {
            import,
            delete,
            data_dir,
        } => {
            // Seeding only makes sense against a persistent store
            let data_file = config
                .data_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("data/campdir.json"));
            let store = Store::open(Some(data_file))?;

            if import {
                seed::import(&store, &data_dir)?;
            } else if delete {
                seed::destroy(&store)?;
            } else {
                return Err("pass --import or --delete".into());
            }
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn Error>> {
    let store = Arc::new(Store::open(config.data_file.clone())?);
    let geocoder: Arc<dyn Geocoder> = Arc::new(HttpGeocoder::new(
        config.geocoder_base_url.clone(),
        config.geocoder_api_key.clone(),
    ));
    let photos = Arc::new(PhotoStore::new(config.file_upload_path.clone()));

    let addr = config.socket_addr();
    let provider = config.geocoder_provider.clone();
    let mode = match config.mode {
        RunMode::Development => "development",
        RunMode::Production => "production",
    };

    let state = AppState {
        store,
        geocoder,
        photos,
        config: Arc::new(config),
    };
    let router = http::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    Logger::info(
        "server_started",
        &[
            ("addr", addr.as_str()),
            ("geocoder", provider.as_str()),
            ("mode", mode),
        ],
    );

    axum::serve(listener, router).await?;
    Ok(())
}
