use crate::app::AppState;
use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::media::{CloudinaryHost, ImageHost, InlineHost};
use crate::router::handle;
use astra::Server;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod browse;
mod client;
mod config;
mod db;
mod domain;
mod errors;
mod listing;
mod media;
mod responses;
mod router;
mod templates;
mod theme;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(name = "school_finder", version, about = "Browse, search and add schools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Browse the listing from the terminal
    Browse {
        /// Server to talk to; defaults to SCHOOL_FINDER_URL
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,school_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config),
        Command::Browse { url } => {
            let url = url.unwrap_or_else(|| config.server_url.clone());
            if let Err(e) = browse::run(&url, config.page_size) {
                tracing::error!("browse failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn serve(config: AppConfig) {
    let db = Database::new(config.database_path.clone());

    if let Err(e) = init_db(&db, &config.schema_path) {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let images: Arc<dyn ImageHost> = match config.cloudinary.clone() {
        Some(cloud) => match CloudinaryHost::new(cloud) {
            Ok(host) => Arc::new(host),
            Err(e) => {
                tracing::error!("media host setup failed: {e}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("no Cloudinary credentials set, storing images inline");
            Arc::new(InlineHost)
        }
    };

    let app = AppState::new(db, images, config.page_size, config.max_image_bytes);

    tracing::info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }

    tracing::info!("server shut down");
}
