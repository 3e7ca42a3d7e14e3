mod bundle;
mod cli;
mod commands;
mod config;
mod fetch;
mod file_utils;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use fetch::{DirectoryFetcher, HttpFetcher};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            output,
            json_dir,
            index,
            from,
            only,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let paths = config.paths(output, json_dir, index);
            let sources = commands::build::select(&only)?;

            match from {
                Some(dir) => {
                    let fetcher = DirectoryFetcher::new(dir);
                    commands::build::handle(&sources, &config, &fetcher, &paths)?;
                }
                None => {
                    let fetcher = HttpFetcher::new();
                    commands::build::handle(&sources, &config, &fetcher, &paths)?;
                }
            }
        }

        Commands::Sources { config } => {
            let config = Config::load(config.as_deref())?;
            commands::sources::handle(&config)?;
        }

        Commands::Transform { key, files } => {
            commands::transform::handle(&key, &files)?;
        }
    }

    Ok(())
}
