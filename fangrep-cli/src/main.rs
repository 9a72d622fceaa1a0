use anyhow::{Context, Result};
use clap::Parser;
use fangrep::{search, SearchConfig, SearchRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fangrep",
    author,
    version,
    about = "Concurrent line search across a directory tree",
    long_about = None
)]
struct Cli {
    /// Recurse into subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Include hidden (dot-prefixed) files and directories.
    /// Only supported on unix-like systems.
    #[arg(short = 'H', long)]
    hidden: bool,

    /// Path to a configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern to search for (regex)
    pattern: String,

    /// File or directory to search
    path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = SearchConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    let cli_config = SearchConfig {
        pattern: cli.pattern,
        root_path: cli.path,
        recursive: cli.recursive,
        include_hidden: cli.hidden,
        ..Default::default()
    };
    let config = file_config.merge_with_cli(cli_config);

    init_tracing(&config.log_level);
    tracing::debug!("merged configuration: {:?}", config);

    let request = SearchRequest::from_config(&config)?;
    search(request);
    Ok(())
}

/// Diagnostics and logs go to stderr; stdout carries matched lines only.
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
