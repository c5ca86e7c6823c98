// View-model accessors below the CLI surface are exercised by tests only.
#![allow(dead_code)]

mod app;
mod config;
mod error;
mod git;
mod logger;
mod views;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use app::{App, OutputFormat};
use config::Config;
use error::{Error, Result};
use git::Repository;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Render a file from a git repository with line anchors")]
struct Cli {
    /// Path of the file inside the repository
    path: String,

    /// Repository directory (discovered from the current directory by default)
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Branch, tag or commit to read the file from (defaults to config default_ref)
    #[arg(short, long = "ref", value_name = "REF")]
    reference: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (defaults to ~/.config/blobview/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::debug!("{:?}", e);
        eprintln!("{}", error_message(&e));
        std::process::exit(e.exit_code());
    }
}

/// One-line, user-facing description of a failure.
fn error_message(e: &Error) -> String {
    match e {
        Error::NotARepository(_) => "Not a git repository.".to_string(),
        Error::Unsupported { .. } => {
            format!("{} (use '--format raw' to get the file contents)", e)
        }
        _ => format!("{}", e),
    }
}

fn run(cli: &Cli) -> Result<()> {
    tracing::info!("blobview starting");

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let repo = match &cli.repo {
        Some(dir) => Repository::open(dir)?,
        None => Repository::discover()?,
    }
    .with_sniff_len(config.binary_sniff_len);

    let reference = cli
        .reference
        .clone()
        .unwrap_or_else(|| config.default_ref.clone());
    let repository_id = repo.name();
    let app = App::new(repo, config, repository_id);

    let bytes = app.output(&reference, &cli.path, cli.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}
