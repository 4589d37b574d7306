//! `rapport` — interactive registration and compatibility quiz in the
//! terminal.
//!
//! # Usage
//!
//! ```
//! rapport --db ~/.local/share/rapport/rapport.db
//! rapport --config ~/.config/rapport/config.toml
//! ```

mod wizard;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rapport_core::profile::local_today;
use rapport_store_sqlite::{SqliteStore, expand_tilde};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wizard::{Outcome, Wizard};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rapport", about = "Register and take the Rapport compatibility quiz")]
struct Args {
  /// Path to a TOML config file (store_path).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database file (default: rapport.db).
  #[arg(long, env = "RAPPORT_DB", value_name = "PATH")]
  db: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  store_path: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr and stay quiet unless asked for, so they do not
  // interleave with the prompts.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag overrides config file, which overrides the default.
  let store_path = args
    .db
    .or(file_cfg.store_path)
    .unwrap_or_else(|| PathBuf::from("rapport.db"));
  let store_path = expand_tilde(&store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("opening store at {}", store_path.display()))?;
  tracing::debug!(path = %store_path.display(), "store ready");

  let stdin = io::stdin().lock();
  let stdout = io::stdout().lock();
  let today = local_today();

  match Wizard::new(&store, stdin, stdout, today).run().await? {
    Outcome::Declined => tracing::info!("registration declined"),
    Outcome::Completed { username, category, matches } => {
      tracing::info!(%username, %category, matches = matches.len(), "quiz completed");
    }
  }

  Ok(())
}
