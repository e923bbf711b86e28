use lockpick_core::config::{LockSettings, LockpickConfig};
use lockpick_core::lock::BudgetLock;
use lockpick_core::search::Searcher;
use lockpick_core::{Alphabet, Combination};

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(short, long, value_parser)]
    config_file: Option<PathBuf>,
    /// Hex-encoded combination the demo lock opens for.
    #[clap(long, conflicts_with = "digest")]
    secret: Option<String>,
    /// Hex MD5 digest; the lock opens for any preimage.
    #[clap(long)]
    digest: Option<String>,
    /// Search only this exact length instead of deepening from 1.
    #[clap(short, long)]
    length: Option<usize>,
    #[clap(long)]
    max_depth: Option<usize>,
    #[clap(long)]
    alphabet: Option<Alphabet>,
    #[clap(long)]
    max_attempts: Option<u64>,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config_file {
        Some(config_path) => {
            tracing::info!(path = ?config_path, "Loading configuration");
            LockpickConfig::load_from_file(config_path)?
        }
        None => {
            let default_config_path = PathBuf::from("config.toml");
            if default_config_path.exists() {
                tracing::info!(path = ?default_config_path, "Loading default configuration");
                LockpickConfig::load_from_file(&default_config_path)?
            } else {
                tracing::debug!("No config file found, using built-in defaults");
                LockpickConfig::default()
            }
        }
    };

    if let Some(secret) = cli.secret {
        config.lock = Some(LockSettings::Secret { secret });
    }
    if let Some(digest) = cli.digest {
        config.lock = Some(LockSettings::Digest { digest });
    }
    if let Some(max_depth) = cli.max_depth {
        config.search.max_depth = Some(max_depth);
    }
    if let Some(alphabet) = cli.alphabet {
        config.search.alphabet = alphabet;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.search.max_attempts = Some(max_attempts);
    }

    tracing::debug!(config = ?config, "Effective configuration");

    let lock_settings = config.lock.as_ref().ok_or_else(|| {
        anyhow::anyhow!("No lock configured: pass --secret or --digest, or set [lock] in the config")
    })?;
    let lock = lock_settings.build()?;
    let mut lock = BudgetLock::new(lock, config.search.max_attempts.unwrap_or(u64::MAX));

    let mut searcher = Searcher::new(config.search.search_config());
    let start_time = Instant::now();
    let outcome = match cli.length {
        Some(len) => searcher.find_of_length(&mut lock, len),
        None => searcher.find_minimal(&mut lock),
    };
    let elapsed = start_time.elapsed();
    let stats = searcher.stats();

    match outcome {
        Ok(Some(combination)) => report_found(&combination, stats.attempts, elapsed),
        Ok(None) => {
            println!(
                "No combination found. Attempts: {}, deepest length tried: {}, time: {:.2?}",
                stats.attempts, stats.deepest, elapsed
            );
        }
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Search aborted after {} attempts: {}",
                stats.attempts,
                e
            ));
        }
    }

    Ok(())
}

fn report_found(combination: &Combination, attempts: u64, elapsed: std::time::Duration) {
    println!("Combination found!");
    println!("  Key (hex): {combination}");
    println!("  Length: {}", combination.len());
    println!("  Fingerprint: {}", combination.fingerprint());
    println!("  Attempts: {attempts}, time: {elapsed:.2?}");
}
