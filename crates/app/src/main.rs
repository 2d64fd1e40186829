mod args;
mod play;
mod vm;

use dex_core::model::Dataset;
use services::{AppServices, ChallengeOptions};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, ArgsError, Command, Env, print_usage};

const BUNDLED_DATASET: &str = include_str!("../data/pokemon-gen1.json");

fn init_tracing() {
    // Logs go to stderr so they never interleave with the play transcript.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_dataset(args: &Args) -> Result<Dataset, Box<dyn std::error::Error>> {
    let dataset = match &args.data_path {
        Some(path) => storage::load_dataset(path)?,
        None => storage::parse_dataset(BUNDLED_DATASET)?,
    };
    Ok(dataset)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1), &Env::from_process()) {
        Ok(parsed) => parsed,
        Err(ArgsError::HelpRequested) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    let dataset = load_dataset(&parsed)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        &dataset,
        ChallengeOptions::with_groups(parsed.groups),
    )
    .await?;

    let mut stdout = std::io::stdout();
    match parsed.command {
        Command::Play => {
            let stdin = BufReader::new(tokio::io::stdin());
            play::run_session(&services, stdin, &mut stdout).await?;
        }
        Command::Status => play::print_status(&services, &mut stdout).await?,
        Command::Reset => play::reset_progress(&services, &mut stdout).await?,
    }
    Ok(())
}

/// Creates the database file and its parent directories.
///
/// Expects a URL already passed through `normalize_sqlite_url`, so only
/// `sqlite://` and `sqlite::memory:` arrive here; anything else is rejected.
fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
