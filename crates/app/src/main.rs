use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use drill_core::{DEFAULT_HISTORY_CAPACITY, OrderingPolicy};
use services::{SessionConfig, SessionStats, TopicSessionService};
use storage::repository::{InMemoryCatalog, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;

use console::Console;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCatalogDir { raw: String },
    InvalidSeed { raw: String },
    InvalidOrdering { raw: String },
    InvalidSortPause { raw: String },
    InvalidHistoryCapacity { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCatalogDir { raw } => write!(f, "invalid --catalog value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidOrdering { raw } => {
                write!(
                    f,
                    "invalid --ordering value (expected ascending, descending or randomized): {raw}"
                )
            }
            ArgsError::InvalidSortPause { raw } => write!(f, "invalid --sort-pause-ms value: {raw}"),
            ArgsError::InvalidHistoryCapacity { raw } => {
                write!(f, "invalid --history-capacity value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone)]
struct Args {
    catalog_dir: Option<PathBuf>,
    seed: Option<u64>,
    ordering: OrderingPolicy,
    sort_pause_ms: u64,
    history_capacity: usize,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog <dir>           Directory of topic *.json files (default: built-in topics)");
    eprintln!("  --seed <n>                Seed for reproducible shuffles");
    eprintln!("  --ordering <policy>       Default ordering: ascending, descending, randomized");
    eprintln!("  --sort-pause-ms <ms>      Pause before each reorder (default: 0)");
    eprintln!("  --history-capacity <n>    Navigation history bound (default: {DEFAULT_HISTORY_CAPACITY})");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_CATALOG_DIR, DRILL_SEED, DRILL_ORDERING, DRILL_SORT_PAUSE_MS");
    eprintln!("  RUST_LOG (log filter, default: warn)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut catalog_dir = std::env::var("DRILL_CATALOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut seed = std::env::var("DRILL_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut ordering = std::env::var("DRILL_ORDERING")
            .ok()
            .map_or_else(OrderingPolicy::default, |value| {
                OrderingPolicy::from_name(&value)
            });
        let mut sort_pause_ms = std::env::var("DRILL_SORT_PAUSE_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0);
        let mut history_capacity = DEFAULT_HISTORY_CAPACITY;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalogDir { raw: value });
                    }
                    catalog_dir = Some(PathBuf::from(value));
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--ordering" => {
                    let value = require_value(args, "--ordering")?;
                    ordering = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidOrdering { raw: value.clone() })?;
                }
                "--sort-pause-ms" => {
                    let value = require_value(args, "--sort-pause-ms")?;
                    sort_pause_ms = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSortPause { raw: value.clone() })?;
                }
                "--history-capacity" => {
                    let value = require_value(args, "--history-capacity")?;
                    history_capacity = value
                        .parse::<usize>()
                        .ok()
                        .filter(|capacity| *capacity > 0)
                        .ok_or_else(|| ArgsError::InvalidHistoryCapacity { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog_dir,
            seed,
            ordering,
            sort_pause_ms,
            history_capacity,
        })
    }

    fn session_config(&self) -> Result<SessionConfig, services::ConfigError> {
        SessionConfig::new(
            self.history_capacity,
            self.ordering,
            self.seed,
            Duration::from_millis(self.sort_pause_ms),
        )
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let parsed = Args::parse(&mut std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = match &parsed.catalog_dir {
        Some(dir) => InMemoryCatalog::from_dir(dir)?,
        None => InMemoryCatalog::bundled()?,
    };
    info!(topics = catalog.len(), seed = ?parsed.seed, "catalog ready");

    let storage = Storage::new(catalog);
    let service = TopicSessionService::from_storage(&storage).with_config(parsed.session_config()?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), service, SessionStats::new());
    console.run()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
