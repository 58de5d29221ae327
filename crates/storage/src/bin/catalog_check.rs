use std::fmt;
use std::path::PathBuf;

use drill_core::model::{Difficulty, QuestionKind};
use storage::repository::{InMemoryCatalog, QuestionCatalog};

#[derive(Debug, Clone)]
struct Args {
    dir: Option<PathBuf>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDir { raw } => write!(f, "invalid --dir value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut dir = std::env::var("DRILL_CATALOG_DIR").ok().map(PathBuf::from);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dir" => {
                    let value = require_value(&mut args, "--dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDir { raw: value });
                    }
                    dir = Some(PathBuf::from(value));
                }
                "--bundled" => dir = None,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { dir })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin catalog-check -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dir <path>              Directory of topic *.json files to validate");
    eprintln!("  --bundled                 Validate the built-in catalog (default)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  DRILL_CATALOG_DIR");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = match &args.dir {
        Some(dir) => InMemoryCatalog::from_dir(dir)?,
        None => InMemoryCatalog::bundled()?,
    };

    let mut total = 0;
    for info in catalog.topics() {
        let questions = catalog.load_questions(&info.name)?;
        let per_difficulty: Vec<String> = Difficulty::ALL
            .iter()
            .map(|d| {
                let n = questions.iter().filter(|q| q.difficulty() == *d).count();
                format!("{}={n}", d.label())
            })
            .collect();
        let per_kind: Vec<String> = [
            QuestionKind::MultipleChoice,
            QuestionKind::FillCode,
            QuestionKind::IdentifyDefect,
        ]
        .iter()
        .map(|k| {
            let n = questions.iter().filter(|q| q.kind() == *k).count();
            format!("{k}={n}")
        })
        .collect();

        println!(
            "{:<16} {:>3} questions  [{}]  [{}]",
            info.name,
            info.question_count,
            per_difficulty.join(", "),
            per_kind.join(", ")
        );
        total += info.question_count;
    }

    println!("{} topics, {total} questions", catalog.len());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("catalog check failed: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
