//! Command line frontend: reads a matrix and searches for row shifts that make
//! every column sum to the target.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use shiftsum::{LoadError, Search, SearchConfig, SearchOutcome, read_matrix, total_combinations};
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "shiftsum")]
#[command(version)]
#[command(about = "Search for row shifts that make every column of a matrix sum to a target")]
struct Cli {
    /// Matrix file: an optional `//` comment line, then one row of
    /// comma-separated integers per line [default: matrix.txt]
    matrix: Option<PathBuf>,

    /// Every column has to sum to this [default: 100]
    #[arg(short, long, allow_negative_numbers = true)]
    target: Option<i64>,

    /// Print progress every N checked combinations, 0 to disable [default: 5000]
    #[arg(short, long, value_name = "N")]
    progress_every: Option<u64>,

    /// Stop searching after this many seconds
    #[arg(long, value_name = "SECONDS")]
    max_seconds: Option<u64>,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Combines the config file (if any) with the command line options, which
    /// take precedence.
    fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(matrix) = &self.matrix {
            config.matrix = matrix.clone();
        }
        if let Some(target) = self.target {
            config.target_sum = target;
        }
        if let Some(n) = self.progress_every {
            config.progress_interval = n;
        }
        if self.max_seconds.is_some() {
            config.max_seconds = self.max_seconds;
        }

        Ok(config)
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Exit code when a matrix was read but has no solution.
const NO_SOLUTION: u8 = 1;

/// Exit code when the configuration or matrix couldn't be read.
const INPUT_ERROR: u8 = 2;

/// Formats a loader error together with everything that caused it.
fn describe_load_error(e: LoadError) -> String {
    format!("{:#}", anyhow::Error::from(e))
}

fn run(config: &SearchConfig) -> Result<ExitCode> {
    debug!(?config, "Configuration");

    let loaded = match read_matrix(&config.matrix) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", describe_load_error(e));
            println!("Exiting due to matrix reading error.");
            return Ok(ExitCode::from(INPUT_ERROR));
        }
    };
    if let Some(comment) = &loaded.comment {
        debug!(%comment, "Matrix comment");
    }

    let matrix = loaded.matrix;
    let total = total_combinations(&matrix);
    if !matrix.is_empty() {
        println!("Trying {total} possible shift combinations...");
    }

    let deadline = config.max_seconds.map(|s| Instant::now() + Duration::from_secs(s));
    let mut search = Search::new(&matrix, config.target_sum)
        .progress_interval(config.progress_interval)
        .on_progress(|checked, total| println!("Checked {checked}/{total} combinations..."));
    if let Some(deadline) = deadline {
        search = search.cancel_when(move || Instant::now() >= deadline);
    }

    let code = match search.run() {
        SearchOutcome::Found { shifts, matrix, .. } => {
            println!("\nSolution found!");
            println!(
                "Shifts applied (0-indexed, right shifts for each row): ({})",
                shifts.iter().join(", ")
            );
            println!("Resulting matrix:");
            println!("{matrix}");
            ExitCode::SUCCESS
        }
        SearchOutcome::Exhausted { .. } => {
            println!("\nNo solution found after checking all combinations.");
            ExitCode::from(NO_SOLUTION)
        }
        SearchOutcome::CannotSolve(reason) => {
            println!("{reason}");
            ExitCode::from(NO_SOLUTION)
        }
        SearchOutcome::Cancelled { checked } => {
            println!("\nGave up after checking {checked}/{total} combinations.");
            ExitCode::from(NO_SOLUTION)
        }
    };

    Ok(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = cli
        .search_config()
        .context("Invalid configuration")
        .and_then(|config| run(&config));

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(INPUT_ERROR)
        }
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["shiftsum"]).unwrap();
        assert_eq!(cli.search_config().unwrap(), SearchConfig::default());
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "shiftsum", "m.txt", "--target", "-6", "-p", "0", "--max-seconds", "5",
        ])
        .unwrap();
        let config = cli.search_config().unwrap();
        assert_eq!(config.matrix, PathBuf::from("m.txt"));
        assert_eq!(config.target_sum, -6);
        assert_eq!(config.progress_interval, 0);
        assert_eq!(config.max_seconds, Some(5));
    }

    #[test]
    fn load_error_includes_cause() {
        let dir = std::env::temp_dir();
        let cause = std::fs::read(&dir).unwrap_err().to_string();
        let msg = describe_load_error(read_matrix(&dir).unwrap_err());
        assert!(msg.starts_with("Failed to read"), "{msg}");
        assert!(msg.ends_with(&cause), "{msg}");
    }

    #[test]
    fn missing_config_file() {
        let cli = Cli::try_parse_from(["shiftsum", "-c", "/nonexistent/shiftsum.toml"]).unwrap();
        assert!(cli.search_config().is_err());
    }
}
