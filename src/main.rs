use std::path::PathBuf;

use clap::Parser;

use books_suite::{scenario, stage};
use books_suite::suite::DEFAULT_BASE_URL;
use books_suite::{fixture, Suite, SuiteConfig};

/// Runs the books service scenarios in order
#[derive(Parser, Debug)]
#[command(name = "books-suite", version)]
struct Cli {
    /// Base address of the books service
    #[arg(long, env = "BOOKS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Fixture file with `book1` .. `book5`
    #[arg(long, env = "BOOKS_FIXTURE")]
    fixture: Option<PathBuf>,

    /// Print the scenario names in run order and exit
    #[arg(long)]
    list: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = stage::log_filter(cli.quiet, cli.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .init();

    if cli.list {
        for s in scenario::ordered() {
            println!("{}", s.name());
        }
        return Ok(());
    }

    let config = SuiteConfig::new(cli.base_url)
        .with_fixture(cli.fixture.unwrap_or_else(fixture::default_path));

    let report = Suite::new(&config)?.run();

    if !report.is_success() {
        let failed = report.failures().map(|r| r.name).collect::<Vec<_>>();
        anyhow::bail!("{} of {} scenarios failed: {}", failed.len(), report.len(), failed.join(", "));
    }

    Ok(())
}
