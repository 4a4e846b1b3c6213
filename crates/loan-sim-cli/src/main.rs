mod commands;
mod input;
mod output;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::simulate::SimulateArgs;

/// Simulate loan repayment with interest
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "Simulate loan repayment with interest",
    long_about = "Builds a month-by-month amortization schedule for a fixed-rate loan \
                  with decimal precision. Parameters come from flags, a JSON file \
                  (--input) or JSON piped on stdin. The schedule can also be exported \
                  to CSV."
)]
struct Cli {
    #[command(flatten)]
    simulate: SimulateArgs,

    /// Output format
    #[arg(long, default_value = "table")]
    output: OutputFormat,

    /// Log each simulated period to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::simulate::run_simulate(cli.simulate, &cli.output) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
