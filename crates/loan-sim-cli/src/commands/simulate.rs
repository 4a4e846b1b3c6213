use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use tracing::debug;

use loan_sim_core::amortization::{self, LoanParameters};
use loan_sim_core::report::{self, DEFAULT_CSV_FILENAME};

use crate::input;
use crate::output;
use crate::OutputFormat;

/// Arguments for a loan repayment simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial loan amount
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<Decimal>,

    /// Monthly repayment amount
    #[arg(long, allow_negative_numbers = true)]
    pub repayment: Option<Decimal>,

    /// Initial payment that reduces the principal
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub downpayment: Decimal,

    /// Annual interest rate as a percentage (7 means 7%)
    #[arg(long = "annual_interest_rate", allow_negative_numbers = true)]
    pub annual_interest_rate: Option<Decimal>,

    /// Number of months to simulate
    #[arg(long)]
    pub months: Option<u32>,

    /// Also write the schedule to a CSV file
    #[arg(long = "export_to_csv")]
    pub export_to_csv: bool,

    /// Destination of the CSV export
    #[arg(long = "csv_filename", default_value = DEFAULT_CSV_FILENAME)]
    pub csv_filename: String,
}

pub fn run_simulate(
    args: SimulateArgs,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = resolve_parameters(&args)?;
    debug!(?params, "parameters resolved");
    let output = amortization::run_simulation(&params)?;

    output::format_output(format, &output);

    if !matches!(format, OutputFormat::Table) {
        for w in &output.warnings {
            eprintln!("{}: {}", "warning".yellow().bold(), w);
        }
    }

    // The schedule is already on stdout if the export fails.
    if args.export_to_csv {
        report::export_csv(&output.result, &args.csv_filename)?;
        eprintln!("Results exported to {}", args.csv_filename);
    }

    Ok(())
}

fn resolve_parameters(args: &SimulateArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if args.principal.is_none() {
        if let Some(params) = input::stdin::read_stdin()? {
            return Ok(params);
        }
    }

    Ok(LoanParameters {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        down_payment: args.downpayment,
        annual_interest_rate: args
            .annual_interest_rate
            .ok_or("--annual_interest_rate is required (or provide --input)")?,
        repayment: args
            .repayment
            .ok_or("--repayment is required (or provide --input)")?,
        months: args
            .months
            .ok_or("--months is required (or provide --input)")?,
    })
}
