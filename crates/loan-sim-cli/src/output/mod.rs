pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use loan_sim_core::amortization::SimulationResult;
use loan_sim_core::ComputationOutput;

use crate::OutputFormat;

pub type SimulationOutput = ComputationOutput<SimulationResult>;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, output: &SimulationOutput) {
    match format {
        OutputFormat::Json => json::print_json(output),
        OutputFormat::Table => table::print_table(output),
        OutputFormat::Csv => csv_out::print_csv(&output.result),
        OutputFormat::Minimal => minimal::print_minimal(&output.result),
    }
}
