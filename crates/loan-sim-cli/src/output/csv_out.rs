use loan_sim_core::amortization::SimulationResult;
use loan_sim_core::report;
use std::io;

/// Write the schedule as CSV to stdout, in the same layout as the file export.
pub fn print_csv(result: &SimulationResult) {
    let stdout = io::stdout();
    if let Err(e) = report::write_csv(result, stdout.lock()) {
        eprintln!("CSV output error: {}", e);
    }
}
