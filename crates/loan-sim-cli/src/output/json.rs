use super::SimulationOutput;

/// Pretty-print the full computation envelope to stdout.
pub fn print_json(output: &SimulationOutput) {
    match serde_json::to_string_pretty(output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
