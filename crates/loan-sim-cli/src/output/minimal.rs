use loan_sim_core::amortization::SimulationResult;

/// Print just the key answer: the total paid over the schedule, or the
/// balance left over when the loan was not paid off.
pub fn print_minimal(result: &SimulationResult) {
    if result.converged {
        println!("{:.2}", result.total_paid);
    } else {
        println!("outstanding: {:.2}", result.final_balance);
    }
}
