use loan_sim_core::amortization::{PeriodRecord, SimulationResult};
use loan_sim_core::Money;
use tabled::{Table, builder::Builder};

use super::SimulationOutput;

const SCHEDULE_HEADERS: [&str; 8] = [
    "Month",
    "Opening",
    "Interest",
    "Principal",
    "Payment",
    "Closing",
    "Accumulated Interest",
    "Total Paid",
];

/// Print the schedule, a summary block, warnings and methodology.
pub fn print_table(output: &SimulationOutput) {
    print_schedule(&output.result.periods);
    println!();
    print_summary(&output.result);

    if !output.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &output.warnings {
            println!("  - {}", w);
        }
    }

    println!("\nMethodology: {}", output.methodology);
}

fn print_schedule(periods: &[PeriodRecord]) {
    if periods.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_HEADERS);
    for p in periods {
        builder.push_record([
            p.period.to_string(),
            money(p.opening_balance),
            money(p.interest),
            money(p.principal_paid),
            money(p.payment),
            money(p.closing_balance),
            money(p.accumulated_interest),
            money(p.total_paid),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn print_summary(result: &SimulationResult) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Initial balance".to_string(), money(result.initial_balance)]);
    builder.push_record(["Months simulated".to_string(), result.periods.len().to_string()]);
    builder.push_record(["Total interest".to_string(), money(result.total_interest_paid)]);
    builder.push_record(["Total paid".to_string(), money(result.total_paid)]);
    builder.push_record(["Final balance".to_string(), money(result.final_balance)]);
    builder.push_record(["Interest share".to_string(), format!("{:.2}%", result.interest_share)]);
    builder.push_record(["Paid off".to_string(), result.converged.to_string()]);
    println!("{}", Table::from(builder));
}

fn money(value: Money) -> String {
    format!("{:.2}", value)
}
