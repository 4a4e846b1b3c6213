use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::amortization::SimulationResult;
use crate::{LoanSimError, LoanSimResult, types::Money};

pub const DEFAULT_CSV_FILENAME: &str = "loan_simulation.csv";

pub const HEADERS: [&str; 8] = [
    "Period",
    "Opening Balance",
    "Interest",
    "Principal Paid",
    "Payment",
    "Closing Balance",
    "Accumulated Interest",
    "Total Paid",
];

const SUMMARY_LABEL: &str = "Total";

fn money(value: Money) -> String {
    format!("{value:.2}")
}

/// Write the schedule as CSV: header, one row per period, then a `Total` row.
pub fn write_csv<W: Write>(result: &SimulationResult, writer: W) -> LoanSimResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for p in &result.periods {
        wtr.write_record([
            p.period.to_string(),
            money(p.opening_balance),
            money(p.interest),
            money(p.principal_paid),
            money(p.payment),
            money(p.closing_balance),
            money(p.accumulated_interest),
            money(p.total_paid),
        ])?;
    }

    wtr.write_record([
        SUMMARY_LABEL.to_string(),
        money(result.initial_balance),
        money(result.total_interest_paid),
        money(result.total_principal_paid()),
        money(result.total_paid),
        money(result.final_balance),
        money(result.total_interest_paid),
        money(result.total_paid),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Export the schedule to `path`.
///
/// Rows are written to a temporary file next to the destination, which is
/// renamed over it only once everything has been flushed. On failure the
/// destination is untouched and the temporary file is removed.
pub fn export_csv(result: &SimulationResult, path: impl AsRef<Path>) -> LoanSimResult<()> {
    let path = path.as_ref();
    let fail = |reason: String| LoanSimError::Export {
        path: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".loansim-")
        .suffix(".csv.tmp")
        .tempfile_in(dir)
        .map_err(|e| fail(e.to_string()))?;

    write_csv(result, tmp.as_file_mut()).map_err(|e| fail(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| fail(e.to_string()))?;
    tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

    info!(
        path = %path.display(),
        rows = result.periods.len(),
        "schedule exported"
    );
    Ok(())
}
