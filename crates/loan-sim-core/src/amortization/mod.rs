pub mod engine;
pub mod params;

pub use engine::{
    monthly_rate, round_currency, run_simulation, simulate, LoanState, PeriodRecord,
    SimulationResult, SimulationWarning,
};
pub use params::{LoanParameters, MAX_MONTHS};
