//! Monte Carlo retirement-balance simulator.
//!
//! Given a parameter record, the engine projects a large batch of
//! independent scenario balances year by year to age 100 and reduces each
//! year to a summary row (minimum, quartiles, 90th percentile, maximum,
//! success rate). The scenario dimension is data-parallel; the year
//! dimension is sequential.

pub mod config;
pub mod error;
pub mod projection;
pub mod report;
pub mod returns;
pub mod simulation;
pub mod summary;
pub mod types;
pub mod volatility;

pub use config::SimulationParameters;
pub use error::{SimulationError, SimulationWarning};
pub use simulation::{Simulation, SimulationReport};
pub use summary::SummaryRow;
