use serde::Serialize;
use thiserror::Error;

use crate::types::Age;

/// Fatal validation failures. The engine refuses to run and no table is
/// produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("current age {current} must be below retirement age {retirement}")]
    InvalidAgeRange { current: Age, retirement: Age },

    #[error("{field} must be a finite non-negative amount, got {value}")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("market crash percentage must lie in [0, 100], got {value}")]
    CrashPercentageOutOfRange { value: f64 },
}

/// Non-fatal conditions surfaced on the report. The run still completes and
/// produces a full table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum SimulationWarning {
    /// The crash age lies in the past, so no simulated age can match it and
    /// the crash never fires.
    IneffectiveCrash { crash_age: Age, current_age: Age },
}

impl std::fmt::Display for SimulationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationWarning::IneffectiveCrash { crash_age, current_age } => write!(
                f,
                "market crash at age {crash_age} was not applied: it predates current age {current_age}"
            ),
        }
    }
}
