use crate::error::SimulationError;
use crate::types::Age;

// ── Policy constants ─────────────────────────────────────────────────────────

/// Mean annual market return shared by every simulated year.
pub const MEAN_RETURN: f64 = 0.05;
/// Base standard deviation of the annual return distribution.
pub const BASE_STDDEV: f64 = 0.03;
/// Scenario paths sampled per year.
pub const SCENARIOS: usize = 100_000;
/// The crash year plus the two following years carry inflated volatility.
pub const CRASH_WINDOW_YEARS: usize = 3;
/// Volatility multiplier inside the crash window.
pub const CRASH_VOLATILITY_FACTOR: f64 = 1.5;
/// Volatility multiplier from the retirement year onward. Applied last, so it
/// overrides crash-window inflation where the two overlap.
pub const RETIREMENT_VOLATILITY_FACTOR: f64 = 0.6;
/// Renderer-only: a percentile cell is flagged once value × threshold no
/// longer exceeds the annual withdrawal. Not used by the engine.
pub const WITHDRAWAL_RATE_THRESHOLD: f64 = 0.15;

/// Immutable input record for one simulation run. Owned by the caller and
/// passed by value into the engine; the engine never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub current_balance: f64,
    pub annual_withdrawal: f64,
    pub annual_deposit: f64,
    pub current_age: Age,
    pub retirement_age: Age,
    /// Fraction of balance destroyed at the crash age, in percent (0–100).
    pub market_crash_percentage: f64,
    pub market_crash_age: Age,
}

impl SimulationParameters {
    /// Canonical parameter set: a 20-year-old with a 30k balance saving 7k a
    /// year until retiring at 55 on 14k withdrawals, no crash.
    pub fn canonical() -> Self {
        SimulationParameters {
            current_balance: 30_000.0,
            annual_withdrawal: 14_000.0,
            annual_deposit: 7_000.0,
            current_age: Age(20),
            retirement_age: Age(55),
            market_crash_percentage: 0.0,
            market_crash_age: Age(0),
        }
    }

    /// Check the domain invariants. The age-range invariant is the one the
    /// engine is required to reject; the amount checks reject inputs the
    /// collecting collaborator should never produce.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.current_age >= self.retirement_age {
            return Err(SimulationError::InvalidAgeRange {
                current: self.current_age,
                retirement: self.retirement_age,
            });
        }

        let amounts = [
            ("current balance", self.current_balance),
            ("annual withdrawal", self.annual_withdrawal),
            ("annual deposit", self.annual_deposit),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidAmount { field, value });
            }
        }

        if !self.market_crash_percentage.is_finite()
            || !(0.0..=100.0).contains(&self.market_crash_percentage)
        {
            return Err(SimulationError::CrashPercentageOutOfRange {
                value: self.market_crash_percentage,
            });
        }

        Ok(())
    }

    /// Simulated years between the current age and the horizon.
    pub fn total_years(&self) -> usize {
        self.current_age.years_to_horizon()
    }
}
