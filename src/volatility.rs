use crate::config::{CRASH_VOLATILITY_FACTOR, CRASH_WINDOW_YEARS, RETIREMENT_VOLATILITY_FACTOR};

/// Volatility regime of a single simulated year. Every year belongs to
/// exactly one regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Normal,
    /// Crash year and the two following years.
    CrashWindow,
    /// Retirement year onward. Takes precedence over the crash window.
    Retired,
}

impl Regime {
    fn factor(self) -> f64 {
        match self {
            Regime::Normal => 1.0,
            Regime::CrashWindow => CRASH_VOLATILITY_FACTOR,
            Regime::Retired => RETIREMENT_VOLATILITY_FACTOR,
        }
    }
}

/// Per-year return standard deviations for the whole projection horizon,
/// derived from the base volatility and the two regime multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilitySchedule {
    values: Vec<f64>,
}

impl VolatilitySchedule {
    /// Build the schedule for `total_years` simulated years.
    ///
    /// `crash_offset` and `retirement_offset` are year indices relative to
    /// the first simulated year and may lie outside `[0, total_years)`.
    /// A crash offset that is negative or at/past the horizon leaves the
    /// schedule uninflated; a window that starts in range but runs past the
    /// end is truncated at the horizon.
    pub fn build(base: f64, total_years: usize, crash_offset: i64, retirement_offset: i64) -> Self {
        let values = (0..total_years)
            .map(|i| base * Self::regime_at(i, crash_offset, retirement_offset).factor())
            .collect();
        VolatilitySchedule { values }
    }

    /// Classify year index `i`. Retirement dampening is applied last and
    /// overrides crash-window inflation for any overlapping year.
    pub fn regime_at(i: usize, crash_offset: i64, retirement_offset: i64) -> Regime {
        let idx = i as i64;
        if idx >= retirement_offset {
            Regime::Retired
        } else if crash_offset >= 0
            && idx >= crash_offset
            && idx < crash_offset + CRASH_WINDOW_YEARS as i64
        {
            Regime::CrashWindow
        } else {
            Regime::Normal
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
