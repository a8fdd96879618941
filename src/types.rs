use serde::Serialize;

/// Every projection runs to this age inclusive. The output table has one row
/// per age from the starting age (pre-simulation snapshot) through the
/// horizon, ascending and contiguous.
pub const HORIZON_AGE: u32 = 100;

/// Age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Age(pub u32);

impl Age {
    /// Number of simulated years between this age and the horizon.
    /// Saturates at zero for ages at or past the horizon.
    pub fn years_to_horizon(self) -> usize {
        HORIZON_AGE.saturating_sub(self.0) as usize
    }

    /// Offset of `other` relative to this age, in whole years.
    /// Negative when `other` lies in the past.
    pub fn offset_to(self, other: Age) -> i64 {
        other.0 as i64 - self.0 as i64
    }

    pub fn plus_years(self, years: u32) -> Age {
        Age(self.0 + years)
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
