use rayon::prelude::*;

use crate::config::SimulationParameters;
use crate::types::Age;

/// Per-scenario balances, updated in place year over year. Every entry is
/// ≥ 0 after each update; scenario order is stable so column `j` always
/// tracks the same simulated path.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceVector {
    values: Vec<f64>,
}

impl BalanceVector {
    /// All scenarios start from the same balance.
    pub fn replicated(balance: f64, scenarios: usize) -> Self {
        BalanceVector { values: vec![balance; scenarios] }
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

    /// Advance every scenario by one year, given that year's return samples.
    ///
    /// The order is fixed: growth plus the deposit/withdrawal flow, then the
    /// floor at zero, then the crash multiplier. The crash therefore acts on
    /// the already-floored balance for the year and fires only on an exact
    /// age match. Scenarios are independent, so the update runs data-parallel
    /// across the vector.
    pub fn advance_year(&mut self, age: Age, returns: &[f64], params: &SimulationParameters) {
        debug_assert_eq!(self.values.len(), returns.len());

        let flow = if age >= params.retirement_age {
            -params.annual_withdrawal
        } else {
            params.annual_deposit
        };
        let crash_factor = if age == params.market_crash_age {
            1.0 - params.market_crash_percentage / 100.0
        } else {
            1.0
        };

        self.values
            .par_iter_mut()
            .zip(returns.par_iter())
            .for_each(|(balance, r)| {
                *balance = (*balance * (1.0 + r) + flow).max(0.0) * crash_factor;
            });
    }
}
