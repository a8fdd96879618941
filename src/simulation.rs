use log::warn;
use serde::Serialize;

use crate::config::{BASE_STDDEV, MEAN_RETURN, SCENARIOS, SimulationParameters};
use crate::error::{SimulationError, SimulationWarning};
use crate::projection::BalanceVector;
use crate::returns::ReturnMatrix;
use crate::summary::{SummaryRow, summarize};
use crate::volatility::VolatilitySchedule;

/// One batch simulation run: a parameter record in, an ordered summary table
/// out. Sampling is one parallel phase up front; the year loop is strictly
/// sequential because each year's balances feed the next.
pub struct Simulation {
    params: SimulationParameters,
    scenarios: usize,
    seed: u64,
}

/// The ordered output table plus any non-fatal conditions hit on the way.
/// Rows run from the current age (pre-simulation snapshot) through the
/// horizon, ascending and contiguous by one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub rows: Vec<SummaryRow>,
    pub warnings: Vec<SimulationWarning>,
}

impl Simulation {
    pub fn new(params: SimulationParameters, seed: u64) -> Self {
        Simulation { params, scenarios: SCENARIOS, seed }
    }

    /// Override the scenario count (used in tests and benches).
    pub fn with_scenarios(mut self, scenarios: usize) -> Self {
        self.scenarios = scenarios.max(1);
        self
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Validate, sample, and project. Fails before any computation when the
    /// parameters violate a fatal invariant.
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        self.params.validate()?;
        let params = &self.params;

        let mut warnings = Vec::new();
        if params.market_crash_age < params.current_age {
            let w = SimulationWarning::IneffectiveCrash {
                crash_age: params.market_crash_age,
                current_age: params.current_age,
            };
            warn!("{w}");
            warnings.push(w);
        }

        let total_years = params.total_years();
        let crash_offset = params.current_age.offset_to(params.market_crash_age);
        let retirement_offset = params.current_age.offset_to(params.retirement_age);

        let schedule =
            VolatilitySchedule::build(BASE_STDDEV, total_years, crash_offset, retirement_offset);
        let returns =
            ReturnMatrix::sample_scheduled(MEAN_RETURN, &schedule, self.scenarios, self.seed);

        let mut balances = BalanceVector::replicated(params.current_balance, self.scenarios);
        let mut rows = Vec::with_capacity(total_years + 1);
        rows.push(summarize(params.current_age, balances.as_slice()));

        for year in 0..total_years {
            let age = params.current_age.plus_years(year as u32 + 1);
            balances.advance_year(age, returns.row(year), params);
            rows.push(summarize(age, balances.as_slice()));
        }

        Ok(SimulationReport { rows, warnings })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::{any, proptest};

    use super::*;
    use crate::types::{Age, HORIZON_AGE};

    fn canonical_run(scenarios: usize) -> SimulationReport {
        Simulation::new(SimulationParameters::canonical(), 42)
            .with_scenarios(scenarios)
            .run()
            .expect("canonical parameters must run")
    }

    #[test]
    fn table_spans_current_age_to_horizon() {
        let report = canonical_run(200);
        assert_eq!(report.rows.len(), 81);
        for (i, row) in report.rows.iter().enumerate() {
            assert_eq!(row.age, Age(20 + i as u32), "ages must ascend by one");
        }
        assert_eq!(report.rows.last().expect("nonempty").age, Age(HORIZON_AGE));
    }

    /// Worked example: the snapshot row before any return is applied.
    #[test]
    fn first_row_is_the_degenerate_snapshot() {
        let report = canonical_run(500);
        let first = &report.rows[0];
        assert_eq!(first.age, Age(20));
        for value in [first.worst, first.p25, first.median, first.p75, first.p90, first.best] {
            assert_eq!(value, 30_000.0);
        }
        assert_eq!(first.success_percent, 100.0);
    }

    #[test]
    fn invalid_age_range_produces_no_table() {
        let mut params = SimulationParameters::canonical();
        params.current_age = Age(60);
        params.retirement_age = Age(55);
        let err = Simulation::new(params, 42).with_scenarios(10).run().unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidAgeRange { current: Age(60), retirement: Age(55) }
        );
    }

    /// Canonical parameters put the crash age (0) before the current age, so
    /// the run must complete with an ineffective-crash warning.
    #[test]
    fn past_crash_age_warns_but_completes() {
        let report = canonical_run(100);
        assert_eq!(
            report.warnings,
            vec![SimulationWarning::IneffectiveCrash {
                crash_age: Age(0),
                current_age: Age(20),
            }]
        );
        assert_eq!(report.rows.len(), 81);
    }

    #[test]
    fn future_crash_age_produces_no_warning() {
        let mut params = SimulationParameters::canonical();
        params.market_crash_age = Age(40);
        params.market_crash_percentage = 30.0;
        let report = Simulation::new(params, 42).with_scenarios(100).run().expect("must run");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn same_seed_produces_identical_reports() {
        let run = || canonical_run(300);
        assert_eq!(run(), run(), "same seed must reproduce the table");
    }

    #[test]
    fn different_seeds_produce_different_tables() {
        let run = |seed| {
            Simulation::new(SimulationParameters::canonical(), seed)
                .with_scenarios(300)
                .run()
                .expect("must run")
        };
        assert_ne!(run(1).rows, run(2).rows);
    }

    /// Under a shared seed, a 50 % crash scales the crash-age row to exactly
    /// half of the crash-free run: both runs walk the same pre-crash path.
    #[test]
    fn crash_row_is_half_of_the_crash_free_run() {
        let crash_age = Age(25);
        let run = |pct: f64| {
            let mut params = SimulationParameters::canonical();
            params.market_crash_percentage = pct;
            params.market_crash_age = crash_age;
            Simulation::new(params, 42).with_scenarios(2_000).run().expect("must run")
        };

        let crashed = run(50.0);
        let baseline = run(0.0);

        let index = (crash_age.0 - 20) as usize;
        let c = &crashed.rows[index];
        let b = &baseline.rows[index];
        assert_eq!(c.age, crash_age);
        assert_relative_eq!(c.worst, b.worst * 0.5, max_relative = 1e-12);
        assert_relative_eq!(c.p25, b.p25 * 0.5, max_relative = 1e-12);
        assert_relative_eq!(c.median, b.median * 0.5, max_relative = 1e-12);
        assert_relative_eq!(c.p75, b.p75 * 0.5, max_relative = 1e-12);
        assert_relative_eq!(c.p90, b.p90 * 0.5, max_relative = 1e-12);
        assert_relative_eq!(c.best, b.best * 0.5, max_relative = 1e-12);
        assert_eq!(c.success_percent, b.success_percent);
    }

    #[test]
    fn current_age_at_horizon_yields_single_snapshot_row() {
        let mut params = SimulationParameters::canonical();
        params.current_age = Age(100);
        params.retirement_age = Age(101);
        let report = Simulation::new(params, 42).with_scenarios(50).run().expect("must run");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].age, Age(100));
        assert_eq!(report.rows[0].median, 30_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(24))]

        #[test]
        fn prop_table_shape_and_invariants_hold(
            seed in any::<u64>(),
            current_age in 20u32..80,
            retirement_gap in 1u32..30,
            balance in 0u32..500_000,
            withdrawal in 0u32..60_000,
            deposit in 0u32..60_000,
            crash_pct in 0u32..=100,
            crash_age in 0u32..120,
        ) {
            let params = SimulationParameters {
                current_balance: balance as f64,
                annual_withdrawal: withdrawal as f64,
                annual_deposit: deposit as f64,
                current_age: Age(current_age),
                retirement_age: Age(current_age + retirement_gap),
                market_crash_percentage: crash_pct as f64,
                market_crash_age: Age(crash_age),
            };
            let report = Simulation::new(params, seed).with_scenarios(64).run().expect("valid params");

            // Table shape: one row per age, ascending and contiguous.
            assert_eq!(report.rows.len(), (HORIZON_AGE - current_age) as usize + 1);
            for (i, row) in report.rows.iter().enumerate() {
                assert_eq!(row.age, Age(current_age + i as u32));

                // Flooring and ordering invariants on every row.
                assert!(row.worst >= 0.0);
                assert!(row.worst <= row.p25);
                assert!(row.p25 <= row.median);
                assert!(row.median <= row.p75);
                assert!(row.p75 <= row.p90);
                assert!(row.p90 <= row.best);
                assert!((0.0..=100.0).contains(&row.success_percent));
            }
        }
    }
}
