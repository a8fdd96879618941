use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use crate::volatility::VolatilitySchedule;

/// Annual return samples: one row per simulated year, one column per
/// scenario. Samples are i.i.d. within a row; nothing is correlated across
/// years or scenarios.
///
/// Rows are independent at sampling time, so the whole grid is drawn up
/// front in one parallel phase even though projection consumes it
/// sequentially. Each row draws from its own ChaCha20 stream derived from
/// the master seed, which keeps the output independent of how rayon
/// schedules the rows.
pub struct ReturnMatrix {
    scenarios: usize,
    rows: Vec<Vec<f64>>,
}

impl ReturnMatrix {
    /// Draw `years` rows at a single standard deviation.
    pub fn sample_constant(
        mean: f64,
        stddev: f64,
        years: usize,
        scenarios: usize,
        seed: u64,
    ) -> Self {
        Self::sample_rows(mean, &vec![stddev; years], scenarios, seed)
    }

    /// Draw one row per schedule entry at that year's standard deviation.
    pub fn sample_scheduled(
        mean: f64,
        schedule: &VolatilitySchedule,
        scenarios: usize,
        seed: u64,
    ) -> Self {
        Self::sample_rows(mean, schedule.as_slice(), scenarios, seed)
    }

    fn sample_rows(mean: f64, stddevs: &[f64], scenarios: usize, seed: u64) -> Self {
        let rows = stddevs
            .par_iter()
            .enumerate()
            .map(|(year, &stddev)| {
                let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(year as u64));
                let dist = Normal::new(mean, stddev).expect("invalid Normal params");
                (0..scenarios).map(|_| dist.sample(&mut rng)).collect()
            })
            .collect();
        ReturnMatrix { scenarios, rows }
    }

    pub fn years(&self) -> usize {
        self.rows.len()
    }

    pub fn scenarios(&self) -> usize {
        self.scenarios
    }

    /// The return samples consumed when advancing to year index `year`.
    pub fn row(&self, year: usize) -> &[f64] {
        &self.rows[year]
    }
}
