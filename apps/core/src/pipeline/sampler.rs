//! Seeded random sampling without replacement.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws a fixed fraction of a population.
///
/// Every call re-seeds the generator, so sampling the same rows twice gives
/// the same result, and each chunk of a run is sampled with the same seed.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    frac: f64,
    seed: u64,
}

impl Sampler {
    pub fn new(frac: f64, seed: u64) -> Self {
        Self {
            frac: frac.clamp(0.0, 1.0),
            seed,
        }
    }

    /// Rows drawn from a population: `frac * population`, halves rounded to even
    pub fn sample_size(&self, population: usize) -> usize {
        let size = (population as f64 * self.frac).round_ties_even() as usize;
        size.min(population)
    }

    /// Sample rows, keeping their original relative order
    pub fn sample<T>(&self, rows: Vec<T>) -> Vec<T> {
        let amount = self.sample_size(rows.len());
        if amount == rows.len() {
            return rows;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut keep = vec![false; rows.len()];
        for i in index::sample(&mut rng, rows.len(), amount).into_vec() {
            keep[i] = true;
        }

        rows.into_iter()
            .zip(keep)
            .filter_map(|(row, kept)| kept.then_some(row))
            .collect()
    }
}
