//! Weighted reel strip generation

use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

use crate::weights::WeightTable;

/// Generates reel strips from a weighted symbol distribution.
///
/// Holds its own RNG so generation stays request-local; seed it for
/// reproducible output in tests and simulations.
pub struct ReelGenerator {
    rng: StdRng,
}

impl ReelGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed for reproducible results.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate one reel strip of `length` symbols.
    ///
    /// Draws `length` independent samples with replacement, each symbol's
    /// probability being `weight / total` after the bomb multiplier has been
    /// applied to a working copy of `table`. Then the rigging pass: every
    /// entry of `bias_symbols`, in order, overwrites one uniformly chosen
    /// position that does not already hold a bias-list symbol, so each
    /// requested symbol ends up in the strip at least once. Insertions with
    /// no eligible position left are skipped silently.
    ///
    /// This never fails: a degenerate adjusted table (e.g. every weight
    /// driven to zero by a multiplier of 0) falls back to sampling from the
    /// builtin table.
    pub fn generate_strip(
        &mut self,
        table: &WeightTable,
        length: usize,
        bias_symbols: &[String],
        bomb_multiplier: f64,
    ) -> Vec<String> {
        let mut working = table.clone();
        working.apply_bomb_multiplier(bomb_multiplier);

        let mut strip = match self.sample(&working, length) {
            Some(strip) => strip,
            None => {
                log::warn!("degenerate weight table after multiplier, sampling builtin");
                self.sample(&WeightTable::builtin(), length)
                    .unwrap_or_default()
            }
        };

        for bias in bias_symbols {
            let eligible: Vec<usize> = (0..strip.len())
                .filter(|&i| !bias_symbols.contains(&strip[i]))
                .collect();
            if let Some(&idx) = eligible.choose(&mut self.rng) {
                strip[idx] = bias.clone();
            }
        }

        strip
    }

    fn sample(&mut self, table: &WeightTable, length: usize) -> Option<Vec<String>> {
        let (population, weights): (Vec<&str>, Vec<f64>) = table.entries().unzip();
        let dist = WeightedIndex::new(&weights).ok()?;
        Some(
            (0..length)
                .map(|_| population[dist.sample(&mut self.rng)].to_string())
                .collect(),
        )
    }
}

impl Default for ReelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
