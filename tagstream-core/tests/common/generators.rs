//! Stochastic chunk partitioning for boundary tests
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("TAGSTREAM_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Split `input` into chunks at up to `max_cuts` random char
    /// boundaries. Returns at least one chunk; chunks concatenate back to
    /// the input.
    pub fn partition<'a>(&mut self, input: &'a str, max_cuts: usize) -> Vec<&'a str> {
        let boundaries: Vec<usize> = input
            .char_indices()
            .map(|(i, _)| i)
            .filter(|&i| i > 0)
            .collect();
        if boundaries.is_empty() {
            return vec![input];
        }

        let cuts = self.rng.gen_range(0..=boundaries.len().min(max_cuts));
        let mut picks = rand::seq::index::sample(&mut self.rng, boundaries.len(), cuts).into_vec();
        picks.sort_unstable();

        let mut chunks = Vec::with_capacity(cuts + 1);
        let mut prev = 0;
        for p in picks {
            chunks.push(&input[prev..boundaries[p]]);
            prev = boundaries[p];
        }
        chunks.push(&input[prev..]);
        chunks
    }
}
