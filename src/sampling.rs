use crate::errors::{PricingError, PricingResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of independent standard-normal variates.
///
/// The Monte Carlo estimator only ever talks to this trait, so tests can
/// swap in a fixed sequence and the CLI can pick a seed.
pub trait NormalSource {
    /// Overwrite every slot of `out` with a fresh N(0, 1) draw.
    fn fill_standard_normal(&mut self, out: &mut [f64]);

    fn standard_normal(&mut self, n: usize) -> Vec<f64> {
        let mut draws = vec![0.0; n];
        self.fill_standard_normal(&mut draws);
        draws
    }
}

/// Seeded PRNG. Same seed, same sequence.
pub struct SeededNormals {
    inner: StdRng,
    seed: u64,
}

impl SeededNormals {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NormalSource for SeededNormals {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        let draws = (&mut self.inner).sample_iter::<f64, _>(StandardNormal);
        out.iter_mut().zip(draws).for_each(|(slot, z)| *slot = z);
    }
}

/// Replays a fixed, non-empty list of draws, cycling when exhausted.
pub struct FixedNormals {
    values: Vec<f64>,
    pos: usize,
}

impl FixedNormals {
    pub fn new(values: Vec<f64>) -> PricingResult<Self> {
        if values.is_empty() {
            return Err(PricingError::Domain("fixed normal source needs at least one draw".into()));
        }
        Ok(Self { values, pos: 0 })
    }
}

impl NormalSource for FixedNormals {
    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.values[self.pos];
            self.pos = (self.pos + 1) % self.values.len();
        }
    }
}
