
use crate::error::{QuantError, Result};

/// Largest palette the core accepts unless configured otherwise.
pub const DEFAULT_MAX_K: usize = 256;

/// Configuration for a `KMeans::fit` run.
///
/// # Fields
/// - `k`              : number of centroids (palette size)
/// - `max_k`          : upper bound accepted for `k`
/// - `n_init`         : number of seeded restarts; the one with the lowest
///                      inertia wins
/// - `max_iterations` : cap on Lloyd update steps per restart
/// - `seed`           : seed for the single `StdRng` stream all restarts draw
///                      from; same input + same config gives the same palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansConfig {
    pub k: usize,
    pub max_k: usize,
    pub n_init: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl KMeansConfig {
    /// Default settings with the given palette size.
    pub fn new(k: usize) -> Self {
        KMeansConfig { k, ..KMeansConfig::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_restarts(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_k(mut self, max_k: usize) -> Self {
        self.max_k = max_k;
        self
    }

    /// Rejects settings the clustering loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 || self.k > self.max_k {
            return Err(QuantError::InvalidK { k: self.k, max: self.max_k });
        }
        if self.n_init == 0 || self.max_iterations == 0 {
            return Err(QuantError::InvalidIterations);
        }
        Ok(())
    }
}

impl Default for KMeansConfig {
    fn default() -> Self {
        KMeansConfig {
            k: 3,
            max_k: DEFAULT_MAX_K,
            n_init: 10,
            max_iterations: 300,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0)]
    #[case::above_max(DEFAULT_MAX_K + 1)]
    fn out_of_range_k_is_rejected(#[case] k: usize) {
        let err = KMeansConfig::new(k).validate().unwrap_err();
        assert!(matches!(err, QuantError::InvalidK { .. }));
    }

    #[rstest]
    #[case::one(1)]
    #[case::web_max(10)]
    #[case::max(DEFAULT_MAX_K)]
    fn in_range_k_is_accepted(#[case] k: usize) {
        assert!(KMeansConfig::new(k).validate().is_ok());
    }

    #[test]
    fn custom_max_k_is_honoured() {
        let cfg = KMeansConfig::new(11).with_max_k(10);
        assert!(matches!(cfg.validate(), Err(QuantError::InvalidK { k: 11, max: 10 })));
    }

    #[test]
    fn zero_restarts_or_iterations_is_rejected() {
        assert!(matches!(
            KMeansConfig::new(3).with_restarts(0).validate(),
            Err(QuantError::InvalidIterations)
        ));
        assert!(matches!(
            KMeansConfig::new(3).with_max_iterations(0).validate(),
            Err(QuantError::InvalidIterations)
        ));
    }
}
