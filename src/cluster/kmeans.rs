use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cluster::init::kmeans_plus_plus;
use crate::cluster::kmeans_config::KMeansConfig;
use crate::cluster::lloyd::{lloyd, LloydOutcome};
use crate::cluster::run_stats::RunStats;
use crate::color::buffer::ColorHistogram;
use crate::error::{QuantError, Result};

/// Result of clustering a color histogram.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Unrounded centroids of the winning restart, in index order.
    pub centroids: Vec<[f64; 3]>,
    /// Total within-cluster squared distance of the winning restart.
    pub inertia: f64,
    /// Index into `runs` of the winning restart, or `None` when clustering was
    /// skipped because the image has no more than `k` distinct colors.
    pub best_run: Option<usize>,
    /// One entry per restart, in the order they ran.
    pub runs: Vec<RunStats>,
}

/// Seeded, restartable k-means over weighted RGB points.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Validates the configuration up front so that a bad `k` never reaches
    /// the clustering loop.
    pub fn new(config: KMeansConfig) -> Result<KMeans> {
        config.validate()?;
        Ok(KMeans { config })
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Clusters the histogram into at most `k` centroids.
    ///
    /// With `d <= k` distinct colors the centroids are those `d` colors and no
    /// restarts run. Otherwise `n_init` restarts draw from one `StdRng` seeded
    /// with `config.seed`, and the restart with the lowest inertia is kept
    /// (the earliest on ties).
    pub fn fit(&self, histogram: &ColorHistogram) -> Result<KMeansFit> {
        if histogram.is_empty() {
            return Err(QuantError::EmptyImage);
        }

        let points = histogram.points();
        let counts = &histogram.counts;
        let k = self.config.k;

        if histogram.len() <= k {
            debug!("only {} distinct colors for k = {k}; using them directly", histogram.len());
            return Ok(KMeansFit {
                centroids: points,
                inertia: 0.0,
                best_run: None,
                runs: Vec::new(),
            });
        }

        let weights: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut runs = Vec::with_capacity(self.config.n_init);
        let mut best: Option<(usize, LloydOutcome)> = None;

        for restart in 0..self.config.n_init {
            let seeds = kmeans_plus_plus(&points, &weights, k, &mut rng);
            let outcome = lloyd(&points, counts, seeds, self.config.max_iterations);

            let stats = RunStats {
                restart,
                iterations: outcome.iterations,
                inertia: outcome.inertia,
                converged: outcome.converged,
                reseeded: outcome.reseeded,
            };
            debug!(
                "restart {restart}: {} iterations, inertia {:.1}, converged = {}",
                stats.iterations, stats.inertia, stats.converged
            );
            runs.push(stats);

            let better = match &best {
                Some((_, current)) => outcome.inertia < current.inertia,
                None => true,
            };
            if better {
                best = Some((restart, outcome));
            }
        }

        // `n_init >= 1` is enforced by `validate`.
        let (best_run, outcome) = best.ok_or(QuantError::InvalidIterations)?;
        Ok(KMeansFit {
            centroids: outcome.centroids,
            inertia: outcome.inertia,
            best_run: Some(best_run),
            runs,
        })
    }
}
