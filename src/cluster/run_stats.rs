/// Outcome of one seeded k-means restart.
///
/// `KMeans::fit` records one `RunStats` per restart; the CLI prints them in
/// verbose mode and the library logs them at `debug` level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    /// 0-based restart index.
    pub restart: usize,
    /// Number of centroid update steps performed.
    pub iterations: usize,
    /// Total within-cluster squared distance of the final state.
    pub inertia: f64,
    /// `false` when the iteration cap was hit before assignments stabilized.
    pub converged: bool,
    /// How many times an empty cluster had to be re-seeded.
    pub reseeded: usize,
}
