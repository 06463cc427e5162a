pub mod kmeans;
pub mod kmeans_config;
pub mod run_stats;
pub mod init;
pub mod lloyd;

pub use kmeans::{KMeans, KMeansFit};
pub use kmeans_config::{KMeansConfig, DEFAULT_MAX_K};
pub use run_stats::RunStats;
