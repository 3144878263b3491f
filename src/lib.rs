//! # lloyd-kmeans
//!
//! K-means clustering with Lloyd's algorithm over ndarray data.
//!
//! ## Features
//!
//! - **Four seeding strategies**: uniform random sampling, farthest-first
//!   traversal, k-means++ and caller-supplied (manual) centroids
//! - **Step-wise or to convergence**: run a single Lloyd iteration for
//!   inspection, or iterate until the centroids repeat or a cap is reached
//! - **Reproducible**: every random choice comes from an injected `Rng`
//! - **Parallel assignment**: uses rayon to label points, with results
//!   identical to a sequential scan
//!
//! ## Example
//!
//! ```rust
//! use lloyd_kmeans::{initialize_centroids, run_to_convergence, step, InitMethod};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let centroids =
//!     initialize_centroids(&data.view(), 2, InitMethod::FarthestFirst, None, &mut rng).unwrap();
//!
//! // One iteration, with the points grouped by cluster
//! let first = step(&data.view(), &centroids.view()).unwrap();
//! assert_eq!(first.clusters.iter().map(Vec::len).sum::<usize>(), 4);
//!
//! // Or iterate until nothing moves
//! let result = run_to_convergence(&data.view(), &centroids.view(), 100).unwrap();
//! assert!(result.converged());
//! ```
//!
//! ## Model API
//!
//! ```rust
//! use lloyd_kmeans::{InitMethod, KMeans, KMeansConfig};
//! use ndarray::Array2;
//! use ndarray_rand::RandomExt;
//! use ndarray_rand::rand_distr::Uniform;
//!
//! let data = Array2::random((500, 2), Uniform::new(-10.0, 10.0));
//!
//! let config = KMeansConfig::new(5)
//!     .with_init(InitMethod::KMeansPlusPlus)
//!     .with_max_iters(100)
//!     .with_seed(42);
//!
//! let mut kmeans = KMeans::with_config(config);
//! let labels = kmeans.fit_predict(&data.view()).unwrap();
//! assert_eq!(labels.len(), 500);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;

pub use algorithm::{
    assign_labels, fit, fit_default, run_to_convergence, run_to_convergence_with, step,
    RunResult, StepResult, Termination,
};
pub use config::{ConvergenceConfig, KMeansConfig, DEFAULT_MAX_ITERATIONS};
pub use error::KMeansError;
pub use init::{initialize_centroids, InitMethod};
pub use kmeans::KMeans;
