use crate::init::InitMethod;
use std::time::Duration;

/// Iteration cap used when the caller does not pick one
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Configuration for a k-means model
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Centroid initialization strategy
    pub init: InitMethod,

    /// Maximum number of Lloyd iterations
    pub max_iters: usize,

    /// Convergence tolerance on the largest componentwise centroid change.
    /// `0.0` requires the centroids to repeat exactly. Set to a negative
    /// value to disable early stopping.
    pub tol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Optional wall-clock bound, checked between iterations
    pub max_duration: Option<Duration>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            init: InitMethod::Random,
            max_iters: DEFAULT_MAX_ITERATIONS,
            tol: 0.0,
            seed: 0,
            max_duration: None,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the initialization strategy
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Bound the wall-clock time spent iterating
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// The stopping rules handed to the clustering engine
    pub fn convergence(&self) -> ConvergenceConfig {
        ConvergenceConfig {
            max_iters: self.max_iters,
            tol: self.tol,
            max_duration: self.max_duration,
        }
    }
}

/// Stopping rules for [`run_to_convergence_with`](crate::run_to_convergence_with)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceConfig {
    pub max_iters: usize,
    pub tol: f64,
    pub max_duration: Option<Duration>,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            max_iters: DEFAULT_MAX_ITERATIONS,
            tol: 0.0,
            max_duration: None,
        }
    }
}

impl ConvergenceConfig {
    pub fn new(max_iters: usize) -> Self {
        Self {
            max_iters,
            ..Default::default()
        }
    }
}
