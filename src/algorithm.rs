use crate::config::{ConvergenceConfig, DEFAULT_MAX_ITERATIONS};
use crate::distance::{centroids_within, compute_centroid_shift, find_nearest_centroids};
use crate::error::KMeansError;
use crate::init::{initialize_centroids, validate_centroids, validate_dataset, InitMethod};
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;
use std::time::Instant;

/// Result of a single Lloyd iteration
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Updated centroids, one row per cluster in input order
    pub centroids: Array2<f64>,
    /// Cluster index of every data point
    pub labels: Array1<usize>,
    /// Point indices grouped by cluster, in dataset order
    pub clusters: Vec<Vec<usize>>,
    /// Clusters that received no points and kept their previous centroid
    pub empty_clusters: Vec<usize>,
}

impl StepResult {
    /// Materialize the points of each cluster, parallel to `clusters`
    pub fn grouped_points(&self, data: &ArrayView2<f64>) -> Vec<Array2<f64>> {
        self.clusters
            .iter()
            .map(|members| data.select(Axis(0), members))
            .collect()
    }
}

/// Why [`run_to_convergence_with`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An iteration reproduced the previous centroids
    Converged,
    /// The iteration cap was reached first
    IterationCapped,
    /// The caller's stop check or the time budget ended the run
    Cancelled,
}

/// Result of running Lloyd iterations to a terminal state
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub centroids: Array2<f64>,
    /// Assignment from the last iteration performed
    pub labels: Array1<usize>,
    pub n_iterations: usize,
    pub termination: Termination,
}

impl RunResult {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Run one Lloyd iteration: assign every point to its nearest centroid, then
/// move each centroid to the mean of its points.
///
/// A centroid with no assigned points keeps its previous value; such
/// clusters are listed in [`StepResult::empty_clusters`].
///
/// # Errors
///
/// Returns an error if the dataset is empty, there are no centroids or more
/// centroids than points, or the dimensions disagree.
pub fn step(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> Result<StepResult, KMeansError> {
    let k = centroids.nrows();
    validate_dataset(data, k)?;
    validate_centroids(data, centroids, k)?;

    Ok(lloyd_step(data, centroids))
}

/// Unchecked iteration body shared by [`step`] and the convergence loop
fn lloyd_step(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> StepResult {
    let k = centroids.nrows();
    let n_features = data.ncols();

    let labels = find_nearest_centroids(data, centroids);

    // Accumulators for new centroids
    let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); k];

    for (i, &label) in labels.iter().enumerate() {
        let mut sum = cluster_sums.row_mut(label);
        sum += &data.row(i);
        clusters[label].push(i);
    }

    let mut new_centroids = centroids.to_owned();
    let mut empty_clusters = Vec::new();

    for (cluster_idx, members) in clusters.iter().enumerate() {
        if members.is_empty() {
            empty_clusters.push(cluster_idx);
            continue;
        }

        let count = members.len() as f64;
        new_centroids
            .row_mut(cluster_idx)
            .assign(&(&cluster_sums.row(cluster_idx) / count));
    }

    if !empty_clusters.is_empty() {
        warn!(
            "{} empty cluster(s) kept their previous centroid: {:?}",
            empty_clusters.len(),
            empty_clusters
        );
    }

    StepResult {
        centroids: new_centroids,
        labels,
        clusters,
        empty_clusters,
    }
}

/// Assign every point to its nearest centroid without updating centroids
pub fn assign_labels(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
) -> Result<Array1<usize>, KMeansError> {
    let k = centroids.nrows();
    validate_dataset(data, k)?;
    validate_centroids(data, centroids, k)?;

    Ok(find_nearest_centroids(data, centroids))
}

/// Iterate from `centroids` until they stop changing or `max_iterations`
/// steps have run. Convergence requires exact equality.
pub fn run_to_convergence(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    max_iterations: usize,
) -> Result<RunResult, KMeansError> {
    run_to_convergence_with(data, centroids, &ConvergenceConfig::new(max_iterations), |_| false)
}

/// Iterate from `centroids` under the stopping rules in `config`.
///
/// `should_stop` is consulted with the number of completed iterations before
/// each new iteration; returning `true` ends the run as
/// [`Termination::Cancelled`] with the centroids reached so far. The
/// optional `max_duration` is checked at the same point.
///
/// # Errors
///
/// Returns an error for the same inputs as [`step`], or if
/// `config.max_iters` is 0. Nothing is computed on error.
pub fn run_to_convergence_with<F>(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    config: &ConvergenceConfig,
    mut should_stop: F,
) -> Result<RunResult, KMeansError>
where
    F: FnMut(usize) -> bool,
{
    let k = centroids.nrows();
    validate_dataset(data, k)?;
    validate_centroids(data, centroids, k)?;

    if config.max_iters == 0 {
        return Err(KMeansError::InvalidIterations(
            "max_iters must be at least 1".to_string(),
        ));
    }

    let start = Instant::now();
    let mut centroids = centroids.to_owned();
    let mut labels = None;
    let mut n_iterations = 0;
    let mut termination = Termination::IterationCapped;

    for iteration in 0..config.max_iters {
        let timed_out = config
            .max_duration
            .map_or(false, |budget| start.elapsed() >= budget);
        if timed_out || should_stop(iteration) {
            termination = Termination::Cancelled;
            break;
        }

        let iter_start = Instant::now();
        let result = lloyd_step(data, &centroids.view());
        n_iterations = iteration + 1;

        let stable = config.tol >= 0.0
            && centroids_within(&centroids.view(), &result.centroids.view(), config.tol);

        debug!(
            "Iteration {}/{}: shift = {:.6}, time = {:.4}s",
            n_iterations,
            config.max_iters,
            compute_centroid_shift(&centroids.view(), &result.centroids.view()),
            iter_start.elapsed().as_secs_f64()
        );

        centroids = result.centroids;
        labels = Some(result.labels);

        if stable {
            termination = Termination::Converged;
            break;
        }
    }

    match termination {
        Termination::Converged => info!("Converged after {} iterations", n_iterations),
        Termination::IterationCapped => info!(
            "Stopped at the iteration cap ({}) without converging",
            config.max_iters
        ),
        Termination::Cancelled => info!("Cancelled after {} iterations", n_iterations),
    }

    // Cancelled before the first step: label against the starting centroids
    let labels = labels.unwrap_or_else(|| find_nearest_centroids(data, &centroids.view()));

    Ok(RunResult {
        centroids,
        labels,
        n_iterations,
        termination,
    })
}

/// Initialize centroids with `method`, then run to convergence.
///
/// This is the one-call entry point: `labels` in the result are the final
/// assignment.
pub fn fit<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    method: InitMethod,
    manual_centroids: Option<&ArrayView2<f64>>,
    rng: &mut R,
    config: &ConvergenceConfig,
) -> Result<RunResult, KMeansError> {
    if config.max_iters == 0 {
        return Err(KMeansError::InvalidIterations(
            "max_iters must be at least 1".to_string(),
        ));
    }

    // The time budget covers seeding as well as iteration
    let start = Instant::now();
    let initial = initialize_centroids(data, k, method, manual_centroids, rng)?;

    run_to_convergence_with(
        data,
        &initial.view(),
        &ConvergenceConfig {
            max_duration: None,
            ..*config
        },
        |_| {
            config
                .max_duration
                .map_or(false, |budget| start.elapsed() >= budget)
        },
    )
}

/// [`fit`] with the default iteration cap and exact convergence
pub fn fit_default<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    method: InitMethod,
    rng: &mut R,
) -> Result<RunResult, KMeansError> {
    fit(
        data,
        k,
        method,
        None,
        rng,
        &ConvergenceConfig::new(DEFAULT_MAX_ITERATIONS),
    )
}
