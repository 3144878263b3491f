//! Centroid seeding strategies.
//!
//! Every strategy draws its randomness from a caller-supplied [`Rng`], so a
//! seeded generator such as `ChaCha8Rng` makes the result reproducible.

use crate::distance::update_min_squared_distances;
use crate::error::KMeansError;
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// How the initial centroid set is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitMethod {
    /// k distinct dataset points drawn uniformly without replacement
    #[default]
    Random,
    /// Greedy traversal picking the point farthest from the chosen centroids
    FarthestFirst,
    /// Sampling weighted by squared distance to the nearest chosen centroid
    KMeansPlusPlus,
    /// Caller-supplied centroids, validated and returned as-is
    Manual,
}

impl InitMethod {
    /// Name used by the transport layer
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::FarthestFirst => "farthest_first",
            InitMethod::KMeansPlusPlus => "kmeans++",
            InitMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitMethod {
    type Err = KMeansError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "farthest_first" => Ok(InitMethod::FarthestFirst),
            "kmeans++" => Ok(InitMethod::KMeansPlusPlus),
            "manual" => Ok(InitMethod::Manual),
            other => Err(KMeansError::UnknownInitMethod(other.to_string())),
        }
    }
}

/// Check that `data` can be split into `k` clusters
pub(crate) fn validate_dataset(data: &ArrayView2<f64>, k: usize) -> Result<(), KMeansError> {
    let n_samples = data.nrows();

    if n_samples == 0 {
        return Err(KMeansError::EmptyDataset);
    }

    if data.ncols() == 0 {
        return Err(KMeansError::InvalidDimensions(
            "points must have at least one coordinate".to_string(),
        ));
    }

    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_samples < k {
        return Err(KMeansError::InsufficientData(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    Ok(())
}

/// Check that `centroids` holds exactly `k` points shaped like the dataset
pub(crate) fn validate_centroids(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    k: usize,
) -> Result<(), KMeansError> {
    if centroids.nrows() != k {
        return Err(KMeansError::InvalidCentroids(format!(
            "expected {} centroids, got {}",
            k,
            centroids.nrows()
        )));
    }

    if centroids.ncols() != data.ncols() {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected {} features, got {}",
            data.ncols(),
            centroids.ncols()
        )));
    }

    Ok(())
}

/// Produce `k` initial centroids for `data` using `method`.
///
/// `manual_centroids` is only consulted for [`InitMethod::Manual`].
///
/// # Errors
///
/// Returns an error if the dataset is empty, `k` is 0 or exceeds the number
/// of points, or manual centroids are missing or have the wrong shape.
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    method: InitMethod,
    manual_centroids: Option<&ArrayView2<f64>>,
    rng: &mut R,
) -> Result<Array2<f64>, KMeansError> {
    validate_dataset(data, k)?;

    let centroids = match method {
        InitMethod::Random => random_init(data, k, rng),
        InitMethod::FarthestFirst => farthest_first_init(data, k, rng),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus_init(data, k, rng),
        InitMethod::Manual => {
            let supplied = manual_centroids.ok_or(KMeansError::MissingCentroids)?;
            validate_centroids(data, supplied, k)?;
            supplied.to_owned()
        }
    };

    debug!(
        "Initialized {} centroids with {} ({} samples, {} features)",
        k,
        method,
        data.nrows(),
        data.ncols()
    );

    Ok(centroids)
}

/// Copy the rows at `indices`, in order
fn gather_rows(data: &ArrayView2<f64>, indices: &[usize]) -> Array2<f64> {
    data.select(Axis(0), indices)
}

fn random_init<R: Rng + ?Sized>(data: &ArrayView2<f64>, k: usize, rng: &mut R) -> Array2<f64> {
    let selected = rand::seq::index::sample(rng, data.nrows(), k).into_vec();
    gather_rows(data, &selected)
}

fn farthest_first_init<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let mut selected = Vec::with_capacity(k);
    selected.push(rng.gen_range(0..n_samples));

    let mut min_dists = Array1::from_elem(n_samples, f64::INFINITY);

    while selected.len() < k {
        let last = selected[selected.len() - 1];
        update_min_squared_distances(data, &data.row(last), &mut min_dists);

        // Strict comparison keeps the first occurrence on ties
        let mut best_idx = 0;
        let mut best_dist = f64::NEG_INFINITY;
        for (i, &sq) in min_dists.iter().enumerate() {
            let dist = sq.sqrt();
            if dist > best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        selected.push(best_idx);
    }

    gather_rows(data, &selected)
}

fn kmeans_plus_plus_init<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let mut selected = Vec::with_capacity(k);
    selected.push(rng.gen_range(0..n_samples));

    let mut min_dists = Array1::from_elem(n_samples, f64::INFINITY);

    while selected.len() < k {
        let last = selected[selected.len() - 1];
        update_min_squared_distances(data, &data.row(last), &mut min_dists);

        let next = match sample_weighted(&min_dists, rng) {
            Ok(idx) => idx,
            Err(total) => {
                warn!(
                    "{} (sum = {}); choosing the next centroid uniformly",
                    unusable_total_reason(total),
                    total
                );
                rng.gen_range(0..n_samples)
            }
        };

        selected.push(next);
    }

    gather_rows(data, &selected)
}

/// Draw an index with probability proportional to `weights` by inverting the
/// cumulative distribution.
///
/// Fails with the weight total when it cannot be normalized (zero or
/// non-finite).
fn sample_weighted<R: Rng + ?Sized>(weights: &Array1<f64>, rng: &mut R) -> Result<usize, f64> {
    let total: f64 = weights.sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(total);
    }

    let r: f64 = rng.gen();
    pick_cumulative(weights, total, r).ok_or(total)
}

/// First index whose cumulative share of `total` exceeds `r`, for `r` in [0,1).
///
/// Zero-weight entries can never be the first to cross `r`. If rounding
/// leaves the final share at or below `r`, the last positive-weight index is
/// returned instead.
fn pick_cumulative(weights: &Array1<f64>, total: f64, r: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            last_positive = Some(i);
        }
        cumulative += w;
        if cumulative / total > r {
            return Some(i);
        }
    }

    last_positive
}

fn unusable_total_reason(total: f64) -> &'static str {
    if total == 0.0 {
        "All squared distances are zero"
    } else {
        "Squared distances do not sum to a finite value"
    }
}
