use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Squared Euclidean distance between two points of equal dimensionality
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two points of equal dimensionality
#[inline]
pub fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Find the centroid closest to `point`.
///
/// Returns `(index, squared_distance)`. Ties go to the lowest index, so the
/// first centroid in iteration order wins.
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_euclidean(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = j;
        }
    }

    (best_idx, best_dist)
}

/// Find the nearest centroid for each data point.
///
/// Rows are independent, so the work is spread over the rayon pool; the
/// labels are the same as a sequential scan would produce.
pub fn find_nearest_centroids(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> Array1<usize> {
    let labels: Vec<usize> = (0..data.nrows())
        .into_par_iter()
        .map(|i| nearest_centroid(&data.row(i), centroids).0)
        .collect();

    Array1::from(labels)
}

/// Lower each entry of `min_dists` to the squared distance from the matching
/// data point to `centroid`, if that is closer.
///
/// Keeps the "distance to nearest chosen centroid" table current while
/// seeding, so each new centroid costs one pass over the data.
pub fn update_min_squared_distances(
    data: &ArrayView2<f64>,
    centroid: &ArrayView1<f64>,
    min_dists: &mut Array1<f64>,
) {
    Zip::indexed(min_dists).par_for_each(|i, best| {
        let dist = squared_euclidean(&data.row(i), centroid);
        if dist < *best {
            *best = dist;
        }
    });
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| euclidean(&old_c, &new_c))
        .sum()
}

/// Check whether every component of `new_centroids` lies within `tol` of
/// the matching component of `old_centroids`.
///
/// With `tol == 0.0` this is exact componentwise equality.
pub fn centroids_within(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
    tol: f64,
) -> bool {
    if old_centroids.shape() != new_centroids.shape() {
        return false;
    }

    if tol == 0.0 {
        return old_centroids == new_centroids;
    }

    old_centroids
        .iter()
        .zip(new_centroids.iter())
        .all(|(&a, &b)| (a - b).abs() <= tol)
}
