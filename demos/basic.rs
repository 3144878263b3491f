//! Basic example demonstrating lloyd-kmeans usage
//!
//! Run with: cargo run --example basic --release

use lloyd_kmeans::{initialize_centroids, step, InitMethod, KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    env_logger::init();

    println!("=== lloyd-kmeans example ===\n");

    let n_samples = 300;
    let n_clusters = 3;

    // Create clustered data by generating points around 3 centers
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, 2), Uniform::new(-1.0, 1.0));
    let data = Array2::from_shape_fn((n_samples, 2), |(i, j)| centers[i % 3][j] + noise[[i, j]]);

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    // Walk through the first few Lloyd iterations by hand
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut centroids =
        initialize_centroids(&data.view(), n_clusters, InitMethod::KMeansPlusPlus, None, &mut rng)
            .expect("Initialization failed");

    for iteration in 1..=3 {
        let result = step(&data.view(), &centroids.view()).expect("Step failed");
        let sizes: Vec<usize> = result.clusters.iter().map(Vec::len).collect();
        println!("Step {}: cluster sizes {:?}", iteration, sizes);
        centroids = result.centroids;
    }
    println!();

    // Or let the model run to convergence
    for method in [
        InitMethod::Random,
        InitMethod::FarthestFirst,
        InitMethod::KMeansPlusPlus,
    ] {
        let config = KMeansConfig::new(n_clusters).with_init(method).with_seed(42);
        let mut kmeans = KMeans::with_config(config);
        let labels = kmeans.fit_predict(&data.view()).expect("Fit failed");

        println!("{} -> {:?}", method, kmeans.last_run());
        if let Some(centroids) = kmeans.centroids() {
            for (i, c) in centroids.outer_iter().enumerate() {
                let count = labels.iter().filter(|&&l| l == i).count();
                println!("  Centroid {}: ({:.4}, {:.4}), {} samples", i, c[0], c[1], count);
            }
        }
    }

    println!("\n=== Done! ===");
}
