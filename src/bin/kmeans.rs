//! Command-line front end for lloyd-kmeans
//!
//! Reads a dataset from a .npy file, clusters it, and saves the resulting
//! centroids to another .npy file. Set `RUST_LOG=debug` for per-iteration
//! output.
//!
//! Usage: `kmeans <input.npy> <output.npy> <k> <method> <seed> [max_iters]`
//!
//! `method` is one of `random`, `farthest_first` or `kmeans++`.

use lloyd_kmeans::{InitMethod, KMeans, KMeansConfig, DEFAULT_MAX_ITERATIONS};
use log::info;
use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 6 && args.len() != 7 {
        eprintln!(
            "Usage: {} <input.npy> <output.npy> <k> <method> <seed> [max_iters]",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let k: usize = args[3].parse()?;
    let method: InitMethod = args[4].parse()?;
    let seed: u64 = args[5].parse()?;
    let max_iters: usize = match args.get(6) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_MAX_ITERATIONS,
    };

    if method == InitMethod::Manual {
        return Err("manual initialization is not available from the command line".into());
    }

    // Read input data
    let reader = BufReader::new(File::open(input_path)?);
    let data: Array2<f64> = Array2::read_npy(reader)?;

    info!(
        "Loaded data: {} samples x {} features",
        data.nrows(),
        data.ncols()
    );
    info!(
        "Running k-means with k={}, method={}, seed={}, max_iters={}",
        k, method, seed, max_iters
    );

    let config = KMeansConfig::new(k)
        .with_init(method)
        .with_seed(seed)
        .with_max_iters(max_iters);

    let mut kmeans = KMeans::with_config(config);
    kmeans.fit(&data.view())?;

    let centroids = kmeans.centroids().ok_or("No centroids after fitting")?;
    let writer = File::create(output_path)?;
    centroids.write_npy(writer)?;

    eprintln!(
        "Saved {} centroids to {} ({:?})",
        centroids.nrows(),
        output_path,
        kmeans.last_run()
    );

    Ok(())
}
