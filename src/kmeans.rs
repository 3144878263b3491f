use crate::algorithm::{fit, Termination};
use crate::config::KMeansConfig;
use crate::distance::find_nearest_centroids;
use crate::error::KMeansError;
use crate::init::InitMethod;
use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// K-means model holding its configuration and, once fitted, its centroids.
///
/// Each call to [`fit`](KMeans::fit) seeds a fresh `ChaCha8Rng` from
/// `config.seed`, so fitting the same data twice gives the same result. The
/// model has no shared state; independent instances can be used from
/// different threads.
///
/// # Example
///
/// ```
/// use lloyd_kmeans::{InitMethod, KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
///
/// let config = KMeansConfig::new(2)
///     .with_init(InitMethod::FarthestFirst)
///     .with_seed(42);
/// let mut kmeans = KMeans::with_config(config);
///
/// let labels = kmeans.fit_predict(&data.view()).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features, known once fitted
    d: Option<usize>,

    /// Trained centroids (None if not yet fitted)
    centroids: Option<Array2<f64>>,

    /// How the last fit ended
    termination: Option<Termination>,
}

impl KMeans {
    /// Create a model with `k` clusters and the default configuration.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a model from a custom configuration.
    ///
    /// The configuration is validated when fitting.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            d: None,
            centroids: None,
            termination: None,
        }
    }

    /// Fit the model to the data using the configured initialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be split into `k` clusters or the
    /// configuration is invalid. Manual initialization needs
    /// [`fit_from`](KMeans::fit_from).
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self, KMeansError> {
        self.fit_inner(data, None)?;
        Ok(self)
    }

    /// Fit the model starting from caller-supplied centroids.
    ///
    /// The centroids are validated against `k` and the data dimensionality
    /// regardless of the configured strategy.
    pub fn fit_from(
        &mut self,
        data: &ArrayView2<f64>,
        centroids: &ArrayView2<f64>,
    ) -> Result<&mut Self, KMeansError> {
        self.fit_inner(data, Some(centroids))?;
        Ok(self)
    }

    /// Run a full fit and store the outcome; the model is untouched on error
    fn fit_inner(
        &mut self,
        data: &ArrayView2<f64>,
        manual: Option<&ArrayView2<f64>>,
    ) -> Result<Array1<usize>, KMeansError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let method = if manual.is_some() {
            InitMethod::Manual
        } else {
            self.config.init
        };

        let result = fit(
            data,
            self.config.k,
            method,
            manual,
            &mut rng,
            &self.config.convergence(),
        )?;

        self.d = Some(data.ncols());
        self.centroids = Some(result.centroids);
        self.termination = Some(result.termination);
        Ok(result.labels)
    }

    /// Predict cluster assignments for new data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let centroids = self.centroids.as_ref().ok_or(KMeansError::NotFitted)?;
        let d = self.d.ok_or(KMeansError::NotFitted)?;

        if data.ncols() != d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                d,
                data.ncols()
            )));
        }

        if data.nrows() == 0 {
            return Ok(Array1::zeros(0));
        }

        // New data may hold fewer points than k, so skip the dataset checks
        Ok(find_nearest_centroids(data, &centroids.view()))
    }

    /// Fit the model and return the final assignment of the training data.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.fit_inner(data, None)
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.centroids.as_ref()
    }

    /// How the last fit ended, if the model has been fitted.
    pub fn last_run(&self) -> Option<Termination> {
        self.termination
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features, once fitted.
    pub fn d(&self) -> Option<usize> {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_kmeans_new() {
        let kmeans = KMeans::new(10);
        assert_eq!(kmeans.k(), 10);
        assert_eq!(kmeans.d(), None);
        assert!(kmeans.centroids().is_none());
        assert!(kmeans.last_run().is_none());
    }

    #[test]
    fn test_kmeans_fit() {
        let data = Array2::random((500, 32), Uniform::new(-1.0, 1.0));
        let mut kmeans = KMeans::new(5);

        kmeans.fit(&data.view()).unwrap();

        let centroids = kmeans.centroids().unwrap();
        assert_eq!(centroids.dim(), (5, 32));
        assert_eq!(kmeans.d(), Some(32));
        assert!(kmeans.last_run().is_some());
    }

    #[test]
    fn test_kmeans_predict() {
        let train_data = Array2::random((500, 16), Uniform::new(-1.0, 1.0));
        let test_data = Array2::random((3, 16), Uniform::new(-1.0, 1.0));

        let mut kmeans = KMeans::new(8);
        kmeans.fit(&train_data.view()).unwrap();

        let labels = kmeans.predict(&test_data.view()).unwrap();
        assert_eq!(labels.len(), 3);
        assert!(labels.iter().all(|&l| l < 8));
    }

    #[test]
    fn test_fit_predict_matches_predict() {
        let data = Array2::random((300, 4), Uniform::new(-1.0, 1.0));
        let mut kmeans = KMeans::with_config(
            KMeansConfig::new(4).with_init(InitMethod::FarthestFirst),
        );

        let labels = kmeans.fit_predict(&data.view()).unwrap();
        assert_eq!(labels.len(), 300);

        if kmeans.last_run() == Some(Termination::Converged) {
            assert_eq!(kmeans.predict(&data.view()).unwrap(), labels);
        }
    }

    #[test]
    fn test_same_seed_same_centroids() {
        let data = Array2::random((200, 3), Uniform::new(-1.0, 1.0));
        let config = KMeansConfig::new(4)
            .with_init(InitMethod::KMeansPlusPlus)
            .with_seed(17);

        let mut a = KMeans::with_config(config.clone());
        let mut b = KMeans::with_config(config);
        a.fit(&data.view()).unwrap();
        b.fit(&data.view()).unwrap();

        assert_eq!(a.centroids(), b.centroids());
    }

    #[test]
    fn test_fit_from_manual_centroids() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let start = array![[0.0, 0.0], [10.0, 0.0]];

        let mut kmeans = KMeans::new(2);
        kmeans.fit_from(&data.view(), &start.view()).unwrap();

        assert_eq!(kmeans.centroids().unwrap(), &array![[0.0, 0.5], [10.0, 0.5]]);
        assert_eq!(kmeans.last_run(), Some(Termination::Converged));
    }

    #[test]
    fn test_manual_without_centroids() {
        let data = array![[0.0, 0.0], [1.0, 1.0]];
        let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_init(InitMethod::Manual));

        let result = kmeans.fit(&data.view());
        assert!(matches!(result, Err(KMeansError::MissingCentroids)));
        assert!(kmeans.centroids().is_none());
    }

    #[test]
    fn test_kmeans_predict_before_fit() {
        let data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let kmeans = KMeans::new(5);

        let result = kmeans.predict(&data.view());
        assert!(matches!(result, Err(KMeansError::NotFitted)));
    }

    #[test]
    fn test_kmeans_dimension_mismatch() {
        let train_data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
        let test_data = Array2::random((50, 16), Uniform::new(-1.0, 1.0));

        let mut kmeans = KMeans::new(5);
        kmeans.fit(&train_data.view()).unwrap();

        let result = kmeans.predict(&test_data.view());
        assert!(matches!(result, Err(KMeansError::InvalidDimensions(_))));
    }

    #[test]
    fn test_kmeans_predict_empty_input() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let mut kmeans = KMeans::new(2);
        kmeans.fit(&data.view()).unwrap();

        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(kmeans.predict(&empty.view()).unwrap().len(), 0);

        let empty_wrong_dim = Array2::<f64>::zeros((0, 99));
        assert_eq!(
            kmeans.predict(&empty_wrong_dim.view()),
            Err(KMeansError::InvalidDimensions(
                "Expected 2 features, got 99".to_string()
            ))
        );
    }

    #[test]
    fn test_kmeans_k_zero() {
        let data = array![[0.0, 0.0]];
        let mut kmeans = KMeans::new(0);

        assert!(matches!(
            kmeans.fit(&data.view()),
            Err(KMeansError::InvalidK(_))
        ));
    }
}
