use thiserror::Error;

/// Error types for the k-means library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The dataset has no points
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Dimension mismatch between data, centroids or model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Manual initialization was requested without centroids
    #[error("Manual initialization requires caller-supplied centroids")]
    MissingCentroids,

    /// Supplied centroid set does not fit the dataset or k
    #[error("Invalid centroids: {0}")]
    InvalidCentroids(String),

    /// The iteration cap must allow at least one step
    #[error("Invalid iteration cap: {0}")]
    InvalidIterations(String),

    /// Unrecognized initialization method name
    #[error("Unknown initialization method: {0}")]
    UnknownInitMethod(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,
}

impl KMeansError {
    /// Whether the error reports a bad caller argument rather than misuse of
    /// the model lifecycle.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, KMeansError::NotFitted)
    }
}
