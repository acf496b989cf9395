use thiserror::Error;

use crate::metrics::MetricsError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("sample {0}: {1}")]
    Sample(usize, String),
    #[error("{0}")]
    Validation(String),
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
}
