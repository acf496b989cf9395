use thiserror::Error;

use crate::metrics::MetricsError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a run is already being recorded")]
    AlreadyRecording,
    #[error("no run is being recorded")]
    NotRecording,
    #[error("sample at {got}ms is older than the last sample at {last}ms")]
    OutOfOrder { last: i64, got: i64 },
    #[error("invalid sample: {0}")]
    InvalidSample(String),
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
}
