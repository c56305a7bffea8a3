use thiserror::Error;
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("malformed telemetry frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read telemetry stream: {0}")]
    Io(#[from] std::io::Error),
}
/// Reasons an accelerometer update produced no output.
///
/// None of these are fatal; the gauge simply keeps its previous value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    #[error("processor is inert (index was out of range at construction)")]
    Inert,
    #[error("no accelerometer group at index {index}")]
    UnavailableSource { index: usize },
    #[error("accelerometer group {index} has {count} datasets, expected 3")]
    MalformedGroup { index: usize, count: usize },
}
