use crate::stats::TimeBinConfig;

/// Errors raised while building, merging or decoding demand statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// Two stores with different time-bin configuration cannot be merged.
    #[error("time bin configuration mismatch: {left} vs {right}")]
    ConfigMismatch {
        left: TimeBinConfig,
        right: TimeBinConfig,
    },
    #[error("region {region} has {actual} time bins, expected {expected}")]
    SlotCountMismatch {
        region: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid time bin configuration: {0}")]
    InvalidTimeBinConfig(String),
    #[cfg(feature = "persist")]
    #[error("demand statistics codec error: {0}")]
    Codec(String),
}
