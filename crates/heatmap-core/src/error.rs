// File: crates/heatmap-core/src/error.rs
// Summary: Error taxonomy: configuration failures vs. missing query dimensions.

use crate::frame::FieldKind;

/// Failures surfaced by the bucketing pipeline.
///
/// Configuration variants are fatal to the current render and need a
/// config fix; `MissingField` is recoverable at the UI layer by pointing
/// the query at different fields. Sparse buckets and degenerate domains
/// are not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown aggregation function: {0:?}")]
    UnknownAggregation(String),

    #[error("bucket width must be between 1 and 1440 minutes, got {0}")]
    InvalidGroupBy(u32),

    #[error("unknown time zone: {0:?}")]
    UnknownTimeZone(String),

    #[error("daily interval hour out of range: {0:?}")]
    InvalidDailyInterval(String),

    #[error("missing required {0} field")]
    MissingField(FieldKind),
}

impl Error {
    /// True when the user fixes this by editing panel configuration rather
    /// than by picking different query fields.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::MissingField(_))
    }
}
