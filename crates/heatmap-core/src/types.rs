// File: crates/heatmap-core/src/types.rs
// Summary: Shared grid data model (points, interval groups, cells, output).

/// Minutes in one calendar day; bucket widths are validated against this.
pub const MINUTES_PER_DAY: u32 = 1440;

/// One raw observation: an epoch-millis timestamp plus an optional value.
/// `None` models a gap in the source column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub time: i64,
    pub value: Option<f64>,
}

impl Point {
    pub const fn new(time: i64, value: Option<f64>) -> Self {
        Self { time, value }
    }
}

/// Points sharing one truncated interval start.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGroup {
    pub interval_start: i64,
    pub points: Vec<Point>,
}

/// One heatmap cell: the day column it belongs to, the start of its
/// sub-day bucket, and the aggregated value. The value stays optional
/// since an all-gap group reduces to a gap under most aggregations.
/// Contract: `day_millis` is the zone-local start of the calendar day
/// containing `bucket_start_millis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketPoint {
    pub day_millis: i64,
    pub bucket_start_millis: i64,
    pub value: Option<f64>,
}

/// Final output of the pipeline: sparse cells plus the row count and the
/// value domain for color mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketData {
    /// Rows per day column, `MINUTES_PER_DAY / group_by`, independent of
    /// how many rows actually carry data.
    pub num_buckets: usize,
    pub points: Vec<BucketPoint>,
    /// Domain bounds: explicit configuration when set, otherwise extrema
    /// of the aggregated cell values. `None` when no defined value exists.
    pub min: Option<f64>,
    pub max: Option<f64>,
}
