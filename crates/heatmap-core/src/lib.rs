// File: crates/heatmap-core/src/lib.rs
// Summary: Core library entry point; exports the bucketing pipeline API.

pub mod aggregate;
pub mod bucket;
pub mod calendar;
pub mod error;
pub mod frame;
pub mod group;
pub mod options;
pub mod types;

pub use aggregate::{reduce, Aggregation};
pub use bucket::{bucketize, BucketizeOptions};
pub use calendar::ZoneSpec;
pub use error::Error;
pub use frame::{Field, FieldKind, FieldValues, Frame};
pub use group::{group_by_day, group_by_minutes};
pub use options::{DailyInterval, FieldOptions, PanelOptions, TimeRange};
pub use types::{BucketData, BucketPoint, Point, PointGroup, MINUTES_PER_DAY};
