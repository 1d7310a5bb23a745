// File: crates/heatmap-core/src/bucket.rs
// Summary: The bucketing pipeline: filter, group, reduce, regroup, domain.

use crate::aggregate::reduce;
use crate::calendar::ZoneSpec;
use crate::error::Error;
use crate::frame::Frame;
use crate::group::{group_by_day, group_by_minutes};
use crate::options::{DailyInterval, FieldOptions, TimeRange};
use crate::types::{BucketData, BucketPoint, Point, MINUTES_PER_DAY};

/// Everything the host hands the pipeline besides the frame itself.
#[derive(Clone, Debug)]
pub struct BucketizeOptions {
    pub zone: ZoneSpec,
    pub time_range: TimeRange,
    pub daily_interval: DailyInterval,
    pub field: FieldOptions,
}

impl BucketizeOptions {
    pub fn new(zone: ZoneSpec, time_range: TimeRange) -> Self {
        Self {
            zone,
            time_range,
            daily_interval: DailyInterval::FULL_DAY,
            field: FieldOptions::default(),
        }
    }

    pub fn with_daily_interval(mut self, interval: DailyInterval) -> Self {
        self.daily_interval = interval;
        self
    }

    pub fn with_field(mut self, field: FieldOptions) -> Self {
        self.field = field;
        self
    }
}

/// Run the full pipeline over one frame.
///
/// Rows are filtered to whole local days of the query range and to the
/// daily hour window, grouped into `group_by`-minute buckets, reduced
/// with the configured aggregation, regrouped by calendar day, and
/// flattened into sparse cells. The returned domain reflects the
/// aggregated cell values unless explicit bounds are configured. The
/// frame and options are never mutated; identical input yields identical
/// output.
pub fn bucketize(frame: &Frame, options: &BucketizeOptions) -> Result<BucketData, Error> {
    let rows = frame.rows()?;

    let group_by = options.field.group_by;
    if group_by == 0 || group_by > MINUTES_PER_DAY {
        return Err(Error::InvalidGroupBy(group_by));
    }

    let zone = options.zone;

    // Whole-day query window: first day inclusive up to (but excluding)
    // the midnight after the last day, so 23:59:59.999 of the last day is
    // in and the next day's 00:00:00.000 is out.
    let range_start = zone.start_of_day(options.time_range.from);
    let range_end = zone.end_of_day(options.time_range.to);
    let window = options.daily_interval;

    let rows: Vec<Point> = rows
        .into_iter()
        .filter(|p| range_start <= p.time && p.time < range_end)
        .filter(|p| window.contains(zone.hour_of_day(p.time)))
        .collect();

    let grouped = group_by_minutes(&rows, group_by, zone);
    let reduced = reduce(&grouped, options.field.calculation);

    let points: Vec<BucketPoint> = group_by_day(&reduced, zone)
        .into_iter()
        .flat_map(|day| {
            let day_millis = day.interval_start;
            day.points.into_iter().map(move |p| BucketPoint {
                day_millis,
                bucket_start_millis: p.time,
                value: p.value,
            })
        })
        .collect();

    let (auto_min, auto_max) = value_extent(&points);

    Ok(BucketData {
        num_buckets: (MINUTES_PER_DAY / group_by) as usize,
        points,
        min: options.field.min.or(auto_min),
        max: options.field.max.or(auto_max),
    })
}

/// Extrema over the defined cell values; `(None, None)` when every cell is
/// a gap.
fn value_extent(points: &[BucketPoint]) -> (Option<f64>, Option<f64>) {
    let mut min = None;
    let mut max = None;
    for v in points.iter().filter_map(|p| p.value) {
        min = Some(min.map_or(v, |m: f64| m.min(v)));
        max = Some(max.map_or(v, |m: f64| m.max(v)));
    }
    (min, max)
}
