// File: crates/heatmap-core/tests/bucketize.rs
// Purpose: Validate the full pipeline: filters, domain inference, errors, determinism.

use heatmap_core::{
    bucketize, BucketPoint, BucketizeOptions, DailyInterval, Error, Field, FieldKind,
    FieldOptions, Frame, Aggregation, TimeRange, ZoneSpec,
};

const MIN_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

// 2020-05-05T00:00:00Z
const MAY5: i64 = 1_588_636_800_000;

fn frame(rows: &[(i64, f64)]) -> Frame {
    Frame::new(vec![
        Field::time("time", rows.iter().map(|r| r.0).collect()),
        Field::number("value", rows.iter().map(|r| Some(r.1)).collect()),
    ])
}

fn opts(field: FieldOptions) -> BucketizeOptions {
    BucketizeOptions::new(ZoneSpec::Utc, TimeRange::new(MAY5, MAY5 + DAY_MS)).with_field(field)
}

fn sum_hourly() -> FieldOptions {
    FieldOptions {
        calculation: Aggregation::Sum,
        group_by: 60,
        min: None,
        max: None,
    }
}

#[test]
fn single_row() {
    let frame = frame(&[(MAY5 + 13 * HOUR_MS + 20 * MIN_MS, 1.0)]);
    let field = FieldOptions { min: Some(0.0), max: Some(1.0), ..sum_hourly() };

    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.num_buckets, 24);
    assert_eq!(data.min, Some(0.0));
    assert_eq!(data.max, Some(1.0));
    assert_eq!(
        data.points,
        vec![BucketPoint {
            day_millis: MAY5,
            bucket_start_millis: MAY5 + 13 * HOUR_MS,
            value: Some(1.0),
        }]
    );
}

#[test]
fn sum_bucket_data() {
    let frame = frame(&[
        // First hour
        (MAY5 + 13 * HOUR_MS + 20 * MIN_MS, 5.0),
        (MAY5 + 13 * HOUR_MS + 30 * MIN_MS, 5.0),
        (MAY5 + 13 * HOUR_MS + 40 * MIN_MS, 5.0),
        // Second hour
        (MAY5 + 14 * HOUR_MS + 20 * MIN_MS, 7.0),
        (MAY5 + 14 * HOUR_MS + 30 * MIN_MS, 3.0),
        (MAY5 + 14 * HOUR_MS + 40 * MIN_MS, 10.0),
        // Third hour
        (MAY5 + 15 * HOUR_MS + 20 * MIN_MS, 0.0),
        (MAY5 + 15 * HOUR_MS + 30 * MIN_MS, 0.0),
        (MAY5 + 15 * HOUR_MS + 40 * MIN_MS, 0.0),
    ]);
    let field = FieldOptions { min: Some(0.0), max: Some(10.0), ..sum_hourly() };

    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.num_buckets, 24);
    assert_eq!(data.min, Some(0.0));
    assert_eq!(data.max, Some(10.0));
    assert_eq!(
        data.points,
        vec![
            BucketPoint {
                day_millis: MAY5,
                bucket_start_millis: MAY5 + 13 * HOUR_MS,
                value: Some(15.0),
            },
            BucketPoint {
                day_millis: MAY5,
                bucket_start_millis: MAY5 + 14 * HOUR_MS,
                value: Some(20.0),
            },
            BucketPoint {
                day_millis: MAY5,
                bucket_start_millis: MAY5 + 15 * HOUR_MS,
                value: Some(0.0),
            },
        ]
    );
}

#[test]
fn mean_bucket_data() {
    let frame = frame(&[
        (MAY5 + 13 * HOUR_MS + 20 * MIN_MS, 5.0),
        (MAY5 + 13 * HOUR_MS + 30 * MIN_MS, 5.0),
        (MAY5 + 13 * HOUR_MS + 40 * MIN_MS, 5.0),
        (MAY5 + 14 * HOUR_MS + 20 * MIN_MS, 7.0),
        (MAY5 + 14 * HOUR_MS + 30 * MIN_MS, 3.0),
        (MAY5 + 14 * HOUR_MS + 40 * MIN_MS, 10.0),
    ]);
    let field = FieldOptions { calculation: Aggregation::Mean, ..sum_hourly() };

    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.points[0].value, Some(5.0));
    assert_eq!(data.points[1].value, Some(6.666666666666667));
}

#[test]
fn num_buckets_formula() {
    let empty = Frame::new(vec![
        Field::time("time", Vec::new()),
        Field::number("value", Vec::new()),
    ]);
    for (width, want) in [(15, 96), (30, 48), (60, 24), (1440, 1)] {
        let field = FieldOptions { group_by: width, ..sum_hourly() };
        let data = bucketize(&empty, &opts(field)).expect("bucketize");
        assert_eq!(data.num_buckets, want, "width {width}");
        assert!(data.points.is_empty());
        assert_eq!(data.min, None);
        assert_eq!(data.max, None);
    }
}

#[test]
fn invalid_widths_are_rejected() {
    let frame = frame(&[(MAY5, 1.0)]);
    for width in [0, 2000] {
        let field = FieldOptions { group_by: width, ..sum_hourly() };
        let err = bucketize(&frame, &opts(field)).unwrap_err();
        assert_eq!(err, Error::InvalidGroupBy(width));
        assert!(err.is_configuration());
    }
}

#[test]
fn daily_interval_sentinel() {
    let frame = frame(&[(MAY5 + 23 * HOUR_MS + 30 * MIN_MS, 1.0)]);

    // `to == "0"` means hour 24: the 23:30 point is kept.
    let full = opts(sum_hourly())
        .with_daily_interval(DailyInterval::parse("0", "0").expect("interval"));
    assert_eq!(bucketize(&frame, &full).expect("bucketize").points.len(), 1);

    // An explicit 23 cuts the last hour off.
    let cut = opts(sum_hourly())
        .with_daily_interval(DailyInterval::parse("0", "23").expect("interval"));
    assert!(bucketize(&frame, &cut).expect("bucketize").points.is_empty());
}

#[test]
fn daily_interval_lower_bound_is_inclusive() {
    let frame = frame(&[
        (MAY5 + 5 * HOUR_MS + 30 * MIN_MS, 1.0),
        (MAY5 + 6 * HOUR_MS, 2.0),
    ]);
    let options = opts(sum_hourly())
        .with_daily_interval(DailyInterval::parse("6", "18").expect("interval"));
    let data = bucketize(&frame, &options).expect("bucketize");
    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].bucket_start_millis, MAY5 + 6 * HOUR_MS);
}

#[test]
fn auto_domain_uses_aggregated_values() {
    // Raw values span [0, 10]; the hourly sums span [0, 20].
    let frame = frame(&[
        (MAY5 + 13 * HOUR_MS + 10 * MIN_MS, 10.0),
        (MAY5 + 13 * HOUR_MS + 20 * MIN_MS, 10.0),
        (MAY5 + 14 * HOUR_MS + 10 * MIN_MS, 0.0),
    ]);
    let data = bucketize(&frame, &opts(sum_hourly())).expect("bucketize");
    assert_eq!(data.min, Some(0.0));
    assert_eq!(data.max, Some(20.0));
}

#[test]
fn explicit_bounds_win_per_side() {
    let frame = frame(&[(MAY5 + HOUR_MS, 7.0)]);
    let field = FieldOptions { min: Some(-5.0), ..sum_hourly() };
    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.min, Some(-5.0));
    assert_eq!(data.max, Some(7.0));
}

#[test]
fn time_range_covers_whole_days() {
    // Range endpoints are mid-day instants; the filter widens them to
    // whole days.
    let frame = frame(&[
        (MAY5 - 1, 1.0),                 // previous day: out
        (MAY5 + DAY_MS - 1, 2.0),        // 23:59:59.999 of the last day: in
        (MAY5 + DAY_MS, 3.0),            // next midnight: out
    ]);
    let options = BucketizeOptions::new(
        ZoneSpec::Utc,
        TimeRange::new(MAY5 + 10 * HOUR_MS, MAY5 + 10 * HOUR_MS),
    )
    .with_field(sum_hourly());

    let data = bucketize(&frame, &options).expect("bucketize");
    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].value, Some(2.0));
    assert_eq!(data.points[0].day_millis, MAY5);
}

#[test]
fn missing_fields_are_distinct_errors() {
    let no_number = Frame::new(vec![Field::time("time", vec![MAY5])]);
    let err = bucketize(&no_number, &opts(sum_hourly())).unwrap_err();
    assert_eq!(err, Error::MissingField(FieldKind::Number));
    assert!(!err.is_configuration());

    let no_time = Frame::new(vec![Field::number("value", vec![Some(1.0)])]);
    let err = bucketize(&no_time, &opts(sum_hourly())).unwrap_err();
    assert_eq!(err, Error::MissingField(FieldKind::Time));
}

#[test]
fn short_value_column_leaves_gaps() {
    let frame = Frame::new(vec![
        Field::time("time", vec![MAY5 + 13 * HOUR_MS + 20 * MIN_MS, MAY5 + 13 * HOUR_MS + 40 * MIN_MS]),
        Field::number("value", vec![Some(5.0)]),
    ]);

    // `last` lands on the gap row positionally.
    let field = FieldOptions { calculation: Aggregation::Last, ..sum_hourly() };
    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].value, None);
    assert_eq!(data.min, None);
    assert_eq!(data.max, None);

    // `mean` skips it.
    let field = FieldOptions { calculation: Aggregation::Mean, ..sum_hourly() };
    let data = bucketize(&frame, &opts(field)).expect("bucketize");
    assert_eq!(data.points[0].value, Some(5.0));
}

#[test]
fn bucketing_in_a_named_zone() {
    // 01:30 EST on the New York spring-forward day.
    let t = 1_583_647_200_000; // 2020-03-08T06:00Z
    let frame = frame(&[(t + 30 * MIN_MS, 4.0)]);
    let new_york: ZoneSpec = "America/New_York".parse().expect("zone");
    let options = BucketizeOptions::new(new_york, TimeRange::new(t, t)).with_field(sum_hourly());

    let data = bucketize(&frame, &options).expect("bucketize");
    assert_eq!(data.points.len(), 1);
    // Bucket starts at 01:00 local; the day at local midnight.
    assert_eq!(data.points[0].bucket_start_millis, t);
    assert_eq!(data.points[0].day_millis, 1_583_643_600_000);
}

#[test]
fn identical_input_yields_identical_output() {
    let frame = frame(&[
        (MAY5 + 3 * HOUR_MS + 7 * MIN_MS, 1.5),
        (MAY5 + 3 * HOUR_MS + 52 * MIN_MS, 2.5),
        (MAY5 + 17 * HOUR_MS + 11 * MIN_MS, -4.0),
    ]);
    let options = opts(FieldOptions { group_by: 30, ..sum_hourly() });

    let first = bucketize(&frame, &options).expect("bucketize");
    let second = bucketize(&frame, &options).expect("bucketize");
    assert_eq!(first, second);
}

#[test]
fn options_deserialize_from_the_panel_model() {
    use heatmap_core::PanelOptions;

    let field: FieldOptions =
        serde_json::from_str(r#"{"calculation":"avg","groupBy":30,"min":0.0}"#).expect("field");
    assert_eq!(field.calculation, Aggregation::Mean);
    assert_eq!(field.group_by, 30);
    assert_eq!(field.min, Some(0.0));
    assert_eq!(field.max, None);

    let panel: PanelOptions =
        serde_json::from_str(r#"{"from":"6","to":"18","showLegend":false}"#).expect("panel");
    assert!(!panel.show_legend);
    let interval = panel.daily_interval().expect("interval");
    assert_eq!((interval.from, interval.to), (6, 18));
    assert!(interval.contains(6));
    assert!(!interval.contains(18));

    let err = DailyInterval::parse("25", "0").unwrap_err();
    assert_eq!(err, Error::InvalidDailyInterval("25".to_string()));
}
