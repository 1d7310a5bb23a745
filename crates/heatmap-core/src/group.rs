// File: crates/heatmap-core/src/group.rs
// Summary: Partition points into interval groups keyed by truncated time.

use std::collections::BTreeMap;

use crate::calendar::ZoneSpec;
use crate::types::{Point, PointGroup};

/// Group points into `width_minutes` buckets keyed by the zone-local
/// truncated start. Every point lands in exactly one group. Groups come
/// out sorted by key; re-running on the same input yields the same output.
///
/// Widths that do not divide 60 still truncate by `minute % width`, so
/// intervals may straddle clock-hour boundaries. Accepted, not an error.
pub fn group_by_minutes(points: &[Point], width_minutes: u32, zone: ZoneSpec) -> Vec<PointGroup> {
    collect_groups(points, |p| zone.truncate_to_minutes(p.time, width_minutes))
}

/// Group points by zone-local calendar day. Day keys are local midnights,
/// so DST-shortened and -lengthened days each still form one group.
pub fn group_by_day(points: &[Point], zone: ZoneSpec) -> Vec<PointGroup> {
    collect_groups(points, |p| zone.start_of_day(p.time))
}

fn collect_groups(points: &[Point], key: impl Fn(&Point) -> i64) -> Vec<PointGroup> {
    let mut buckets: BTreeMap<i64, Vec<Point>> = BTreeMap::new();
    for point in points {
        buckets.entry(key(point)).or_default().push(*point);
    }
    buckets
        .into_iter()
        .map(|(interval_start, points)| PointGroup { interval_start, points })
        .collect()
}
