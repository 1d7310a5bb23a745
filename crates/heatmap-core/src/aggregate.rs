// File: crates/heatmap-core/src/aggregate.rs
// Summary: Aggregation kinds and per-group reduction.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Point, PointGroup};

/// How the values inside one bucket collapse into a single cell value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Arithmetic mean of the defined values. The panel UI sends `avg`.
    #[serde(alias = "avg")]
    Mean,
    Sum,
    Count,
    Min,
    Max,
    First,
    Last,
}

impl Aggregation {
    /// Collapse one bucket's values. Gap entries are skipped by the numeric
    /// kinds, counted by `Count`, and passed through positionally by
    /// `First`/`Last`. An empty or all-gap bucket yields `None` except for
    /// `Sum` and `Count`, which yield zero.
    pub fn apply(self, values: &[Option<f64>]) -> Option<f64> {
        let defined = || values.iter().copied().flatten();
        match self {
            Aggregation::Mean => {
                let (sum, n) = defined().fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
                (n > 0).then(|| sum / f64::from(n))
            }
            Aggregation::Sum => Some(defined().sum()),
            Aggregation::Count => Some(values.len() as f64),
            Aggregation::Min => defined().reduce(f64::min),
            Aggregation::Max => defined().reduce(f64::max),
            Aggregation::First => values.first().copied().flatten(),
            Aggregation::Last => values.last().copied().flatten(),
        }
    }

    /// Name as the panel UI spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregation::Mean => "mean",
            Aggregation::Sum => "sum",
            Aggregation::Count => "count",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::First => "first",
            Aggregation::Last => "last",
        }
    }
}

impl std::str::FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "mean" | "avg" => Ok(Aggregation::Mean),
            "sum" => Ok(Aggregation::Sum),
            "count" => Ok(Aggregation::Count),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "first" => Ok(Aggregation::First),
            "last" => Ok(Aggregation::Last),
            _ => Err(Error::UnknownAggregation(s.to_string())),
        }
    }
}

/// Reduce every group to a single point, keeping the group key as the
/// point's time.
pub fn reduce(groups: &[PointGroup], aggregation: Aggregation) -> Vec<Point> {
    groups
        .iter()
        .map(|group| {
            let values: Vec<Option<f64>> = group.points.iter().map(|p| p.value).collect();
            Point::new(group.interval_start, aggregation.apply(&values))
        })
        .collect()
}
