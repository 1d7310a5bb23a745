// File: crates/heatmap-core/src/frame.rs
// Summary: Minimal tabular frame model: named time/number columns with kind lookup.

use crate::error::Error;
use crate::types::Point;

/// Column kinds the bucketizer can consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Time,
    Number,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Time => f.write_str("time"),
            FieldKind::Number => f.write_str("number"),
        }
    }
}

/// Column values, one variant per kind. Number columns may contain gaps.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValues {
    Time(Vec<i64>),
    Number(Vec<Option<f64>>),
}

/// One named column of a query result.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub values: FieldValues,
}

impl Field {
    pub fn time(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self { name: name.into(), values: FieldValues::Time(values) }
    }

    pub fn number(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), values: FieldValues::Number(values) }
    }

    pub fn kind(&self) -> FieldKind {
        match self.values {
            FieldValues::Time(_) => FieldKind::Time,
            FieldValues::Number(_) => FieldKind::Number,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            FieldValues::Time(v) => v.len(),
            FieldValues::Number(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A query result: an ordered list of columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub fields: Vec<Field>,
}

impl Frame {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// First column of `kind`. Hosts that return several numeric columns
    /// get the same first-match behavior the panel always had.
    pub fn first_of(&self, kind: FieldKind) -> Option<&Field> {
        self.fields.iter().find(|f| f.kind() == kind)
    }

    pub fn time_values(&self) -> Result<&[i64], Error> {
        match self.first_of(FieldKind::Time) {
            Some(Field { values: FieldValues::Time(v), .. }) => Ok(v.as_slice()),
            _ => Err(Error::MissingField(FieldKind::Time)),
        }
    }

    pub fn number_values(&self) -> Result<&[Option<f64>], Error> {
        match self.first_of(FieldKind::Number) {
            Some(Field { values: FieldValues::Number(v), .. }) => Ok(v.as_slice()),
            _ => Err(Error::MissingField(FieldKind::Number)),
        }
    }

    /// Zip the time and number columns index-wise into rows. A shorter
    /// value column leaves the trailing rows as gaps.
    pub fn rows(&self) -> Result<Vec<Point>, Error> {
        let times = self.time_values()?;
        let values = self.number_values()?;
        Ok(times
            .iter()
            .enumerate()
            .map(|(i, &t)| Point::new(t, values.get(i).copied().flatten()))
            .collect())
    }
}
