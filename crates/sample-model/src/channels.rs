//! Typed channel storage and the untyped exchange frame.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::{Column, CANONICAL_COLUMNS};

/// The seven parallel channels of one recording.
///
/// Invariant once validated: all vectors have identical length N >= 1,
/// `pen_status` holds only 0.0/1.0, and the six numeric channels are
/// finite and non-negative. Construction through the validator enforces
/// this; slices of a validated parent inherit it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleChannels {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub time: Vec<f64>,
    pub pen_status: Vec<f64>,
    pub azimuth: Vec<f64>,
    pub tilt: Vec<f64>,
    pub pressure: Vec<f64>,
}

impl SampleChannels {
    /// Number of samples (length of the `x` channel).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Whether all seven channels have the same length.
    pub fn lengths_agree(&self) -> bool {
        let n = self.x.len();
        self.y.len() == n
            && self.time.len() == n
            && self.pen_status.len() == n
            && self.azimuth.len() == n
            && self.tilt.len() == n
            && self.pressure.len() == n
    }

    /// Borrow one channel by column.
    pub fn channel(&self, column: Column) -> &[f64] {
        match column {
            Column::X => &self.x,
            Column::Y => &self.y,
            Column::Time => &self.time,
            Column::PenStatus => &self.pen_status,
            Column::Azimuth => &self.azimuth,
            Column::Tilt => &self.tilt,
            Column::Pressure => &self.pressure,
        }
    }

    /// Mutably borrow one channel by column.
    pub fn channel_mut(&mut self, column: Column) -> &mut Vec<f64> {
        match column {
            Column::X => &mut self.x,
            Column::Y => &mut self.y,
            Column::Time => &mut self.time,
            Column::PenStatus => &mut self.pen_status,
            Column::Azimuth => &mut self.azimuth,
            Column::Tilt => &mut self.tilt,
            Column::Pressure => &mut self.pressure,
        }
    }

    /// Copy out a contiguous row range as new channels.
    pub fn slice(&self, range: Range<usize>) -> SampleChannels {
        SampleChannels {
            x: self.x[range.clone()].to_vec(),
            y: self.y[range.clone()].to_vec(),
            time: self.time[range.clone()].to_vec(),
            pen_status: self.pen_status[range.clone()].to_vec(),
            azimuth: self.azimuth[range.clone()].to_vec(),
            tilt: self.tilt[range.clone()].to_vec(),
            pressure: self.pressure[range].to_vec(),
        }
    }
}

/// Untyped dict-of-sequences exchange frame.
///
/// This is the sole data-exchange contract between I/O adapters and the
/// validator: column names map to sequences of raw JSON values, so
/// nulls, strings, and mixed types survive until validation can report
/// them precisely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFrame {
    columns: BTreeMap<String, Vec<Value>>,
}

impl RawFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one named column.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.insert(name.into(), values);
    }

    /// Build a frame from already-typed channels.
    pub fn from_channels(channels: &SampleChannels) -> Self {
        let mut frame = RawFrame::new();
        for column in CANONICAL_COLUMNS {
            let values = channels
                .channel(column)
                .iter()
                .map(|v| {
                    serde_json::Number::from_f64(*v)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                })
                .collect();
            frame.insert_column(column.as_str(), values);
        }
        frame
    }

    /// Column names as provided by the adapter.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Lowercase all column names, merging case-variant duplicates
    /// (last one wins, matching map insertion).
    pub fn normalized_names(&self) -> RawFrame {
        let mut frame = RawFrame::new();
        for (name, values) in &self.columns {
            frame.insert_column(name.to_ascii_lowercase(), values.clone());
        }
        frame
    }
}
