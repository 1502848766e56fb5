//! The sample container and stroke types.

use serde::{Deserialize, Serialize};

use inkstream_common::{InkResult, InkstreamError};

use crate::channels::{RawFrame, SampleChannels};
use crate::column::Column;
use crate::meta::MetaData;

/// One handwriting recording: seven validated parallel channels plus
/// metadata and, when built through the validator, a retained copy of
/// the channels before any unit transformation.
///
/// A `Sample` owns its channel arrays; no sample aliases another's
/// storage. Mutating one sample from multiple threads concurrently is
/// unsupported — give each thread its own instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    channels: SampleChannels,

    /// Channels as they looked right after validation, before any unit
    /// transform touched them. Absent on derived samples (strokes,
    /// movement-filtered subsets).
    original: Option<SampleChannels>,

    /// Free-form provenance metadata.
    pub meta: MetaData,
}

impl Sample {
    /// Build a sample from channels that are already known to satisfy
    /// the invariants — a stroke or movement-filtered slice of a
    /// validated parent. Re-running validation on such a slice would be
    /// wrong: boundary trimming assumptions no longer hold locally.
    ///
    /// Only length agreement is checked here; full validation lives in
    /// the processing crate.
    pub fn from_validated_parts(channels: SampleChannels, meta: MetaData) -> InkResult<Self> {
        if !channels.lengths_agree() {
            return Err(InkstreamError::sample(
                "channel lengths disagree; one value per timestep required",
            ));
        }
        Ok(Self {
            channels,
            original: None,
            meta,
        })
    }

    /// Like [`Sample::from_validated_parts`], retaining `original` as
    /// the untransformed snapshot. Used by the validator.
    pub fn from_validated_parts_with_original(
        channels: SampleChannels,
        original: SampleChannels,
        meta: MetaData,
    ) -> InkResult<Self> {
        let mut sample = Self::from_validated_parts(channels, meta)?;
        sample.original = Some(original);
        Ok(sample)
    }

    /// Number of samples (timesteps).
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channels(&self) -> &SampleChannels {
        &self.channels
    }

    /// Untransformed channel snapshot, if retained.
    pub fn original(&self) -> Option<&SampleChannels> {
        self.original.as_ref()
    }

    pub fn x(&self) -> &[f64] {
        &self.channels.x
    }

    pub fn y(&self) -> &[f64] {
        &self.channels.y
    }

    pub fn time(&self) -> &[f64] {
        &self.channels.time
    }

    pub fn pen_status(&self) -> &[f64] {
        &self.channels.pen_status
    }

    pub fn azimuth(&self) -> &[f64] {
        &self.channels.azimuth
    }

    pub fn tilt(&self) -> &[f64] {
        &self.channels.tilt
    }

    pub fn pressure(&self) -> &[f64] {
        &self.channels.pressure
    }

    /// Replace one channel. The replacement must keep the one-value-per-
    /// timestep invariant.
    pub fn set_channel(&mut self, column: Column, values: Vec<f64>) -> InkResult<()> {
        if values.len() != self.channels.len() {
            return Err(InkstreamError::sample(format!(
                "replacement for '{}' has {} values, expected {}",
                column,
                values.len(),
                self.channels.len()
            )));
        }
        *self.channels.channel_mut(column) = values;
        Ok(())
    }

    /// Combined movement magnitude per sample: `sqrt(x^2 + y^2)`.
    pub fn xy(&self) -> Vec<f64> {
        self.channels
            .x
            .iter()
            .zip(&self.channels.y)
            .map(|(x, y)| (x * x + y * y).sqrt())
            .collect()
    }

    /// Export the working channels as an exchange frame.
    pub fn data_frame(&self) -> RawFrame {
        RawFrame::from_channels(&self.channels)
    }

    /// Export the retained original channels (falls back to the working
    /// channels when no original was retained).
    pub fn original_frame(&self) -> RawFrame {
        RawFrame::from_channels(self.original.as_ref().unwrap_or(&self.channels))
    }

    /// Merge additional metadata (additive, `updated_on` stamped).
    pub fn add_meta_data(&mut self, meta: &MetaData) {
        self.meta.merge(meta);
    }
}

/// Pen location label of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStatus {
    OnSurface,
    InAir,
}

impl StrokeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeStatus::OnSurface => "on_surface",
            StrokeStatus::InAir => "in_air",
        }
    }

    /// Label for a pen-status channel value (1 = on-surface, 0 = in-air).
    pub fn from_pen_status(value: f64) -> Self {
        if value == 1.0 {
            StrokeStatus::OnSurface
        } else {
            StrokeStatus::InAir
        }
    }
}

impl std::fmt::Display for StrokeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maximal contiguous run of samples sharing one pen status.
///
/// The sample inside is a valid, independently usable recording slice;
/// it is built without re-validation since it comes from a validated
/// parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub status: StrokeStatus,
    pub sample: Sample,
}
