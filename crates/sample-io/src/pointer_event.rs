//! Pointer-event export.
//!
//! Converts a sample into the flat shape browser pointer-event
//! pipelines consume, with x/y mapped from millimeters to display
//! pixels.

use serde::{Deserialize, Serialize};

use inkstream_common::DisplayConfig;
use inkstream_sample_model::Sample;

/// Pointer-event-shaped view of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEventData {
    /// X positions in display pixels.
    pub x: Vec<f64>,
    /// Y positions in display pixels.
    pub y: Vec<f64>,
    /// Timestamps, unchanged.
    pub time: Vec<f64>,
    /// Pen status mapped onto the `buttons` field (1 = contact).
    pub buttons: Vec<f64>,
    /// Pressure values, unchanged.
    pub pressure: Vec<f64>,
}

impl PointerEventData {
    /// Build pointer-event data from a sample whose axes are in
    /// millimeters.
    pub fn from_sample(sample: &Sample, display: &DisplayConfig) -> Self {
        let px_to_mm = display.px_to_mm();
        Self {
            x: sample.x().iter().map(|v| v / px_to_mm).collect(),
            y: sample.y().iter().map(|v| v / px_to_mm).collect(),
            time: sample.time().to_vec(),
            buttons: sample.pen_status().to_vec(),
            pressure: sample.pressure().to_vec(),
        }
    }
}
