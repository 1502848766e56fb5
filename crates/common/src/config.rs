//! Device calibration and application configuration.
//!
//! The digitizer defaults correspond to the Wacom DTK-1660 used by the
//! HandAQUS acquisition setup. All values are plain data carried in an
//! immutable struct; callers override fields as needed and pass the
//! config explicitly to the transform functions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Millimeters per inch.
pub const INCH_TO_MM: f64 = 25.4;

/// Axis conversion mode for raw device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AxisConversion {
    /// Lines per inch: `x * 25.4 / lpi` (inches to millimeters).
    #[default]
    Lpi,
    /// Lines per millimeter. Retired: the formula that shipped for this
    /// mode was dimensionally incorrect, so requesting it is an error.
    Lpmm,
    /// Direct micrometer-like scale: `x * 0.01`.
    Mm,
}

impl AxisConversion {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisConversion::Lpi => "lpi",
            AxisConversion::Lpmm => "lpmm",
            AxisConversion::Mm => "mm",
        }
    }
}

/// Digitizing-tablet calibration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Axis conversion mode.
    pub conversion: AxisConversion,

    /// Tablet resolution in lines per inch.
    pub lpi_value: u32,

    /// Tablet resolution in lines per millimeter (retired mode).
    pub lpmm_value: u32,

    /// Maximum theoretical raw azimuth code.
    pub max_raw_azimuth: u32,

    /// Maximum theoretical raw tilt code.
    pub max_raw_tilt: u32,

    /// Azimuth range in degrees.
    pub max_degree_azimuth: u32,

    /// Tilt range in degrees.
    pub max_degree_tilt: u32,

    /// Maximum theoretical raw pressure code.
    pub max_pressure: u32,

    /// Number of pressure levels the device resolves.
    pub pressure_levels: u32,

    /// Pressure range produced by the legacy driver; recordings whose
    /// peak-to-peak pressure exceeds this were captured post-upgrade.
    pub max_old_range_pressure: u32,

    /// Convert azimuth/tilt raw codes to degrees during the composite
    /// transform.
    pub angles_to_degrees: bool,

    /// Shift axis values so the bounding box starts at (0, 0).
    pub shift_to_zero: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            conversion: AxisConversion::Lpi,
            lpi_value: 5080,
            lpmm_value: 200,
            max_raw_azimuth: 3600,
            max_raw_tilt: 900,
            max_degree_azimuth: 360,
            max_degree_tilt: 90,
            max_pressure: 32767,
            pressure_levels: 8192,
            max_old_range_pressure: 1024,
            angles_to_degrees: true,
            shift_to_zero: true,
        }
    }
}

/// Display geometry used when exporting samples as pointer events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Active display area in millimeters.
    pub display_mm: (f64, f64),

    /// Display resolution in pixels.
    pub display_px: (u32, u32),
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_mm: (344.2, 193.6),
            display_px: (1920, 1080),
        }
    }
}

impl DisplayConfig {
    /// Millimeters covered by one horizontal pixel.
    pub fn px_to_mm(&self) -> f64 {
        self.display_mm.0 / self.display_px.0 as f64
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "inkstream=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
