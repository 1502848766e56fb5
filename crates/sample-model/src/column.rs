//! Canonical channel names and ordering.

use serde::{Deserialize, Serialize};

/// One of the seven channels every recording carries.
///
/// The declaration order is the canonical column order; downstream
/// positional logic (file formats, frame reordering) relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    X,
    Y,
    Time,
    PenStatus,
    Azimuth,
    Tilt,
    Pressure,
}

/// Canonical column order: `[x, y, time, pen_status, azimuth, tilt, pressure]`.
pub const CANONICAL_COLUMNS: [Column; 7] = [
    Column::X,
    Column::Y,
    Column::Time,
    Column::PenStatus,
    Column::Azimuth,
    Column::Tilt,
    Column::Pressure,
];

impl Column {
    /// Lowercase column name as used in files and exchange frames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::X => "x",
            Column::Y => "y",
            Column::Time => "time",
            Column::PenStatus => "pen_status",
            Column::Azimuth => "azimuth",
            Column::Tilt => "tilt",
            Column::Pressure => "pressure",
        }
    }

    /// Parse a column name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(Column::X),
            "y" => Some(Column::Y),
            "time" => Some(Column::Time),
            "pen_status" => Some(Column::PenStatus),
            "azimuth" => Some(Column::Azimuth),
            "tilt" => Some(Column::Tilt),
            "pressure" => Some(Column::Pressure),
            _ => None,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
