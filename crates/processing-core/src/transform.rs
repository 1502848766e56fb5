//! Unit transformations: raw device codes to physical units.
//!
//! Pure elementwise functions plus one composite pipeline. Every
//! function checks its scalar parameters and sequence elements before
//! computing; pure functions never partially mutate caller state. The
//! composite pipeline and the axis/pressure repairs replace channels on
//! the sample they are given — that side effect is their contract.

use inkstream_common::{AxisConversion, DeviceConfig, InkResult, InkstreamError, INCH_TO_MM};
use inkstream_sample_model::{Column, MetaData, Sample};

use crate::validator;

/// Direct micrometer-like scale factor for the "mm" axis mode.
const MM_VALUE: f64 = 0.01;

/// Transform failure kinds.
///
/// `Parameter` and `Unsupported` are programmer-facing and never
/// retried; `AxisMaxExceeded` guards an invariant the caller promised.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("parameter '{name}' is not a usable number: {value}")]
    Parameter { name: &'static str, value: f64 },

    #[error("input data are not numbers: element at index {index} is not finite")]
    NonFinite { index: usize },

    #[error("input sequences have different lengths: {left} vs {right}")]
    SequenceLengths { left: usize, right: usize },

    #[error("axis conversion '{0}' is not supported anymore due to an incorrect formula")]
    Unsupported(String),

    #[error("axis max value ({max}) is lower than max value of the input array ({actual})")]
    AxisMaxExceeded { max: f64, actual: f64 },

    #[error("cannot convert angle for column '{0}'; select 'azimuth' or 'tilt'")]
    AngleColumn(String),
}

impl From<TransformError> for InkstreamError {
    fn from(err: TransformError) -> Self {
        InkstreamError::transform(err.to_string())
    }
}

fn check_elements(values: &[f64]) -> Result<(), TransformError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(TransformError::NonFinite { index }),
        None => Ok(()),
    }
}

fn check_divisor(name: &'static str, value: f64) -> Result<(), TransformError> {
    if !value.is_finite() || value == 0.0 {
        return Err(TransformError::Parameter { name, value });
    }
    Ok(())
}

fn check_scalar(name: &'static str, value: f64) -> Result<(), TransformError> {
    if !value.is_finite() {
        return Err(TransformError::Parameter { name, value });
    }
    Ok(())
}

/// Normalize a sequence against a maximum value: `x / max_value`.
pub fn normalize_time_series(values: &[f64], max_value: f64) -> Result<Vec<f64>, TransformError> {
    check_elements(values)?;
    check_divisor("max_value", max_value)?;
    Ok(values.iter().map(|x| x / max_value).collect())
}

/// Map raw pressure codes onto device pressure levels:
/// `(x / max_value) * pressure_levels`.
pub fn normalize_pressure(
    values: &[f64],
    max_value: f64,
    pressure_levels: f64,
) -> Result<Vec<f64>, TransformError> {
    check_elements(values)?;
    check_divisor("max_value", max_value)?;
    check_scalar("pressure_levels", pressure_levels)?;
    Ok(values
        .iter()
        .map(|x| (x / max_value) * pressure_levels)
        .collect())
}

/// Rebase timestamps to zero and convert milliseconds to seconds:
/// `(x - x[0]) / 1000`.
pub fn time_to_seconds(values: &[f64]) -> Result<Vec<f64>, TransformError> {
    check_elements(values)?;
    let Some(&start) = values.first() else {
        return Ok(Vec::new());
    };
    Ok(values.iter().map(|x| (x - start) / 1e3).collect())
}

/// Linear raw-code-to-degree scaling: `x * (max_degree / max_raw)`.
pub fn angle_to_degrees(
    values: &[f64],
    max_raw_value: f64,
    max_degree_value: f64,
) -> Result<Vec<f64>, TransformError> {
    check_elements(values)?;
    check_divisor("max_raw_value", max_raw_value)?;
    check_scalar("max_degree_value", max_degree_value)?;

    let degree_per_point = max_degree_value / max_raw_value;
    Ok(values.iter().map(|x| x * degree_per_point).collect())
}

/// Convert the x/y channels to millimeters.
///
/// Mode `lpi` converts via dots-per-inch (`x * 25.4 / lpi`); mode `mm`
/// applies the direct `x * 0.01` scale. Mode `lpmm` is retired — the
/// formula that once shipped for it was dimensionally incorrect, so it
/// raises instead of silently computing a wrong value. With
/// `shift_to_zero`, each channel's minimum is subtracted so the
/// bounding box starts at (0, 0).
pub fn axis_to_mm(sample: &mut Sample, config: &DeviceConfig) -> InkResult<()> {
    let scale = match config.conversion {
        AxisConversion::Lpi => {
            check_divisor("lpi_value", config.lpi_value as f64)?;
            tracing::debug!(
                lpi = config.lpi_value,
                "Converting axis to millimeters via lines-per-inch"
            );
            INCH_TO_MM / config.lpi_value as f64
        }
        AxisConversion::Lpmm => {
            return Err(TransformError::Unsupported("lpmm".to_string()).into());
        }
        AxisConversion::Mm => {
            tracing::debug!(scale = MM_VALUE, "Converting axis to millimeters directly");
            MM_VALUE
        }
    };

    for column in [Column::X, Column::Y] {
        let mut values: Vec<f64> = sample.channels().channel(column).to_vec();
        check_elements(&values)?;
        for v in &mut values {
            *v *= scale;
        }
        if config.shift_to_zero {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            if min.is_finite() {
                for v in &mut values {
                    *v -= min;
                }
            }
        }
        sample.set_channel(column, values)?;
    }
    Ok(())
}

/// Mirror a sequence around an axis maximum: `axis_max_value - x`.
///
/// Any input above the stated maximum is a programmer error and fails
/// the guard. For valid input this is an involution.
pub fn revert_axis(values: &[f64], axis_max_value: f64) -> Result<Vec<f64>, TransformError> {
    check_elements(values)?;
    check_scalar("axis_max_value", axis_max_value)?;

    let actual = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if actual > axis_max_value {
        return Err(TransformError::AxisMaxExceeded {
            max: axis_max_value,
            actual,
        });
    }
    Ok(values.iter().map(|x| axis_max_value - x).collect())
}

/// Multiply the x and y channels by a coefficient.
pub fn rescale_axis(sample: &mut Sample, rescale_coef: f64) -> InkResult<()> {
    check_scalar("rescale_coef", rescale_coef)?;
    for column in [Column::X, Column::Y] {
        let values = sample
            .channels()
            .channel(column)
            .iter()
            .map(|x| x * rescale_coef)
            .collect();
        sample.set_channel(column, values)?;
    }
    Ok(())
}

/// Repair pressure captured under the legacy narrow-range driver.
///
/// When the peak-to-peak range exceeds `max_old_range_pressure`, every
/// value is rescaled by `(x / max_pressure) * max_old_range_pressure`
/// and rounded to the nearest integer; otherwise the data passes
/// through unchanged.
pub fn control_for_pressure(values: &[f64], config: &DeviceConfig) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if values.is_empty() { 0.0 } else { max - min };
    tracing::debug!(range, "Pressure range of data");

    let max_allowed = config.max_old_range_pressure as f64;
    if range <= max_allowed {
        return values.to_vec();
    }

    tracing::info!(
        max_allowed,
        max_pressure = config.max_pressure,
        "Pressure range exceeds the legacy driver range; rescaling"
    );
    values
        .iter()
        .map(|x| ((x / config.max_pressure as f64) * max_allowed).round())
        .collect()
}

/// Derive the pen-status channel from pressure (1 where pressure > 0),
/// then rebuild and fully re-validate the sample. The input sample's
/// metadata is merged back onto the result.
pub fn correct_pen_status(sample: &Sample) -> InkResult<Sample> {
    let mut channels = sample.channels().clone();
    channels.pen_status = channels
        .pressure
        .iter()
        .map(|&p| if p > 0.0 { 1.0 } else { 0.0 })
        .collect();

    let mut corrected = validator::sample_from_channels(channels, MetaData::new())?;
    corrected.add_meta_data(&sample.meta);
    Ok(corrected)
}

/// Convert per-sample tiltX/tiltY (degrees) into azimuth and tilt
/// (degrees).
///
/// Each sample is independent; the conversion is a straight map with no
/// recurrence. Axis-aligned cases are handled exactly, the general case
/// via `atan(tan ty / tan tx)` and `atan(sin az / tan ty)`. Results are
/// returned as absolute values.
pub fn tilt_xy_to_azimuth_and_tilt(
    tilt_x: &[f64],
    tilt_y: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), TransformError> {
    if tilt_x.len() != tilt_y.len() {
        return Err(TransformError::SequenceLengths {
            left: tilt_x.len(),
            right: tilt_y.len(),
        });
    }
    check_elements(tilt_x)?;
    check_elements(tilt_y)?;

    let half_pi = std::f64::consts::FRAC_PI_2;
    let (azimuth, tilt): (Vec<f64>, Vec<f64>) = tilt_x
        .iter()
        .zip(tilt_y)
        .map(|(&tx_deg, &ty_deg)| {
            let tx = tx_deg.to_radians();
            let ty = ty_deg.to_radians();

            let (az, tl) = if tx == 0.0 && ty == 0.0 {
                (0.0, half_pi)
            } else if tx == 0.0 && ty > 0.0 {
                (half_pi, half_pi - ty)
            } else if tx == 0.0 && ty < 0.0 {
                (3.0 * half_pi, half_pi + ty)
            } else if ty == 0.0 && tx > 0.0 {
                (0.0, half_pi - tx)
            } else if ty == 0.0 && tx < 0.0 {
                (std::f64::consts::PI, half_pi + tx)
            } else {
                let az = (ty.tan() / tx.tan()).atan();
                (az, (az.sin() / ty.tan()).atan())
            };

            (az.to_degrees().abs(), tl.to_degrees().abs())
        })
        .unzip();

    Ok((azimuth, tilt))
}

/// Convert one angle channel of a sample to degrees using the device
/// ranges. Only `azimuth` and `tilt` are angle channels.
pub fn angle_column_to_degrees(
    sample: &mut Sample,
    column: Column,
    config: &DeviceConfig,
) -> InkResult<()> {
    let (max_raw, max_degree) = match column {
        Column::Azimuth => (config.max_raw_azimuth, config.max_degree_azimuth),
        Column::Tilt => (config.max_raw_tilt, config.max_degree_tilt),
        other => {
            return Err(TransformError::AngleColumn(other.as_str().to_string()).into());
        }
    };

    let degrees = angle_to_degrees(
        sample.channels().channel(column),
        max_raw as f64,
        max_degree as f64,
    )?;
    sample.set_channel(column, degrees)?;
    Ok(())
}

/// Composite pipeline converting every channel of a sample to physical
/// units, in fixed order: axis to millimeters, time to seconds,
/// optionally angles to degrees, then pressure to device levels. The
/// sample's channels are replaced in place.
pub fn transform_all_units(sample: &mut Sample, config: &DeviceConfig) -> InkResult<()> {
    axis_to_mm(sample, config)?;

    let seconds = time_to_seconds(sample.time())?;
    sample.set_channel(Column::Time, seconds)?;

    if config.angles_to_degrees {
        angle_column_to_degrees(sample, Column::Azimuth, config)?;
        angle_column_to_degrees(sample, Column::Tilt, config)?;
    }

    let pressure = normalize_pressure(
        sample.pressure(),
        config.max_pressure as f64,
        config.pressure_levels as f64,
    )?;
    sample.set_channel(Column::Pressure, pressure)?;

    tracing::debug!(samples = sample.len(), "Transformed all units");
    Ok(())
}
