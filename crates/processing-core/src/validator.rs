//! Schema and domain validation of raw recording frames.
//!
//! Checks run in a fixed order so that a single malformed input always
//! reports the same, first-violated error: column set, nulls, element
//! types, reorder, pen-status domain, negative values, boundary trim.

use serde_json::Value;

use inkstream_common::{InkResult, InkstreamError};
use inkstream_sample_model::{
    Column, MetaData, RawFrame, Sample, SampleChannels, CANONICAL_COLUMNS,
};

/// Validation failure kinds.
///
/// Schema violations (`MissingColumns`, `UnexpectedColumns`,
/// `NullValues`, `NonNumeric`, `LengthMismatch`) are unrecoverable for
/// the given input. `PenStatus` and `NegativeValues` are distinct
/// domain kinds so callers can choose repair (e.g.
/// [`crate::transform::correct_pen_status`], or pre-filtering) over
/// rejection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("input data are missing mandatory time-series (columns): {0:?}")]
    MissingColumns(Vec<String>),

    #[error("input data have unexpected time-series (columns): {0:?}")]
    UnexpectedColumns(Vec<String>),

    #[error("empty values in input data; null counts per column: {0:?}")]
    NullValues(Vec<(String, usize)>),

    #[error("datatype in time-series '{0}' is not numerical")]
    NonNumeric(String),

    #[error("time-series '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        actual: usize,
        expected: usize,
    },

    #[error("pen status column got an unexpected value on input: {value} at index {index}")]
    PenStatus { value: f64, index: usize },

    #[error("negative values in time-series: {0:?}")]
    NegativeValues(Vec<String>),

    #[error("recording holds no on-surface samples; nothing remains after boundary trimming")]
    AllInAir,
}

impl From<ValidationError> for InkstreamError {
    fn from(err: ValidationError) -> Self {
        InkstreamError::validation(err.to_string())
    }
}

/// Validate an untyped exchange frame into typed channels.
///
/// Column names are case-normalized and reordered to canonical order,
/// so callers may supply columns in any order and casing. The returned
/// channels satisfy every container invariant: equal lengths, binary
/// pen status, non-negative finite values, and no leading or trailing
/// in-air run.
pub fn validate_frame(frame: &RawFrame) -> Result<SampleChannels, ValidationError> {
    let frame = frame.normalized_names();

    check_column_set(&frame)?;
    check_nulls(&frame)?;
    let channels = to_channels(&frame)?;
    validate_channels(channels)
}

/// Validate already-typed channels (length agreement, pen-status
/// domain, negatives, boundary trim).
///
/// Idempotent: validating the output again drops no further rows.
pub fn validate_channels(channels: SampleChannels) -> Result<SampleChannels, ValidationError> {
    check_lengths(&channels)?;
    check_pen_status(&channels)?;
    check_negatives(&channels)?;
    trim_boundary_in_air(channels)
}

/// Validate a frame and build a [`Sample`], retaining the validated
/// channels as the untransformed original snapshot.
pub fn sample_from_frame(frame: &RawFrame, meta: MetaData) -> InkResult<Sample> {
    let channels = validate_frame(frame)?;
    let original = channels.clone();
    Sample::from_validated_parts_with_original(channels, original, meta)
}

/// Validate typed channels and build a [`Sample`].
pub fn sample_from_channels(channels: SampleChannels, meta: MetaData) -> InkResult<Sample> {
    let channels = validate_channels(channels)?;
    let original = channels.clone();
    Sample::from_validated_parts_with_original(channels, original, meta)
}

fn check_column_set(frame: &RawFrame) -> Result<(), ValidationError> {
    let missing: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|c| frame.column(c.as_str()).is_none())
        .map(|c| c.as_str().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns(missing));
    }

    let unexpected: Vec<String> = frame
        .column_names()
        .filter(|name| Column::from_name(name).is_none())
        .map(str::to_string)
        .collect();
    if !unexpected.is_empty() {
        return Err(ValidationError::UnexpectedColumns(unexpected));
    }

    Ok(())
}

fn check_nulls(frame: &RawFrame) -> Result<(), ValidationError> {
    let mut counts = Vec::new();
    for column in CANONICAL_COLUMNS {
        let values = frame.column(column.as_str()).unwrap_or_default();
        let nulls = values.iter().filter(|v| v.is_null()).count();
        if nulls > 0 {
            counts.push((column.as_str().to_string(), nulls));
        }
    }
    if counts.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::NullValues(counts))
    }
}

/// Convert raw columns to `f64` channels in canonical order. The first
/// column holding a non-numeric element (bool, string, nested value)
/// is reported.
fn to_channels(frame: &RawFrame) -> Result<SampleChannels, ValidationError> {
    let mut channels = SampleChannels::default();
    for column in CANONICAL_COLUMNS {
        let values = frame.column(column.as_str()).unwrap_or_default();
        let mut out = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Value::Number(n) => match n.as_f64() {
                    Some(v) if v.is_finite() => out.push(v),
                    _ => return Err(ValidationError::NonNumeric(column.as_str().to_string())),
                },
                _ => return Err(ValidationError::NonNumeric(column.as_str().to_string())),
            }
        }
        *channels.channel_mut(column) = out;
    }
    Ok(channels)
}

fn check_lengths(channels: &SampleChannels) -> Result<(), ValidationError> {
    let expected = channels.len();
    for column in CANONICAL_COLUMNS {
        let actual = channels.channel(column).len();
        if actual != expected {
            return Err(ValidationError::LengthMismatch {
                column: column.as_str().to_string(),
                actual,
                expected,
            });
        }
    }
    // NaN can sneak into typed channels without passing JSON parsing.
    for column in CANONICAL_COLUMNS {
        if channels.channel(column).iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonNumeric(column.as_str().to_string()));
        }
    }
    Ok(())
}

fn check_pen_status(channels: &SampleChannels) -> Result<(), ValidationError> {
    for (index, &value) in channels.pen_status.iter().enumerate() {
        if value != 0.0 && value != 1.0 {
            return Err(ValidationError::PenStatus { value, index });
        }
    }
    Ok(())
}

fn check_negatives(channels: &SampleChannels) -> Result<(), ValidationError> {
    let offending: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|c| **c != Column::PenStatus)
        .filter(|c| channels.channel(**c).iter().any(|v| *v < 0.0))
        .map(|c| c.as_str().to_string())
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::NegativeValues(offending))
    }
}

/// Drop leading and trailing in-air runs in one keep-range slice.
///
/// A recording with no on-surface sample at all would degenerate to an
/// empty one, which violates the container invariant; that case is a
/// dedicated domain error instead.
fn trim_boundary_in_air(channels: SampleChannels) -> Result<SampleChannels, ValidationError> {
    let status = &channels.pen_status;
    let first = status.iter().position(|&v| v == 1.0);
    let last = status.iter().rposition(|&v| v == 1.0);

    match (first, last) {
        (Some(first), Some(last)) => {
            let dropped = channels.len() - (last + 1 - first);
            if dropped == 0 {
                // Nothing to trim; benign no-op.
                return Ok(channels);
            }
            tracing::debug!(
                leading = first,
                trailing = channels.len() - 1 - last,
                "Trimmed boundary in-air samples"
            );
            Ok(channels.slice(first..last + 1))
        }
        _ => Err(ValidationError::AllInAir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|v| json!(v)).collect()
    }

    fn valid_frame() -> RawFrame {
        let mut frame = RawFrame::new();
        frame.insert_column("x", numbers(&[10.0, 11.0, 12.0, 13.0]));
        frame.insert_column("y", numbers(&[20.0, 21.0, 22.0, 23.0]));
        frame.insert_column("time", numbers(&[0.0, 10.0, 20.0, 30.0]));
        frame.insert_column("pen_status", numbers(&[1.0, 1.0, 0.0, 1.0]));
        frame.insert_column("azimuth", numbers(&[1500.0, 1510.0, 1520.0, 1530.0]));
        frame.insert_column("tilt", numbers(&[400.0, 410.0, 420.0, 430.0]));
        frame.insert_column("pressure", numbers(&[100.0, 200.0, 0.0, 150.0]));
        frame
    }

    #[test]
    fn test_valid_frame_passes_unchanged() {
        let channels = validate_frame(&valid_frame()).unwrap();
        assert_eq!(channels.len(), 4);
        assert_eq!(channels.x, vec![10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_missing_column_named() {
        let source = valid_frame();
        let mut frame = RawFrame::new();
        for (name, values) in source.iter() {
            if name != "tilt" {
                frame.insert_column(name, values.to_vec());
            }
        }
        match validate_frame(&frame).unwrap_err() {
            ValidationError::MissingColumns(cols) => assert_eq!(cols, vec!["tilt".to_string()]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_column_named() {
        let mut frame = valid_frame();
        frame.insert_column("velocity", numbers(&[1.0, 1.0, 1.0, 1.0]));
        match validate_frame(&frame).unwrap_err() {
            ValidationError::UnexpectedColumns(cols) => {
                assert_eq!(cols, vec!["velocity".to_string()])
            }
            other => panic!("expected UnexpectedColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_uppercase_column_names_accepted() {
        let mut frame = RawFrame::new();
        for (name, values) in valid_frame().iter() {
            frame.insert_column(name.to_uppercase(), values.to_vec());
        }
        assert!(validate_frame(&frame).is_ok());
    }

    #[test]
    fn test_null_counts_enumerated_per_column() {
        let mut frame = valid_frame();
        frame.insert_column(
            "pressure",
            vec![json!(100.0), Value::Null, Value::Null, json!(150.0)],
        );
        match validate_frame(&frame).unwrap_err() {
            ValidationError::NullValues(counts) => {
                assert_eq!(counts, vec![("pressure".to_string(), 2)])
            }
            other => panic!("expected NullValues, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_column_named_in_canonical_order() {
        let mut frame = valid_frame();
        frame.insert_column("y", vec![json!("a"), json!("b"), json!("c"), json!("d")]);
        frame.insert_column(
            "tilt",
            vec![json!(true), json!(true), json!(true), json!(true)],
        );
        // y precedes tilt canonically, so y is reported first.
        assert_eq!(
            validate_frame(&frame).unwrap_err(),
            ValidationError::NonNumeric("y".to_string())
        );
    }

    #[test]
    fn test_null_check_precedes_type_check() {
        let mut frame = valid_frame();
        frame.insert_column(
            "x",
            vec![Value::Null, json!("a"), json!(1.0), json!(2.0)],
        );
        assert!(matches!(
            validate_frame(&frame).unwrap_err(),
            ValidationError::NullValues(_)
        ));
    }

    #[test]
    fn test_pen_status_violation_reports_value_and_index() {
        let mut frame = valid_frame();
        frame.insert_column("pen_status", numbers(&[1.0, 2.0, 0.0, 1.0]));
        assert_eq!(
            validate_frame(&frame).unwrap_err(),
            ValidationError::PenStatus {
                value: 2.0,
                index: 1
            }
        );
    }

    #[test]
    fn test_negative_values_name_all_offending_columns() {
        let mut frame = valid_frame();
        frame.insert_column("x", numbers(&[-1.0, 11.0, 12.0, 13.0]));
        frame.insert_column("pressure", numbers(&[100.0, -2.0, 0.0, 150.0]));
        match validate_frame(&frame).unwrap_err() {
            ValidationError::NegativeValues(cols) => {
                assert_eq!(cols, vec!["x".to_string(), "pressure".to_string()])
            }
            other => panic!("expected NegativeValues, got {other:?}"),
        }
    }

    #[test]
    fn test_boundary_trim_drops_leading_and_trailing_in_air() {
        let mut frame = valid_frame();
        frame.insert_column("x", numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        frame.insert_column("y", numbers(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        frame.insert_column("time", numbers(&[0.0, 1.0, 2.0, 3.0, 4.0]));
        frame.insert_column("pen_status", numbers(&[0.0, 0.0, 1.0, 1.0, 0.0]));
        frame.insert_column("azimuth", numbers(&[0.0; 5]));
        frame.insert_column("tilt", numbers(&[0.0; 5]));
        frame.insert_column("pressure", numbers(&[0.0, 0.0, 9.0, 9.0, 0.0]));

        let channels = validate_frame(&frame).unwrap();
        assert_eq!(channels.pen_status, vec![1.0, 1.0]);
        assert_eq!(channels.x, vec![3.0, 4.0]);
    }

    #[test]
    fn test_interior_in_air_survives_trimming() {
        let channels = validate_frame(&valid_frame()).unwrap();
        assert_eq!(channels.pen_status, vec![1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_all_in_air_is_a_domain_error() {
        let mut frame = valid_frame();
        frame.insert_column("pen_status", numbers(&[0.0, 0.0, 0.0, 0.0]));
        assert_eq!(validate_frame(&frame).unwrap_err(), ValidationError::AllInAir);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let once = validate_frame(&valid_frame()).unwrap();
        let twice = validate_channels(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_length_mismatch_reported() {
        let mut channels = validate_frame(&valid_frame()).unwrap();
        channels.tilt.pop();
        match validate_channels(channels).unwrap_err() {
            ValidationError::LengthMismatch { column, actual, expected } => {
                assert_eq!(column, "tilt");
                assert_eq!(actual, 3);
                assert_eq!(expected, 4);
            }
            other => panic!("expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_from_frame_retains_original_snapshot() {
        let sample = sample_from_frame(&valid_frame(), MetaData::new()).unwrap();
        assert_eq!(sample.original(), Some(sample.channels()));
        assert_eq!(sample.len(), 4);
    }
}
