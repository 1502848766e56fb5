//! Run-length segmentation of a recording into strokes.
//!
//! A stroke is a maximal contiguous run of samples sharing one
//! pen-status value. Segmentation is O(N): one pass collects the
//! change indices, one pass materializes the slices. Stroke samples
//! are built without re-validation — they are slices of an already
//! validated parent, and re-running boundary trimming on a slice would
//! be destructive.

use inkstream_common::InkResult;
use inkstream_sample_model::{MetaData, Sample, SampleChannels, Stroke, StrokeStatus};

/// Split a recording into ordered strokes.
///
/// `on_surface_only` / `in_air_only` filter the result after
/// segmentation. Requesting both simultaneously is treated as
/// requesting neither (all strokes are returned) — a documented
/// override, not an error.
pub fn strokes(
    sample: &Sample,
    mut on_surface_only: bool,
    mut in_air_only: bool,
) -> InkResult<Vec<Stroke>> {
    if on_surface_only && in_air_only {
        on_surface_only = false;
        in_air_only = false;
    }

    let status = sample.pen_status();
    if status.is_empty() {
        // No strokes to process; benign no-op.
        return Ok(Vec::new());
    }

    let mut bounds = Vec::with_capacity(8);
    bounds.push(0usize);
    for i in 1..status.len() {
        if status[i] != status[i - 1] {
            bounds.push(i);
        }
    }
    bounds.push(status.len());

    let mut result = Vec::with_capacity(bounds.len() - 1);
    for window in bounds.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start == end {
            continue;
        }

        let label = StrokeStatus::from_pen_status(status[start]);
        if on_surface_only && label == StrokeStatus::InAir {
            continue;
        }
        if in_air_only && label == StrokeStatus::OnSurface {
            continue;
        }

        let slice = sample.channels().slice(start..end);
        result.push(Stroke {
            status: label,
            sample: Sample::from_validated_parts(slice, MetaData::new())?,
        });
    }

    tracing::debug!(count = result.len(), "Segmented recording into strokes");
    Ok(result)
}

/// Strokes written on the tablet surface.
pub fn on_surface_strokes(sample: &Sample) -> InkResult<Vec<Stroke>> {
    strokes(sample, true, false)
}

/// Strokes performed while hovering above the surface.
pub fn in_air_strokes(sample: &Sample) -> InkResult<Vec<Stroke>> {
    strokes(sample, false, true)
}

/// All on-surface rows of the recording as one derived sample.
pub fn on_surface_data(sample: &Sample) -> InkResult<Sample> {
    movement_filtered(sample, 1.0)
}

/// All in-air rows of the recording as one derived sample.
pub fn in_air_data(sample: &Sample) -> InkResult<Sample> {
    movement_filtered(sample, 0.0)
}

fn movement_filtered(sample: &Sample, wanted_status: f64) -> InkResult<Sample> {
    let status = sample.pen_status();
    let keep: Vec<usize> = (0..status.len())
        .filter(|&i| status[i] == wanted_status)
        .collect();

    let mut channels = SampleChannels::default();
    for column in inkstream_sample_model::CANONICAL_COLUMNS {
        let source = sample.channels().channel(column);
        *channels.channel_mut(column) = keep.iter().map(|&i| source[i]).collect();
    }
    Sample::from_validated_parts(channels, MetaData::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_with_status(status: &[f64]) -> Sample {
        let n = status.len();
        let channels = SampleChannels {
            x: (0..n).map(|i| i as f64).collect(),
            y: (0..n).map(|i| (i * 2) as f64).collect(),
            time: (0..n).map(|i| (i * 10) as f64).collect(),
            pen_status: status.to_vec(),
            azimuth: vec![0.0; n],
            tilt: vec![0.0; n],
            pressure: status.iter().map(|&s| s * 100.0).collect(),
        };
        Sample::from_validated_parts(channels, MetaData::new()).unwrap()
    }

    #[test]
    fn test_spec_example_segmentation() {
        let sample = sample_with_status(&[1.0, 1.0, 0.0, 0.0, 1.0]);
        let strokes = strokes(&sample, false, false).unwrap();

        let labels: Vec<&str> = strokes.iter().map(|s| s.status.as_str()).collect();
        let lengths: Vec<usize> = strokes.iter().map(|s| s.sample.len()).collect();
        assert_eq!(labels, vec!["on_surface", "in_air", "on_surface"]);
        assert_eq!(lengths, vec![2, 2, 1]);
    }

    #[test]
    fn test_coverage_no_rows_dropped_or_duplicated() {
        let sample = sample_with_status(&[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        let strokes = strokes(&sample, false, false).unwrap();

        let total: usize = strokes.iter().map(|s| s.sample.len()).sum();
        assert_eq!(total, sample.len());

        // Concatenated x channels reproduce the parent in order.
        let concat: Vec<f64> = strokes
            .iter()
            .flat_map(|s| s.sample.x().to_vec())
            .collect();
        assert_eq!(concat, sample.x());
    }

    #[test]
    fn test_single_run_yields_one_stroke() {
        let sample = sample_with_status(&[1.0, 1.0, 1.0]);
        let strokes = strokes(&sample, false, false).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].status, StrokeStatus::OnSurface);
        assert_eq!(strokes[0].sample.len(), 3);
    }

    #[test]
    fn test_boundary_indices_label_correctly() {
        // Transitions at index 0->1 and N-2->N-1.
        let sample = sample_with_status(&[0.0, 1.0, 1.0, 0.0]);
        let strokes = strokes(&sample, false, false).unwrap();
        let labels: Vec<StrokeStatus> = strokes.iter().map(|s| s.status).collect();
        assert_eq!(
            labels,
            vec![
                StrokeStatus::InAir,
                StrokeStatus::OnSurface,
                StrokeStatus::InAir
            ]
        );
    }

    #[test]
    fn test_on_surface_filter() {
        let sample = sample_with_status(&[1.0, 0.0, 1.0, 0.0]);
        let surface = on_surface_strokes(&sample).unwrap();
        assert_eq!(surface.len(), 2);
        assert!(surface
            .iter()
            .all(|s| s.status == StrokeStatus::OnSurface));
    }

    #[test]
    fn test_both_filters_return_all_strokes() {
        let sample = sample_with_status(&[1.0, 0.0, 1.0]);
        let all = strokes(&sample, true, true).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_movement_filtered_subsets() {
        let sample = sample_with_status(&[1.0, 0.0, 0.0, 1.0]);
        let surface = on_surface_data(&sample).unwrap();
        let air = in_air_data(&sample).unwrap();

        assert_eq!(surface.len(), 2);
        assert_eq!(air.len(), 2);
        assert_eq!(surface.x(), &[0.0, 3.0]);
        assert_eq!(air.x(), &[1.0, 2.0]);
    }

    proptest::proptest! {
        #[test]
        fn prop_stroke_lengths_sum_to_parent(status in proptest::collection::vec(0u8..=1, 1..60)) {
            let status: Vec<f64> = status.into_iter().map(f64::from).collect();
            let sample = sample_with_status(&status);
            let strokes = strokes(&sample, false, false).unwrap();

            let total: usize = strokes.iter().map(|s| s.sample.len()).sum();
            proptest::prop_assert_eq!(total, sample.len());

            // Runs alternate: adjacent strokes never share a label.
            for pair in strokes.windows(2) {
                proptest::prop_assert_ne!(pair[0].status, pair[1].status);
            }
        }
    }
}
