//! JSON document adapter.
//!
//! Documents carry the exchange frame under `"data"` and the metadata
//! mapping under `"meta_data"`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use inkstream_common::{InkResult, InkstreamError};
use inkstream_processing_core::validator;
use inkstream_sample_model::{MetaData, RawFrame, Sample};

use crate::naming;

/// On-disk JSON document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SampleDocument {
    #[serde(default)]
    meta_data: MetaData,
    data: RawFrame,
}

/// Read the raw exchange frame and metadata from a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> InkResult<(RawFrame, MetaData)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InkstreamError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let document: SampleDocument = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded sample data from JSON file");
    Ok((document.data, document.meta_data))
}

/// Read and validate a JSON file into a [`Sample`].
pub fn load_json(path: impl AsRef<Path>) -> InkResult<Sample> {
    let (frame, meta) = read_json(path)?;
    validator::sample_from_frame(&frame, meta)
}

/// Write a sample to `<dir>/<file_name>.json`.
///
/// The frame is re-validated before writing so stored files always
/// satisfy the recording invariants. Without an explicit `file_name`,
/// one is derived from the metadata. `store_original` writes the
/// untransformed channel snapshot instead of the working channels.
pub fn write_json(
    sample: &Sample,
    dir: impl AsRef<Path>,
    file_name: Option<&str>,
    store_original: bool,
) -> InkResult<PathBuf> {
    let frame = if store_original {
        sample.original_frame()
    } else {
        sample.data_frame()
    };
    let channels = validator::validate_frame(&frame)?;
    let meta = naming::prepare_meta(&sample.meta);

    let file_name = match file_name {
        Some(name) => name.to_string(),
        None => naming::collect_file_name(&meta)?,
    };

    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{file_name}.json"));

    let document = SampleDocument {
        meta_data: meta,
        data: RawFrame::from_channels(&channels),
    };
    std::fs::write(&path, serde_json::to_string(&document)?)
        .map_err(|e| InkstreamError::storage(format!("unable to store JSON file: {e}")))?;

    tracing::info!(path = %path.display(), "Data stored in a JSON file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Sample {
        let mut frame = RawFrame::new();
        frame.insert_column("x", vec![json!(10), json!(20)]);
        frame.insert_column("y", vec![json!(5), json!(6)]);
        frame.insert_column("time", vec![json!(0), json!(10)]);
        frame.insert_column("pen_status", vec![json!(1), json!(1)]);
        frame.insert_column("azimuth", vec![json!(1500), json!(1600)]);
        frame.insert_column("tilt", vec![json!(400), json!(410)]);
        frame.insert_column("pressure", vec![json!(120), json!(130)]);

        let mut meta = MetaData::new();
        meta.insert("participant", json!({ "id": "subj01" }));
        meta.insert("task_id", "spiral");
        meta.insert("created_on", "2021-03-01");
        validator::sample_from_frame(&frame, meta).unwrap()
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = std::env::temp_dir().join("inkstream_test_json");
        let _ = std::fs::remove_dir_all(&dir);

        let original = sample();
        let path = write_json(&original, &dir, None, false).unwrap();
        assert_eq!(path.file_name().unwrap(), "subj01_spiral_2021-03-01.json");

        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.x(), original.x());
        assert_eq!(loaded.meta.get("task_id"), Some(&json!("spiral")));
        assert!(loaded.meta.contains_key("written_on"));
    }

    #[test]
    fn test_missing_file_reports_file_not_found() {
        let err = read_json("/nonexistent/sample.json").unwrap_err();
        assert!(matches!(err, InkstreamError::FileNotFound { .. }));
    }

    #[test]
    fn test_document_without_meta_data_defaults_empty() {
        let dir = std::env::temp_dir().join("inkstream_test_json_nometa");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let body = serde_json::to_string(&sample().data_frame()).unwrap();
        let path = dir.join("bare.json");
        std::fs::write(&path, format!(r#"{{"data":{body}}}"#)).unwrap();

        let (frame, meta) = read_json(&path).unwrap();
        assert!(meta.is_empty());
        assert_eq!(frame.column_count(), 7);
    }
}
