//! SVC file adapter.
//!
//! The SVC format is a plain-text table: the first line holds the
//! sample count, every following line one row of the seven canonical
//! channels separated by spaces. Acquisition software (HandAQUS)
//! embeds provenance in the file name as underscore-separated
//! segments: `id[_birth_sex]_task_admin_created`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use inkstream_common::{InkResult, InkstreamError};
use inkstream_processing_core::validator;
use inkstream_sample_model::{MetaData, RawFrame, Sample, CANONICAL_COLUMNS};

use crate::naming;

/// Read the raw exchange frame and filename metadata from an SVC file.
pub fn read_svc(path: impl AsRef<Path>) -> InkResult<(RawFrame, MetaData)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InkstreamError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let mut lines = content.lines();

    let count_line = lines.next().ok_or_else(|| {
        InkstreamError::storage(format!("SVC file is empty: {}", path.display()))
    })?;
    let samples_count: u64 = count_line.trim().parse().map_err(|_| {
        InkstreamError::storage(format!(
            "SVC file does not start with a sample count: {}",
            path.display()
        ))
    })?;

    let mut columns: [Vec<Value>; 7] = Default::default();
    for (row_index, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != CANONICAL_COLUMNS.len() {
            return Err(InkstreamError::storage(format!(
                "SVC row {} has {} fields, expected {}",
                row_index + 1,
                fields.len(),
                CANONICAL_COLUMNS.len()
            )));
        }
        for (column, field) in columns.iter_mut().zip(fields) {
            let value = field
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null);
            column.push(value);
        }
    }

    let mut frame = RawFrame::new();
    for (column, values) in CANONICAL_COLUMNS.iter().zip(columns) {
        frame.insert_column(column.as_str(), values);
    }

    let mut meta = metadata_from_file_name(path);
    meta.insert("samples_count", samples_count);

    tracing::debug!(path = %path.display(), "Loaded sample data from SVC file");
    Ok((frame, meta))
}

/// Read and validate an SVC file into a [`Sample`].
pub fn load_svc(path: impl AsRef<Path>) -> InkResult<Sample> {
    let (frame, meta) = read_svc(path)?;
    validator::sample_from_frame(&frame, meta)
}

/// Write a sample to `<dir>/<file_name>.svc`, re-validating first.
pub fn write_svc(
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
    let path = dir.join(format!("{file_name}.svc"));

    let mut body = String::new();
    body.push_str(&format!("{}\n", channels.len()));
    for i in 0..channels.len() {
        let row: Vec<String> = CANONICAL_COLUMNS
            .iter()
            .map(|c| channels.channel(*c)[i].to_string())
            .collect();
        body.push_str(&row.join(" "));
        body.push('\n');
    }

    std::fs::write(&path, body)
        .map_err(|e| InkstreamError::storage(format!("unable to store SVC file: {e}")))?;

    tracing::info!(path = %path.display(), "Data stored in an SVC file");
    Ok(path)
}

/// Parse the HandAQUS filename convention into metadata. Names with
/// fewer than four segments are the old format carrying nothing.
fn metadata_from_file_name(path: &Path) -> MetaData {
    let mut meta = MetaData::new();

    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem,
        None => return meta,
    };
    let segments: Vec<&str> = stem.split('_').collect();

    if segments.len() < 4 {
        tracing::debug!(stem, "Old file-name format, no embedded meta data");
        return meta;
    }

    let participant = if segments.len() == 6 {
        serde_json::json!({
            "id": segments[0],
            "birth_date": segments[1],
            "sex": segments[2],
        })
    } else {
        serde_json::json!({ "id": segments[0] })
    };
    meta.insert("participant", participant);
    meta.insert("task_id", segments[segments.len() - 3]);
    meta.insert("administrator", segments[segments.len() - 2]);
    meta.insert("created_on", segments[segments.len() - 1]);
    meta
}
