//! Metadata preparation and filename conventions shared by the writers.

use inkstream_common::{InkResult, InkstreamError};
use inkstream_sample_model::{now_stamp, MetaData};

/// Stamp write-time metadata: `written_on` always, `created_on` only
/// when the sample never had one.
pub fn prepare_meta(meta: &MetaData) -> MetaData {
    let mut prepared = meta.clone();
    prepared.insert("written_on", now_stamp());
    if !prepared.contains_key("created_on") {
        prepared.insert("created_on", now_stamp());
    }
    prepared
}

/// Derive the default file name from metadata, HandAQUS style:
/// `id[_birthdate][_sex]_taskid_admin_createdon`, skipping absent
/// parts. Requires participant info; samples without it need an
/// explicit file name.
pub fn collect_file_name(meta: &MetaData) -> InkResult<String> {
    let participant = meta
        .get("participant")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            InkstreamError::storage(
                "no participant meta data for this sample; please select a file name manually",
            )
        })?;

    let parts = [
        participant.get("id").and_then(|v| v.as_str()),
        participant.get("birth_date").and_then(|v| v.as_str()),
        participant.get("sex").and_then(|v| v.as_str()),
        meta.get("task_id").and_then(|v| v.as_str()),
        meta.get("administrator").and_then(|v| v.as_str()),
        meta.get("created_on").and_then(|v| v.as_str()),
    ];

    let name = parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<&str>>()
        .join("_");
    if name.is_empty() {
        return Err(InkstreamError::storage(
            "meta data hold no usable fields for a file name",
        ));
    }
    Ok(name)
}
