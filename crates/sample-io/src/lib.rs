//! Inkstream Sample I/O
//!
//! File adapters at the boundary of the processing core:
//! - **JSON:** `{ "data": {...}, "meta_data": {...} }` documents
//! - **SVC:** count-line plus space-separated rows, with
//!   filename-embedded metadata (HandAQUS convention)
//! - **Pointer events:** export channels in the pointer-event shape
//!
//! Adapters produce the untyped exchange frame and hand it to the
//! validator; writing re-validates so files on disk always satisfy the
//! recording invariants.

pub mod json;
pub mod naming;
pub mod pointer_event;
pub mod svc;

pub use json::{load_json, read_json, write_json};
pub use pointer_event::PointerEventData;
pub use svc::{load_svc, read_svc, write_svc};
