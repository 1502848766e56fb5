//! Inkstream Processing Core
//!
//! The validation, segmentation, and unit-transformation engine for
//! handwriting recordings:
//! - **Validator:** schema/domain checks and boundary trimming of
//!   leading/trailing in-air movement
//! - **Segmenter:** run-length splitting of a recording into
//!   on-surface/in-air strokes
//! - **Transform:** raw device units to physical units (millimeters,
//!   seconds, degrees, normalized pressure levels)
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod segmenter;
pub mod transform;
pub mod validator;

pub use segmenter::strokes;
pub use transform::TransformError;
pub use validator::ValidationError;
