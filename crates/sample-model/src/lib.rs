//! Inkstream Sample Model
//!
//! Defines the core data contracts for handwriting recordings:
//! - **Columns:** The seven canonical channels of a recording
//! - **Channels:** Equal-length numeric sequences, one value per timestep
//! - **RawFrame:** The untyped dict-of-sequences shape adapters hand over
//! - **Sample:** A validated recording with metadata
//! - **Stroke:** A labeled contiguous slice of a sample
//!
//! All channel values are `f64` regardless of the raw device encoding so
//! transforms can replace raw codes with physical units in place.

pub mod channels;
pub mod column;
pub mod meta;
pub mod sample;

pub use channels::*;
pub use column::*;
pub use meta::*;
pub use sample::*;
