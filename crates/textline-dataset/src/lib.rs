//! File collaborators for the `textline-blstm` pipeline.
//!
//! The core crate deliberately takes pre-built matrices and returns label
//! indices; everything that touches the filesystem lives here instead:
//!
//! - [`Alphabet`] — label-index to symbol translation
//! - [`load_line_image`] — whitespace-float text images
//! - [`load_ground_truth`] — per-image reference transcriptions
//! - [`load_model`] — the serialized weight blocks
//!
//! All loaders validate counts up front and fail with a diagnostic naming
//! the violated invariant; a bad file never leaves partially-initialized
//! state behind.

pub mod alphabet;
pub mod error;
pub mod ground_truth;
pub mod image_file;
pub mod model_file;

mod parse;

pub use alphabet::Alphabet;
pub use error::{DatasetError, DatasetResult};
pub use ground_truth::load_ground_truth;
pub use image_file::load_line_image;
pub use model_file::load_model;
