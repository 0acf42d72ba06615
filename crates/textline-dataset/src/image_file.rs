//! Text-format line-image loader.
//!
//! Images arrive as whitespace-separated pixel intensities, column-major
//! (the text dump of the original dataset). The pixel count must be a
//! multiple of the configured height; the mirrored view is built by the
//! core `LineImage` type.

use std::path::Path;

use textline_blstm::LineImage;
use tracing::info;

use crate::error::{DatasetError, DatasetResult};
use crate::parse::parse_floats;

/// Load a text image file as a `LineImage`.
///
/// # Errors
///
/// - `DatasetError::Io` if the file cannot be read
/// - `DatasetError::Parse` on a non-numeric token
/// - shape errors from the core crate (misaligned pixel count, empty file)
pub fn load_line_image(path: impl AsRef<Path>, height: usize) -> DatasetResult<LineImage> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pixels = parse_floats(path, &contents)?;
    let image = LineImage::from_pixels(height, pixels)?;
    info!(
        path = %path.display(),
        columns = image.columns(),
        height,
        "loaded line image"
    );
    Ok(image)
}
