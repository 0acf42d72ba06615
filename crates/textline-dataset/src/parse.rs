//! Shared numeric parsing for the whitespace-float file formats.

use std::path::Path;

use crate::error::{DatasetError, DatasetResult};

/// Parse every whitespace-separated token as an `f32`.
pub(crate) fn parse_floats(path: &Path, contents: &str) -> DatasetResult<Vec<f32>> {
    contents
        .split_whitespace()
        .map(|token| {
            token.parse::<f32>().map_err(|_| DatasetError::Parse {
                path: path.to_path_buf(),
                token: token.to_string(),
            })
        })
        .collect()
}
