//! Input line images: column-major pixel matrices with a mirrored view.
//!
//! The recurrent layer always scans its input left to right; the backward
//! direction is realized by feeding it the column-mirrored image. Both views
//! are materialized once here so the layers only ever see plain buffers.

use crate::error::{NetworkError, NetworkResult};

/// One text-line image, `columns x height` pixels, plus its column-mirrored
/// twin.
///
/// Immutable for the lifetime of an inference call.
///
/// # Example
///
/// ```rust
/// use textline_blstm::LineImage;
///
/// // Two columns of height 2.
/// let image = LineImage::from_pixels(2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
/// assert_eq!(image.columns(), 2);
/// assert_eq!(image.backward(), &[0.3, 0.4, 0.1, 0.2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineImage {
    forward: Vec<f32>,
    backward: Vec<f32>,
    height: usize,
    columns: usize,
}

impl LineImage {
    /// Build both views from a flat column-major pixel buffer.
    ///
    /// # Errors
    ///
    /// - `NetworkError::ConfigError` if `height` is zero
    /// - `NetworkError::MisalignedImage` if the pixel count is not a
    ///   multiple of `height`
    /// - `NetworkError::EmptyInput` for an empty buffer
    pub fn from_pixels(height: usize, pixels: Vec<f32>) -> NetworkResult<Self> {
        if height == 0 {
            return Err(NetworkError::ConfigError {
                message: "image height must be nonzero".to_string(),
            });
        }
        if pixels.is_empty() {
            return Err(NetworkError::EmptyInput("image pixels"));
        }
        if pixels.len() % height != 0 {
            return Err(NetworkError::MisalignedImage {
                pixels: pixels.len(),
                height,
            });
        }

        let columns = pixels.len() / height;
        let backward = mirror_columns(&pixels, columns, height);

        Ok(Self {
            forward: pixels,
            backward,
            height,
            columns,
        })
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Natural column order, column-major.
    #[inline]
    #[must_use]
    pub fn forward(&self) -> &[f32] {
        &self.forward
    }

    /// Column-mirrored order: `backward[c] == forward[columns - 1 - c]`.
    #[inline]
    #[must_use]
    pub fn backward(&self) -> &[f32] {
        &self.backward
    }
}

/// Reverse the column order of a column-major buffer; rows within each
/// column keep their order.
fn mirror_columns(pixels: &[f32], columns: usize, height: usize) -> Vec<f32> {
    let mut mirrored = vec![0.0; pixels.len()];
    for col in 0..columns {
        let src = (columns - 1 - col) * height;
        mirrored[col * height..(col + 1) * height]
            .copy_from_slice(&pixels[src..src + height]);
    }
    mirrored
}
