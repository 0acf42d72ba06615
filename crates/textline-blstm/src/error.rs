//! Error types for the recognition pipeline.

use thiserror::Error;

/// Errors raised by the recognition pipeline.
///
/// Shape violations carry the expected and actual counts together with the
/// name of the buffer that was mis-sized, so load-time failures identify the
/// violated invariant directly.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A weight or activation buffer had the wrong element count.
    #[error("dimension mismatch in {what}: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Image pixel count is not a multiple of the configured height.
    #[error("image pixel count {pixels} is not a multiple of height {height}")]
    MisalignedImage { pixels: usize, height: usize },

    /// An input that must be non-empty was empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Invalid configuration value.
    #[error("configuration error: {message}")]
    ConfigError { message: String },

    /// IO error (configuration file loading).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for recognition operations.
pub type NetworkResult<T> = Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_names_the_buffer() {
        let err = NetworkError::DimensionMismatch {
            what: "input gate weights",
            expected: 12600,
            actual: 12599,
        };
        let msg = err.to_string();
        assert!(msg.contains("input gate weights"));
        assert!(msg.contains("12600"));
        assert!(msg.contains("12599"));
    }

    #[test]
    fn misaligned_image_reports_both_counts() {
        let err = NetworkError::MisalignedImage {
            pixels: 101,
            height: 25,
        };
        assert!(err.to_string().contains("101"));
        assert!(err.to_string().contains("25"));
    }
}
