//! Ground-truth transcription loader: one reference string per image.

use std::path::Path;

use crate::error::{DatasetError, DatasetResult};

/// Load the reference transcription for one image.
///
/// The file holds the transcription on its final line; earlier lines are
/// ignored.
///
/// # Errors
///
/// Returns `DatasetError::Io` if the file cannot be read.
pub fn load_ground_truth(path: impl AsRef<Path>) -> DatasetResult<String> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.lines().last().unwrap_or("").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn takes_the_last_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# header\nthe quick brown fox\n").unwrap();
        assert_eq!(
            load_ground_truth(file.path()).unwrap(),
            "the quick brown fox"
        );
    }

    #[test]
    fn empty_file_gives_empty_string() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(load_ground_truth(file.path()).unwrap(), "");
    }
}
