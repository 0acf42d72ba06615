//! The alphabet: label index to symbol translation.

use std::path::Path;

use tracing::info;

use crate::error::{DatasetError, DatasetResult};

/// Ordered list of symbol strings, one per output class.
///
/// Index 0 is the blank; index `i` must map to the symbol the model was
/// trained with. Loaded once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<String>,
}

impl Alphabet {
    /// Wrap an ordered symbol list, enforcing the class count.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::AlphabetSize` if `symbols.len() != num_classes`.
    pub fn from_symbols(symbols: Vec<String>, num_classes: usize) -> DatasetResult<Self> {
        if symbols.len() != num_classes {
            return Err(DatasetError::AlphabetSize {
                expected: num_classes,
                actual: symbols.len(),
            });
        }
        Ok(Self { symbols })
    }

    /// Load an alphabet file: one symbol per line, exactly `num_classes`
    /// lines.
    ///
    /// # Errors
    ///
    /// - `DatasetError::Io` if the file cannot be read
    /// - `DatasetError::AlphabetSize` on a wrong line count
    pub fn from_file(path: impl AsRef<Path>, num_classes: usize) -> DatasetResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let symbols: Vec<String> = contents.lines().map(str::to_string).collect();
        let alphabet = Self::from_symbols(symbols, num_classes)?;
        info!(path = %path.display(), symbols = num_classes, "loaded alphabet");
        Ok(alphabet)
    }

    /// Number of symbols.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbol for one class label.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::ClassOutOfRange` for an out-of-range label.
    pub fn symbol(&self, label: usize) -> DatasetResult<&str> {
        self.symbols
            .get(label)
            .map(String::as_str)
            .ok_or(DatasetError::ClassOutOfRange {
                label,
                num_classes: self.symbols.len(),
            })
    }

    /// Translate a decoded label sequence into a string.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::ClassOutOfRange` on the first bad label.
    pub fn render(&self, labels: &[usize]) -> DatasetResult<String> {
        let mut out = String::new();
        for &label in labels {
            out.push_str(self.symbol(label)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_one_symbol_per_line() {
        let file = write_temp("_\na\nb\n");
        let alphabet = Alphabet::from_file(file.path(), 3).unwrap();
        assert_eq!(alphabet.symbol(0).unwrap(), "_");
        assert_eq!(alphabet.symbol(2).unwrap(), "b");
    }

    #[test]
    fn wrong_line_count_is_fatal() {
        let file = write_temp("_\na\nb\n");
        let err = Alphabet::from_file(file.path(), 4).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::AlphabetSize {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn out_of_range_label_is_an_error_not_an_abort() {
        let alphabet =
            Alphabet::from_symbols(vec!["_".into(), "x".into()], 2).unwrap();
        assert!(matches!(
            alphabet.symbol(2),
            Err(DatasetError::ClassOutOfRange {
                label: 2,
                num_classes: 2
            })
        ));
    }

    #[test]
    fn renders_label_sequences() {
        let alphabet =
            Alphabet::from_symbols(vec!["_".into(), "h".into(), "i".into()], 3).unwrap();
        assert_eq!(alphabet.render(&[1, 2]).unwrap(), "hi");
        assert_eq!(alphabet.render(&[]).unwrap(), "");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Alphabet::from_file("/nonexistent/alphabet.txt", 3).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/alphabet.txt"));
    }
}
