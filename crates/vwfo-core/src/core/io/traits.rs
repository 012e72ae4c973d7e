use super::error::TableIoError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Plain CSV layout settings. The separator is always given explicitly;
/// nothing is sniffed from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: u8,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvFormat {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All);
        builder
    }

    pub(crate) fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(self.delimiter).has_headers(false);
        builder
    }
}

/// Defines how a tabular input file is read into an in-memory structure.
///
/// Implementors handle the column layout of one kind of table and return the
/// unvalidated or validated structure the rest of the crate works with.
pub trait TableFile {
    /// The structure produced by a successful read.
    type Table;

    /// Reads a table from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed, a required column is absent,
    /// a cell cannot be interpreted, or the resulting data fails validation.
    fn read_from(reader: impl Read, format: &CsvFormat) -> Result<Self::Table, TableIoError>;

    /// Reads a table from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`TableIoError::Io`] if the file cannot be opened, and any
    /// error of [`TableFile::read_from`] otherwise.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        format: &CsvFormat,
    ) -> Result<Self::Table, TableIoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TableIoError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::read_from(BufReader::new(file), format)
    }
}
