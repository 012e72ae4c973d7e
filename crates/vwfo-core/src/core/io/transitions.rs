use super::error::TableIoError;
use super::traits::{CsvFormat, TableFile};
use crate::core::models::ids::{DesignId, ScenarioPair};
use crate::core::models::transition::{AdjacencyMatrix, TransitionGraph};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const LABEL_COLUMN: &str = "design";

/// Reader for a square transition matrix.
///
/// The `design` column holds the source design of each row; every other
/// header names a target design. Entries are numeric, or `true`/`false`.
pub struct TransitionMatrixFile;

impl TransitionMatrixFile {
    /// The file name a matrix for `pair` is expected under.
    pub fn file_name(pair: &ScenarioPair) -> String {
        format!("{}.csv", pair.key())
    }

    /// Reads a matrix and validates it into a graph for `pair`.
    pub fn read_graph_from_path<P: AsRef<Path>>(
        path: P,
        pair: ScenarioPair,
        designs: &[DesignId],
        format: &CsvFormat,
    ) -> Result<TransitionGraph, TableIoError> {
        let matrix = Self::read_from_path(path, format)?;
        Ok(TransitionGraph::from_matrix(pair, &matrix, designs)?)
    }
}

impl TableFile for TransitionMatrixFile {
    type Table = AdjacencyMatrix;

    fn read_from(reader: impl Read, format: &CsvFormat) -> Result<AdjacencyMatrix, TableIoError> {
        let mut csv_reader = format.reader_builder().from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| TableIoError::MissingColumn(LABEL_COLUMN.to_string()))?;
        let column_labels: Vec<DesignId> = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != label_idx)
            .map(|(_, h)| DesignId::from(h))
            .collect();

        let mut row_labels = Vec::new();
        let mut cells = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let label = record.get(label_idx).unwrap_or_default();

            let mut row = Vec::with_capacity(column_labels.len());
            for (i, field) in record.iter().enumerate() {
                if i == label_idx {
                    continue;
                }
                let value = parse_entry(field).ok_or_else(|| TableIoError::InvalidCell {
                    row: label.to_string(),
                    column: headers.get(i).unwrap_or_default().to_string(),
                    text: field.to_string(),
                })?;
                row.push(value);
            }
            row_labels.push(DesignId::from(label));
            cells.push(row);
        }

        debug!(
            rows = row_labels.len(),
            columns = column_labels.len(),
            "Read transition matrix."
        );
        Ok(AdjacencyMatrix::new(row_labels, column_labels, cells)?)
    }
}

fn parse_entry(field: &str) -> Option<f64> {
    if field.eq_ignore_ascii_case("true") {
        return Some(1.0);
    }
    if field.eq_ignore_ascii_case("false") {
        return Some(0.0);
    }
    field.parse::<f64>().ok()
}
