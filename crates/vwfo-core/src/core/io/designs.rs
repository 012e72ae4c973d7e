use super::error::TableIoError;
use super::traits::{CsvFormat, TableFile};
use crate::core::models::table::{DesignValueTable, SurplusRecord};
use std::io::Read;
use tracing::info;

const REQUIRED_COLUMNS: [&str; 3] = ["design", "scenario", "sv"];

/// Reader for the design table: one `design,scenario,sv` row per pair.
///
/// Extra columns are ignored. Row order decides the canonical design and
/// scenario order.
pub struct DesignTableFile;

impl TableFile for DesignTableFile {
    type Table = DesignValueTable;

    fn read_from(reader: impl Read, format: &CsvFormat) -> Result<DesignValueTable, TableIoError> {
        let mut csv_reader = format.reader_builder().from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(TableIoError::MissingColumn(column.to_string()));
            }
        }

        let records = csv_reader
            .deserialize::<SurplusRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        let table = DesignValueTable::from_records(records)?;

        info!(
            "Loaded {} design(s) across {} scenario(s).",
            table.design_count(),
            table.scenarios().len()
        );
        Ok(table)
    }
}
