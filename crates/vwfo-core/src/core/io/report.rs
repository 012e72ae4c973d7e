use super::error::TableIoError;
use super::traits::CsvFormat;
use crate::engine::batch::VwfoBatch;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_REPORT_FILE_NAME: &str = "designs_vwfo.csv";

const HEADER: [&str; 5] = ["design", "current_scenario", "following_scenario", "vwfo", "error"];

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    design: &'a str,
    current_scenario: &'a str,
    following_scenario: &'a str,
    vwfo: Option<f64>,
    error: Option<String>,
}

/// Writes VWFO batches as one flat CSV table.
///
/// Rows follow batch order, then canonical design order within a batch. A
/// failed design has an empty `vwfo` cell and its message in `error`.
pub struct VwfoReportFile;

impl VwfoReportFile {
    /// Returns the number of data rows written.
    pub fn write_to<'b, I>(
        batches: I,
        writer: impl Write,
        format: &CsvFormat,
    ) -> Result<usize, TableIoError>
    where
        I: IntoIterator<Item = &'b VwfoBatch>,
    {
        let mut csv_writer = format.writer_builder().from_writer(writer);
        csv_writer.write_record(HEADER)?;

        let mut rows = 0;
        for batch in batches {
            let pair = batch.pair();
            for entry in batch.entries() {
                let (vwfo, error) = match &entry.value {
                    Ok(value) => (Some(*value), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                csv_writer.serialize(ReportRow {
                    design: entry.design.as_str(),
                    current_scenario: pair.current.as_str(),
                    following_scenario: pair.following.as_str(),
                    vwfo,
                    error,
                })?;
                rows += 1;
            }
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(rows)
    }

    pub fn write_to_path<'b, I, P>(
        batches: I,
        path: P,
        format: &CsvFormat,
    ) -> Result<usize, TableIoError>
    where
        I: IntoIterator<Item = &'b VwfoBatch>,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TableIoError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::write_to(batches, BufWriter::new(file), format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ScenarioPair;
    use crate::core::models::table::{DesignValueTable, SurplusRecord};
    use crate::core::models::transition::TransitionGraph;
    use crate::engine::vwfo::VwfoEngine;
    use tempfile::tempdir;

    fn batches() -> Vec<VwfoBatch> {
        let table = DesignValueTable::from_records(vec![
            SurplusRecord::new("A", "s1", 10.0),
            SurplusRecord::new("B", "s1", 20.0),
            SurplusRecord::new("A", "s2", 15.0),
            SurplusRecord::new("B", "s2", 15.0),
        ])
        .unwrap();
        let engine = VwfoEngine::new(&table);
        let ok_graph = TransitionGraph::from_edges(
            ScenarioPair::new("s1", "s2"),
            table.designs(),
            [("A", "B"), ("B", "A")],
        )
        .unwrap();
        let bad_graph = TransitionGraph::from_edges(
            ScenarioPair::new("s1", "s3"),
            table.designs(),
            [("A", "B")],
        )
        .unwrap();
        vec![
            engine.compute_all("s1", "s2", &ok_graph).unwrap(),
            engine.compute_all("s1", "s3", &bad_graph).unwrap(),
        ]
    }

    #[test]
    fn writes_header_values_and_errors() {
        let mut out = Vec::new();
        let rows = VwfoReportFile::write_to(&batches(), &mut out, &CsvFormat::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 4);
        assert_eq!(lines[0], "design,current_scenario,following_scenario,vwfo,error");
        assert_eq!(lines[1], "A,s1,s2,1.0,");
        assert_eq!(lines[2], "B,s1,s2,-1.0,");
        assert!(lines[3].starts_with("A,s1,s3,,"));
        assert!(lines[3].contains("Surplus value not found for design 'B' in scenario 's3'"));
        assert_eq!(lines[4], "B,s1,s3,0.0,");
    }

    #[test]
    fn empty_input_still_writes_header() {
        let mut out = Vec::new();
        let rows =
            VwfoReportFile::write_to(&Vec::<VwfoBatch>::new(), &mut out, &CsvFormat::with_delimiter(b';'))
                .unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "design;current_scenario;following_scenario;vwfo;error\n"
        );
    }

    #[test]
    fn writes_to_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_FILE_NAME);
        VwfoReportFile::write_to_path(&batches(), &path, &CsvFormat::default()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 5);
    }
}
