use crate::config::AppConfig;
use crate::error::{CliError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vwfo::core::io::designs::DesignTableFile;
use vwfo::core::io::traits::{CsvFormat, TableFile};
use vwfo::core::io::transitions::TransitionMatrixFile;
use vwfo::core::models::ids::{ScenarioPair, ensure_distinct_keys};
use vwfo::core::models::table::DesignValueTable;
use vwfo::core::models::transition::{TransitionGraph, TransitionSet};
use vwfo::engine::config::PairSelection;

const MATRIX_EXTENSION: &str = "csv";

/// Everything an analysis run reads from disk.
pub struct LoadedInputs {
    pub table: DesignValueTable,
    pub transitions: TransitionSet,
}

pub fn load_design_table(path: &Path, format: &CsvFormat) -> Result<DesignValueTable> {
    DesignTableFile::read_from_path(path, format).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads the design table and the transition matrix of every pair the
/// analysis needs. A pair without a matching file is left out of the set.
pub fn load_inputs(config: &AppConfig) -> Result<LoadedInputs> {
    let table = load_design_table(&config.designs_path, &config.input_format)?;

    let pairs = match &config.core_config.pairs {
        PairSelection::AllAdjacent => table.adjacent_pairs(),
        PairSelection::Explicit(pairs) => pairs.clone(),
    };
    ensure_distinct_keys(&pairs)?;

    let candidates = collect_matrix_files(&config.transition_paths)?;
    debug!(
        "Found {} candidate transition file(s): {:?}",
        candidates.len(),
        candidates.keys().collect::<Vec<_>>()
    );

    let mut transitions = TransitionSet::new();
    for pair in pairs {
        let key = pair.key();
        let Some(path) = candidates.get(&key) else {
            warn!(
                "No transition matrix found for pair {} (expected '{}').",
                pair,
                TransitionMatrixFile::file_name(&pair)
            );
            continue;
        };
        let graph = load_transition_graph(path, pair, &table, &config.input_format)?;
        transitions.insert(graph)?;
    }

    info!(
        "Loaded {} design(s), {} scenario(s) and {} transition matrix file(s).",
        table.design_count(),
        table.scenarios().len(),
        transitions.len()
    );

    Ok(LoadedInputs { table, transitions })
}

fn load_transition_graph(
    path: &Path,
    pair: ScenarioPair,
    table: &DesignValueTable,
    format: &CsvFormat,
) -> Result<TransitionGraph> {
    debug!("Reading transition matrix for {} from {:?}", pair, path);
    TransitionMatrixFile::read_graph_from_path(path, pair, table.designs(), format).map_err(|e| {
        CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Maps file stems to paths. Directories are scanned one level deep for
/// `.csv` files; explicit files are taken whatever their extension.
fn collect_matrix_files(paths: &[PathBuf]) -> Result<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            entries.sort();
            for entry in entries {
                let is_csv = entry
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(MATRIX_EXTENSION));
                if entry.is_file() && is_csv {
                    register(&mut files, entry);
                }
            }
        } else if path.is_file() {
            register(&mut files, path.clone());
        } else {
            return Err(CliError::Data(format!(
                "Transition path does not exist: {}",
                path.display()
            )));
        }
    }
    Ok(files)
}

fn register(files: &mut BTreeMap<String, PathBuf>, path: PathBuf) {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
        return;
    };
    if let Some(previous) = files.insert(stem.clone(), path) {
        warn!(
            "Multiple transition files named '{}'; ignoring {:?}.",
            stem, previous
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vwfo::core::io::error::TableIoError;
    use vwfo::engine::config::{AnalysisConfigBuilder, DesignSelection};
    use vwfo::engine::error::VwfoError;

    const DESIGNS: &str = "design,scenario,sv\n\
        A,s1,10\nA,s2,12\nA,s3,9\n\
        B,s1,8\nB,s2,15\nB,s3,11\n\
        C,s1,12\nC,s2,11\nC,s3,14\n";

    const S1_S2: &str = "design,A,B,C\nA,1,1,0\nB,0,1,1\nC,1,0,1\n";
    const S2_S3: &str = "design,A,B,C\nA,1,0,1\nB,1,1,0\nC,0,1,1\n";

    fn app_config(root: &Path, pairs: PairSelection) -> AppConfig {
        AppConfig {
            designs_path: root.join("designs.csv"),
            transition_paths: vec![root.to_path_buf()],
            input_format: CsvFormat::default(),
            output_path: root.join("designs_vwfo.csv"),
            output_format: CsvFormat::default(),
            print_results: false,
            core_config: AnalysisConfigBuilder::new()
                .pairs(pairs)
                .designs(DesignSelection::All)
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn loads_every_adjacent_pair_from_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(dir.path().join("s1_s2.csv"), S1_S2).unwrap();
        fs::write(dir.path().join("s2_s3.csv"), S2_S3).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let inputs = load_inputs(&app_config(dir.path(), PairSelection::AllAdjacent)).unwrap();

        assert_eq!(inputs.table.design_count(), 3);
        assert_eq!(inputs.transitions.len(), 2);
        assert!(inputs.transitions.get_by_key("s1_s2").is_some());
        assert!(inputs.transitions.get_by_key("s2_s3").is_some());
    }

    #[test]
    fn missing_matrix_leaves_the_pair_out() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(dir.path().join("s1_s2.csv"), S1_S2).unwrap();

        let inputs = load_inputs(&app_config(dir.path(), PairSelection::AllAdjacent)).unwrap();
        assert_eq!(inputs.transitions.len(), 1);
        assert!(inputs.transitions.get_by_key("s2_s3").is_none());
    }

    #[test]
    fn explicit_pair_only_loads_its_own_matrix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(dir.path().join("s1_s2.csv"), S1_S2).unwrap();
        fs::write(dir.path().join("s1_s3.csv"), S2_S3).unwrap();

        let pairs = PairSelection::Explicit(vec![ScenarioPair::new("s1", "s3")]);
        let inputs = load_inputs(&app_config(dir.path(), pairs)).unwrap();
        assert_eq!(inputs.transitions.len(), 1);
        assert!(inputs.transitions.get_by_key("s1_s3").is_some());
    }

    #[test]
    fn explicit_matrix_file_is_used_as_given() {
        let dir = tempdir().unwrap();
        let matrices = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        let matrix_path = matrices.path().join("s1_s2.csv");
        fs::write(&matrix_path, S1_S2).unwrap();

        let mut config = app_config(dir.path(), PairSelection::AllAdjacent);
        config.transition_paths = vec![matrix_path];
        let inputs = load_inputs(&config).unwrap();
        assert_eq!(inputs.transitions.len(), 1);
    }

    #[test]
    fn mismatched_matrix_reports_the_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(
            dir.path().join("s1_s2.csv"),
            "design,A,B,D\nA,1,1,0\nB,0,1,1\nD,1,0,1\n",
        )
        .unwrap();

        let result = load_inputs(&app_config(dir.path(), PairSelection::AllAdjacent));
        match result {
            Err(CliError::FileParsing { path, source }) => {
                assert!(path.ends_with("s1_s2.csv"));
                assert!(matches!(
                    source,
                    TableIoError::Validation(VwfoError::DesignMismatch { .. })
                ));
            }
            _ => panic!("Expected FileParsing error"),
        }
    }

    #[test]
    fn pairs_sharing_a_file_name_are_rejected() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("designs.csv"),
            "design,scenario,sv\n\
             A,a_b,1\nA,a_b_a,2\nA,b_a,3\n\
             B,a_b,2\nB,a_b_a,1\nB,b_a,0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a_b_a_b_a.csv"),
            "design,A,B\nA,1,1\nB,0,1\n",
        )
        .unwrap();

        let result = load_inputs(&app_config(dir.path(), PairSelection::AllAdjacent));
        assert!(matches!(
            result,
            Err(CliError::Core(VwfoError::AmbiguousTransitionKey { key, .. })) if key == "a_b_a_b_a"
        ));
    }

    #[test]
    fn missing_design_table_is_a_file_error() {
        let dir = tempdir().unwrap();
        let result = load_inputs(&app_config(dir.path(), PairSelection::AllAdjacent));
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn nonexistent_transition_path_is_a_data_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        let mut config = app_config(dir.path(), PairSelection::AllAdjacent);
        config.transition_paths = vec![dir.path().join("absent")];
        assert!(matches!(load_inputs(&config), Err(CliError::Data(_))));
    }
}
