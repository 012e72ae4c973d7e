use crate::cli::AnalyzeArgs;
use crate::config::{AppConfig, build_config};
use crate::data::{self, LoadedInputs};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::fs;
use tracing::{info, warn};
use vwfo::core::io::report::VwfoReportFile;
use vwfo::engine::progress::ProgressReporter;
use vwfo::workflows::{self, analyze::AnalysisResult};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    info!("Loading design table from {:?}", &config.designs_path);
    let LoadedInputs { table, transitions } = data::load_inputs(&config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Computing VWFO for {} design(s) across {} scenario(s)...",
        table.design_count(),
        table.scenarios().len()
    );
    info!("Invoking the core analysis workflow...");
    let result = workflows::analyze::run(&table, &transitions, &config.core_config, &reporter)?;

    write_report(&result, &config)?;
    print_summary(&result, &config);

    Ok(())
}

fn write_report(result: &AnalysisResult, config: &AppConfig) -> Result<()> {
    if let Some(parent) = config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let rows = VwfoReportFile::write_to_path(
        result.batches(),
        &config.output_path,
        &config.output_format,
    )
    .map_err(|e| CliError::FileParsing {
        path: config.output_path.clone(),
        source: e,
    })?;
    info!("Wrote {} row(s) to {:?}", rows, &config.output_path);
    Ok(())
}

fn print_summary(result: &AnalysisResult, config: &AppConfig) {
    if config.print_results {
        for report in &result.pairs {
            for entry in report.batch.entries() {
                match &entry.value {
                    Ok(value) => println!(
                        "VWFO of design {} ({}): {}",
                        entry.design, report.pair, value
                    ),
                    Err(e) => println!(
                        "VWFO of design {} ({}): not available ({})",
                        entry.design, report.pair, e
                    ),
                }
            }
        }
    }

    let failures = result.failure_count();
    if failures > 0 {
        warn!("{} design value(s) could not be computed.", failures);
        println!(
            "Warning: {} design value(s) could not be computed; see the `error` column.",
            failures
        );
    }
    println!(
        "✓ VWFO for {} scenario pair(s) written to: {}",
        result.pairs.len(),
        config.output_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const DESIGNS: &str = "design,scenario,sv\n\
        A,s1,10\nA,s2,12\n\
        B,s1,8\nB,s2,15\n\
        C,s1,12\nC,s2,11\n";
    const S1_S2: &str = "design,A,B,C\nA,1,1,0\nB,0,1,1\nC,1,0,1\n";

    #[test]
    fn writes_the_report_next_to_the_design_table() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(dir.path().join("s1_s2.csv"), S1_S2).unwrap();

        let args = AnalyzeArgs {
            designs: Some(dir.path().join("designs.csv")),
            ..Default::default()
        };
        run(args).unwrap();

        let report = fs::read_to_string(dir.path().join("designs_vwfo.csv")).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines[0],
            "design,current_scenario,following_scenario,vwfo,error"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "A,s1,s2,1.0,");
        assert_eq!(lines[2], "B,s1,s2,1.0,");
        assert_eq!(lines[3], "C,s1,s2,-0.5,");
    }

    #[test]
    fn creates_missing_output_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();
        fs::write(dir.path().join("s1_s2.csv"), S1_S2).unwrap();
        let output: PathBuf = dir.path().join("out/nested/result.csv");

        let args = AnalyzeArgs {
            designs: Some(dir.path().join("designs.csv")),
            output: Some(output.clone()),
            selected_designs: vec!["B".to_string()],
            ..Default::default()
        };
        run(args).unwrap();

        let report = fs::read_to_string(output).unwrap();
        assert_eq!(report.lines().count(), 2);
        assert!(report.contains("B,s1,s2,1.0,"));
    }

    #[test]
    fn missing_transition_matrix_aborts_the_run() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("designs.csv"), DESIGNS).unwrap();

        let args = AnalyzeArgs {
            designs: Some(dir.path().join("designs.csv")),
            ..Default::default()
        };
        assert!(matches!(run(args), Err(CliError::Core(_))));
        assert!(!dir.path().join("designs_vwfo.csv").exists());
    }
}
