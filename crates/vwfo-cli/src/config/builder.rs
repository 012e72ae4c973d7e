use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::{Path, PathBuf};
use tracing::debug;
use vwfo::core::io::traits::CsvFormat;
use vwfo::core::models::ids::{DesignId, ScenarioPair};
use vwfo::engine::config as core_config;

pub fn build_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input_file = file_config.input.take().unwrap_or_default();
    let analysis_file = file_config.analysis.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let designs_path = args
        .designs
        .clone()
        .or(input_file.designs)
        .ok_or_else(|| {
            CliError::Config(
                "No design table given. Use --designs or set `designs` under [input].".to_string(),
            )
        })?;

    let transition_paths = if !args.transitions.is_empty() {
        args.transitions.clone()
    } else if let Some(paths) = input_file.transitions.filter(|p| !p.is_empty()) {
        paths
    } else {
        vec![parent_dir(&designs_path)]
    };

    let input_delimiter = resolve_delimiter(
        args.input_delimiter.as_deref(),
        input_file.delimiter.as_deref(),
        defaults.input_delimiter,
    )?;
    let output_delimiter = resolve_delimiter(
        args.output_delimiter.as_deref(),
        output_file.delimiter.as_deref(),
        defaults.output_delimiter,
    )?;

    let output_path = args
        .output
        .clone()
        .or(output_file.path)
        .unwrap_or_else(|| parent_dir(&designs_path).join(&defaults.output_file_name));

    let pairs = resolve_pair_selection(
        args.current.as_deref().or(analysis_file.current_scenario.as_deref()),
        args.following
            .as_deref()
            .or(analysis_file.following_scenario.as_deref()),
    )?;

    let selected: Vec<String> = if !args.selected_designs.is_empty() {
        args.selected_designs.clone()
    } else {
        analysis_file.designs.unwrap_or_default()
    };
    let designs = if selected.is_empty() {
        core_config::DesignSelection::All
    } else {
        core_config::DesignSelection::List(selected.into_iter().map(DesignId::from).collect())
    };

    let core_config = core_config::AnalysisConfigBuilder::new()
        .pairs(pairs)
        .designs(designs)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!(?core_config, "Analysis configuration resolved.");

    Ok(AppConfig {
        designs_path,
        transition_paths,
        input_format: CsvFormat::with_delimiter(input_delimiter),
        output_path,
        output_format: CsvFormat::with_delimiter(output_delimiter),
        print_results: args.print,
        core_config,
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve_delimiter(cli_arg: Option<&str>, file_arg: Option<&str>, default: u8) -> Result<u8> {
    match cli_arg.or(file_arg) {
        Some(text) => parser::parse_delimiter(text).map_err(|e| CliError::Argument(e.to_string())),
        None => Ok(default),
    }
}

fn resolve_pair_selection(
    current: Option<&str>,
    following: Option<&str>,
) -> Result<core_config::PairSelection> {
    match (current, following) {
        (Some(current), Some(following)) => Ok(core_config::PairSelection::Explicit(vec![
            ScenarioPair::new(current, following),
        ])),
        (None, None) => Ok(core_config::PairSelection::AllAdjacent),
        (Some(_), None) => Err(CliError::Config(
            "A current scenario was given without a following scenario.".to_string(),
        )),
        (None, Some(_)) => Err(CliError::Config(
            "A following scenario was given without a current scenario.".to_string(),
        )),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        // Delimiters may be whitespace themselves, so only they keep the raw value.
        let trimmed = value.trim().to_string();

        match key {
            "input.designs" => {
                config.input.get_or_insert_with(Default::default).designs = Some(trimmed.into());
            }
            "input.delimiter" => {
                config.input.get_or_insert_with(Default::default).delimiter = Some(value.to_string());
            }
            "output.path" => {
                config.output.get_or_insert_with(Default::default).path = Some(trimmed.into());
            }
            "output.delimiter" => {
                config.output.get_or_insert_with(Default::default).delimiter = Some(value.to_string());
            }
            "analysis.current-scenario" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .current_scenario = Some(trimmed);
            }
            "analysis.following-scenario" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .following_scenario = Some(trimmed);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use vwfo::engine::config::{DesignSelection, PairSelection};

    fn base_args() -> AnalyzeArgs {
        AnalyzeArgs {
            designs: Some(PathBuf::from("data/designs.csv")),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_fill_everything_but_the_design_table() {
        let app = build_config(&base_args()).unwrap();

        assert_eq!(app.designs_path, PathBuf::from("data/designs.csv"));
        assert_eq!(app.transition_paths, vec![PathBuf::from("data")]);
        assert_eq!(app.output_path, PathBuf::from("data/designs_vwfo.csv"));
        assert_eq!(app.input_format.delimiter, b',');
        assert_eq!(app.output_format.delimiter, b',');
        assert_eq!(app.core_config.pairs, PairSelection::AllAdjacent);
        assert_eq!(app.core_config.designs, DesignSelection::All);
        assert!(!app.print_results);
    }

    #[test]
    fn bare_file_name_uses_the_working_directory() {
        let args = AnalyzeArgs {
            designs: Some(PathBuf::from("designs.csv")),
            ..Default::default()
        };
        let app = build_config(&args).unwrap();
        assert_eq!(app.transition_paths, vec![PathBuf::from(".")]);
        assert_eq!(app.output_path, PathBuf::from("./designs_vwfo.csv"));
    }

    #[test]
    fn missing_design_table_is_a_config_error() {
        let result = build_config(&AnalyzeArgs::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn file_values_are_overridden_by_set_and_flags() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("vwfo.toml");
        fs::write(
            &cfg_path,
            r#"
            [input]
            designs = "from_file/designs.csv"
            transitions = ["from_file/matrices"]
            delimiter = ";"

            [analysis]
            current-scenario = "s1"
            following-scenario = "s2"
            designs = ["A"]

            [output]
            path = "from_file/out.csv"
            delimiter = ";"
            "#,
        )
        .unwrap();

        let args = AnalyzeArgs {
            config: Some(cfg_path),
            output_delimiter: Some("tab".to_string()),
            set_values: vec![
                "analysis.following-scenario=s3".to_string(),
                "input.delimiter=|".to_string(),
            ],
            ..Default::default()
        };
        let app = build_config(&args).unwrap();

        assert_eq!(app.designs_path, PathBuf::from("from_file/designs.csv"));
        assert_eq!(app.transition_paths, vec![PathBuf::from("from_file/matrices")]);
        assert_eq!(app.output_path, PathBuf::from("from_file/out.csv"));
        assert_eq!(app.input_format.delimiter, b'|');
        assert_eq!(app.output_format.delimiter, b'\t');
        assert_eq!(
            app.core_config.pairs,
            PairSelection::Explicit(vec![ScenarioPair::new("s1", "s3")])
        );
        assert_eq!(
            app.core_config.designs,
            DesignSelection::List(vec![DesignId::from("A")])
        );
    }

    #[test]
    fn cli_pair_and_designs_take_precedence() {
        let args = AnalyzeArgs {
            current: Some("s2".to_string()),
            following: Some("s3".to_string()),
            selected_designs: vec!["B".to_string(), "C".to_string()],
            print: true,
            ..base_args()
        };
        let app = build_config(&args).unwrap();
        assert_eq!(
            app.core_config.pairs,
            PairSelection::Explicit(vec![ScenarioPair::new("s2", "s3")])
        );
        assert_eq!(
            app.core_config.designs,
            DesignSelection::List(vec![DesignId::from("B"), DesignId::from("C")])
        );
        assert!(app.print_results);
    }

    #[test]
    fn half_a_scenario_pair_is_rejected() {
        let args = AnalyzeArgs {
            set_values: vec!["analysis.current-scenario=s1".to_string()],
            ..base_args()
        };
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        let malformed = AnalyzeArgs {
            set_values: vec!["output.delimiter".to_string()],
            ..base_args()
        };
        assert!(matches!(build_config(&malformed), Err(CliError::Config(_))));

        let unknown = AnalyzeArgs {
            set_values: vec!["output.encoding=utf-8".to_string()],
            ..base_args()
        };
        assert!(matches!(build_config(&unknown), Err(CliError::Config(_))));
    }

    #[test]
    fn whitespace_delimiters_survive_set_overrides() {
        let args = AnalyzeArgs {
            set_values: vec![
                "output.delimiter=\t".to_string(),
                "input.delimiter= ".to_string(),
                "analysis.current-scenario= s1 ".to_string(),
                "analysis.following-scenario=s2".to_string(),
            ],
            ..base_args()
        };
        let app = build_config(&args).unwrap();
        assert_eq!(app.output_format.delimiter, b'\t');
        assert_eq!(app.input_format.delimiter, b' ');
        assert_eq!(
            app.core_config.pairs,
            PairSelection::Explicit(vec![ScenarioPair::new("s1", "s2")])
        );
    }

    #[test]
    fn invalid_delimiter_is_an_argument_error() {
        let args = AnalyzeArgs {
            input_delimiter: Some("ab".to_string()),
            ..base_args()
        };
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }
}
