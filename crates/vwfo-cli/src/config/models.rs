use std::path::PathBuf;
use vwfo::core::io::traits::CsvFormat;
use vwfo::engine::config::AnalysisConfig;

/// Fully merged settings for one `analyze` run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub designs_path: PathBuf,
    pub transition_paths: Vec<PathBuf>,
    pub input_format: CsvFormat,
    pub output_path: PathBuf,
    pub output_format: CsvFormat,
    pub print_results: bool,
    pub core_config: AnalysisConfig,
}
