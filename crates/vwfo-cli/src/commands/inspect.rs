use crate::cli::InspectArgs;
use crate::data;
use crate::error::{CliError, Result};
use crate::utils::parser;
use tracing::info;
use vwfo::core::io::traits::CsvFormat;
use vwfo::core::io::transitions::TransitionMatrixFile;
use vwfo::core::models::table::DesignValueTable;

pub fn run(args: InspectArgs) -> Result<()> {
    let format = match args.delimiter.as_deref() {
        Some(text) => CsvFormat::with_delimiter(
            parser::parse_delimiter(text).map_err(|e| CliError::Argument(e.to_string()))?,
        ),
        None => CsvFormat::default(),
    };

    info!("Loading design table from {:?}", &args.designs);
    let table = data::load_design_table(&args.designs, &format)?;
    print!("{}", render_overview(&table));
    Ok(())
}

fn render_overview(table: &DesignValueTable) -> String {
    let designs: Vec<&str> = table.designs().iter().map(|d| d.as_str()).collect();
    let scenarios: Vec<&str> = table.scenarios().iter().map(|s| s.as_str()).collect();

    let mut out = String::new();
    out.push_str(&format!(
        "Designs ({}): {}\n",
        designs.len(),
        designs.join(", ")
    ));
    out.push_str(&format!(
        "Scenarios ({}): {}\n",
        scenarios.len(),
        scenarios.join(", ")
    ));

    let pairs = table.adjacent_pairs();
    if pairs.is_empty() {
        out.push_str("No scenario transitions: at least two scenarios are required.\n");
    } else {
        out.push_str("Expected transition matrices:\n");
        for pair in &pairs {
            out.push_str(&format!(
                "  {} -> {}\n",
                pair,
                TransitionMatrixFile::file_name(pair)
            ));
        }
    }
    out
}
