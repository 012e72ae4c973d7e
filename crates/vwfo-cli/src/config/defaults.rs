use vwfo::core::io::report::DEFAULT_REPORT_FILE_NAME;

pub struct DefaultsConfig {
    pub input_delimiter: u8,
    pub output_delimiter: u8,
    pub output_file_name: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_delimiter: b',',
            output_delimiter: b',',
            output_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
        }
    }
}
