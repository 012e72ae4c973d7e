use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid separator '{0}'. Expected a single ASCII character or one of 'comma', 'semicolon', 'tab', 'pipe'."
    )]
    InvalidDelimiter(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses a CSV separator given on the command line or in a config file.
pub fn parse_delimiter(text: &str) -> Result<u8, ParseError> {
    match text.to_ascii_lowercase().as_str() {
        "comma" => return Ok(b','),
        "semicolon" => return Ok(b';'),
        "tab" | "\\t" => return Ok(b'\t'),
        "pipe" => return Ok(b'|'),
        "space" => return Ok(b' '),
        _ => {}
    }
    match text.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => Ok(*byte),
        _ => Err(ParseError::InvalidDelimiter(text.to_string())),
    }
}

/// Splits a `KEY=VALUE` override at the first `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}
