use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Unsupported structure file extension: '{0}'")]
    UnsupportedExtension(String),
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for {record} record (must be at least {min} chars)")]
    LineTooShort { record: &'static str, min: usize },
    #[error("Malformed counts line")]
    InvalidCountsLine,
    #[error("Unexpected end of file inside {0}")]
    UnexpectedEof(&'static str),
}

pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

pub(crate) fn parse_int_field<T: std::str::FromStr>(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
) -> Result<T, FormatError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| FormatError::Parse {
        line: line_num,
        kind: ParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

pub(crate) fn parse_float_field(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
) -> Result<f64, FormatError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| FormatError::Parse {
        line: line_num,
        kind: ParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}
