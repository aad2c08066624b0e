use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a record failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The record's field count differs from the header's.
    #[error("wrong number of fields")]
    FieldCount,
    /// A quote character appeared inside an unquoted field.
    #[error("bare \" in non-quoted field")]
    BareQuote,
    /// Data followed the closing quote of a quoted field.
    #[error("extraneous \" in quoted field")]
    ExtraneousQuote,
    /// The stream ended inside a quoted field.
    #[error("unterminated quoted field")]
    UnterminatedQuote,
}

impl ErrorKind {
    /// True for quoting violations. Structural errors carry a column position
    /// and stop the scan; field-count mismatches do neither.
    pub fn is_structural(self) -> bool {
        !matches!(self, ErrorKind::FieldCount)
    }
}

/// One finding against a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Fields of the offending record. None when no record could be parsed.
    pub record: Option<Vec<String>>,
    /// 1-based ordinal among data records; the header is not counted.
    /// Zero when the header itself failed to parse.
    pub record_number: u64,
    /// 1-based source line the error occurs on.
    pub line: u64,
    /// 0-based character column of the offending position.
    pub column: Option<u64>,
    pub kind: ErrorKind,
}

impl Diagnostic {
    /// A record that parsed but does not match the header's field count.
    pub fn field_count(record: Vec<String>, record_number: u64, line: u64) -> Self {
        Self {
            record: Some(record),
            record_number,
            line,
            column: None,
            kind: ErrorKind::FieldCount,
        }
    }

    /// A quoting violation at a known position; no record was produced.
    pub fn structural(record_number: u64, line: u64, column: u64, kind: ErrorKind) -> Self {
        debug_assert!(kind.is_structural());
        Self {
            record: None,
            record_number,
            line,
            column: Some(column),
            kind,
        }
    }
}

/// Render a diagnostic as its single-line report form.
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut message = format!(
        "Record #{} has error: {} on line {}",
        diagnostic.record_number, diagnostic.kind, diagnostic.line
    );
    if let Some(column) = diagnostic.column {
        message.push_str(&format!(", column {column}"));
    }
    message
}
