//! The validation pass.
//!
//! One streaming scan over a document: the first record sets the expected
//! field count, every later record is checked against it, and quoting
//! violations stop the scan. All findings come back as [`Diagnostic`]
//! values in detection order; nothing is reported through panics or
//! early returns.

use std::io::{self, Read};

use csvlint_model::Diagnostic;
use csvlint_scan::{RecordScanner, ScanError};

/// Outcome of a validation pass.
#[derive(Debug)]
pub struct Validation {
    /// Findings in detection order.
    pub diagnostics: Vec<Diagnostic>,
    /// True when the scan stopped early at a structural parse error. The
    /// last diagnostic is then that error.
    pub halted: bool,
    /// Stream failure unrelated to document structure (I/O or invalid
    /// UTF-8). Diagnostics collected before the failure are kept.
    pub fatal: Option<io::Error>,
}

impl Validation {
    /// True when the document produced no findings and the stream was
    /// read to the end.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && !self.halted && self.fatal.is_none()
    }
}

/// Check every record of `input` against the field count established by
/// the first record.
///
/// The header record is never diagnosed; an empty document is valid. A
/// field-count mismatch is recorded and the scan continues, so every
/// width violation in the document is reported in one pass. A quoting
/// violation halts the scan: once tokenization fails, later record
/// boundaries cannot be trusted.
pub fn validate<R: Read>(input: R, delimiter: char, lenient_quotes: bool) -> Validation {
    let mut scanner = RecordScanner::new(input, delimiter, lenient_quotes);
    let mut diagnostics = Vec::new();
    let mut expected_width: Option<usize> = None;
    let mut records: u64 = 0;
    // 1-based source line the next record starts on.
    let mut line: u64 = 1;
    loop {
        let record = match scanner.read_record() {
            Ok(Some(record)) => record,
            Ok(None) => break,
            Err(ScanError::Parse { line, column, kind }) => {
                let record_number = if expected_width.is_some() {
                    records + 1
                } else {
                    0
                };
                tracing::debug!(record_number, line, column, "halting at structural parse error");
                diagnostics.push(Diagnostic::structural(record_number, line, column, kind));
                return Validation {
                    diagnostics,
                    halted: true,
                    fatal: None,
                };
            }
            Err(ScanError::Io(error)) => {
                tracing::debug!(%error, "stream failed mid-scan");
                return Validation {
                    diagnostics,
                    halted: false,
                    fatal: Some(error),
                };
            }
        };
        let newlines = embedded_newlines(&record);
        match expected_width {
            None => expected_width = Some(record.len()),
            Some(width) => {
                records += 1;
                if record.len() != width {
                    diagnostics.push(Diagnostic::field_count(record, records, line));
                }
            }
        }
        line += newlines + 1;
    }
    tracing::debug!(
        records,
        diagnostics = diagnostics.len(),
        "scan complete"
    );
    Validation {
        diagnostics,
        halted: false,
        fatal: None,
    }
}

/// Newlines embedded in the record's fields (multi-line quoted values).
/// The record terminator itself is not included.
fn embedded_newlines(record: &[String]) -> u64 {
    record
        .iter()
        .map(|field| field.matches('\n').count() as u64)
        .sum()
}
