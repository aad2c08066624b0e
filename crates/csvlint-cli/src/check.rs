//! Glue between the filesystem and the validation pass.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info_span;

use csvlint_validate::{Validation, validate};

/// Resolve a delimiter argument: a single character or a named one.
pub fn parse_delimiter(raw: &str) -> Result<char> {
    let delimiter = match raw {
        "comma" => ',',
        "tab" | "\\t" => '\t',
        "semicolon" => ';',
        "pipe" => '|',
        "colon" => ':',
        "space" => ' ',
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(first), None) => first,
                _ => bail!("delimiter must be a single character or a known name, got {other:?}"),
            }
        }
    };
    if delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        bail!("delimiter may not be a quote or newline character");
    }
    Ok(delimiter)
}

/// Validate a file path, with "-" meaning standard input.
pub fn check_path(path: &Path, delimiter: char, lazy_quotes: bool) -> Result<Validation> {
    let span = info_span!("check", source = %path.display());
    let _guard = span.enter();
    if path.as_os_str() == "-" {
        return Ok(validate(io::stdin().lock(), delimiter, lazy_quotes));
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(validate(BufReader::new(file), delimiter, lazy_quotes))
}

/// Display name for the report.
pub fn source_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Process exit code: 0 clean, 1 findings, 2 stream failure.
pub fn exit_code(validation: &Validation) -> i32 {
    if validation.fatal.is_some() {
        2
    } else if validation.is_clean() {
        0
    } else {
        1
    }
}
