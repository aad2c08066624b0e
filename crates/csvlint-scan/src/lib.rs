//! Streaming record scanner for delimited text.
//!
//! Turns a byte stream into records (vectors of field strings) under
//! RFC 4180-style quoting: a field starting with `"` may contain the
//! delimiter, embedded newlines, and doubled quotes. The scanner tracks
//! line and column positions so quoting violations can be reported
//! precisely, and never checks record widths; that is the caller's job.

pub mod scanner;

pub use scanner::{RecordScanner, ScanError};
