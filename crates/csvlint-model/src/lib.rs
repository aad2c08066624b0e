pub mod diagnostic;

pub use diagnostic::{Diagnostic, ErrorKind, render_diagnostic};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_diagnostic_renders_without_column() {
        let diagnostic = Diagnostic::field_count(
            vec!["d".to_string(), "e".to_string(), "f".to_string()],
            2,
            3,
        );
        assert_eq!(
            render_diagnostic(&diagnostic),
            "Record #2 has error: wrong number of fields on line 3"
        );
    }

    #[test]
    fn structural_diagnostic_renders_with_column() {
        let diagnostic = Diagnostic::structural(1, 2, 0, ErrorKind::UnterminatedQuote);
        assert_eq!(
            render_diagnostic(&diagnostic),
            "Record #1 has error: unterminated quoted field on line 2, column 0"
        );
    }

    #[test]
    fn diagnostic_serializes() {
        let diagnostic = Diagnostic::structural(1, 2, 14, ErrorKind::BareQuote);
        let json = serde_json::to_string(&diagnostic).expect("serialize diagnostic");
        let round: Diagnostic = serde_json::from_str(&json).expect("deserialize diagnostic");
        assert_eq!(round, diagnostic);
        assert!(json.contains("\"bare_quote\""));
    }
}
