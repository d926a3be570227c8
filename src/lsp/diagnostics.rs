//! Parse errors as LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Range};

use crate::lsp::document::LspDocument;
use crate::parsers::ParseError;

pub const DIAGNOSTIC_SOURCE: &str = "sparql-parser";

/// Errors anchored at a token cover that token; unanchored errors sit at the end of the document.
pub fn parse_diagnostics(document: &LspDocument, errors: &[ParseError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            let range = match &error.token {
                Some(token) => Range::new(
                    document.position_at(token.start_offset),
                    document.position_at(token.end_exclusive()),
                ),
                None => {
                    let end = document.position_at(document.text.len_chars());
                    Range::new(end, end)
                }
            };
            Diagnostic {
                range,
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some(DIAGNOSTIC_SOURCE.to_string()),
                message: error.message.clone(),
                ..Default::default()
            }
        })
        .collect()
}
