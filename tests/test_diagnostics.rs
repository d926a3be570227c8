mod common;

use indoc::indoc;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range, TextDocumentContentChangeEvent};

use common::open_session;
use sparql_language_server::lsp::diagnostics::DIAGNOSTIC_SOURCE;
use sparql_language_server::lsp::session::{Session, SessionError};
use sparql_language_server::parsers::GrammarVariant;

fn snapshot(text: &str) -> Vec<TextDocumentContentChangeEvent> {
    vec![TextDocumentContentChangeEvent {
        range: None,
        range_length: None,
        text: text.to_string(),
    }]
}

fn with_message<'a>(diagnostics: &'a [Diagnostic], message: &str) -> &'a Diagnostic {
    diagnostics
        .iter()
        .find(|d| d.message == message)
        .unwrap_or_else(|| panic!("no diagnostic {:?} in {:?}", message, diagnostics))
}

#[test]
fn test_open_reports_unclosed_group() {
    let mut session = Session::with_grammar(GrammarVariant::W3);
    let uri = common::query_uri("broken.rq");
    let diagnostics = session.open_document(uri, 1, "SELECT ?s WHERE { ?s ?p ?o");

    let unclosed = with_message(&diagnostics, "unclosed '{'");
    assert_eq!(unclosed.range, Range::new(Position::new(0, 16), Position::new(0, 17)));
    assert_eq!(unclosed.severity, Some(DiagnosticSeverity::ERROR));
    assert_eq!(unclosed.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
}

#[test]
fn test_fixing_the_query_clears_diagnostics() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT ?s WHERE { ?s ?p ?o");
    let diagnostics = session
        .change_document(&uri, 2, snapshot("SELECT ?s WHERE { ?s ?p ?o }"))
        .unwrap();
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);
}

#[test]
fn test_emptying_the_document_clears_diagnostics() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT {");
    assert!(session.change_document(&uri, 2, snapshot("")).unwrap().is_empty());
}

#[test]
fn test_incomplete_triple_on_later_line() {
    let text = indoc! {"
        SELECT * WHERE {
          ?s
        }
    "};
    let (mut session, uri) = open_session(GrammarVariant::W3, "");
    let diagnostics = session.change_document(&uri, 2, snapshot(text)).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "incomplete triple pattern: expected a predicate");
    assert_eq!(diagnostics[0].range, Range::new(Position::new(2, 0), Position::new(2, 1)));
}

#[test]
fn test_unknown_character_is_reported() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "");
    let diagnostics = session
        .change_document(&uri, 2, snapshot("SELECT * WHERE { ?s ?p ?o } %"))
        .unwrap();
    let unknown = with_message(&diagnostics, "unexpected character '%'");
    assert_eq!(unknown.range, Range::new(Position::new(0, 28), Position::new(0, 29)));
}

#[test]
fn test_stardog_keywords_are_errors_in_w3() {
    let text = "PATHS START ?x END ?y VIA ?p";
    let (mut stardog, uri) = open_session(GrammarVariant::Stardog, "");
    assert!(stardog.change_document(&uri, 2, snapshot(text)).unwrap().is_empty());

    let (mut w3, uri) = open_session(GrammarVariant::W3, "");
    assert!(!w3.change_document(&uri, 2, snapshot(text)).unwrap().is_empty());
}

#[test]
fn test_change_to_unopened_document_fails() {
    let mut session = Session::with_grammar(GrammarVariant::W3);
    let result = session.change_document(&common::query_uri("missing.rq"), 1, snapshot("ASK {}"));
    assert!(matches!(result, Err(SessionError::UnknownDocument(_))));
}
