//! Shared helpers for the integration tests.
#![allow(dead_code)]

use serde_json::Value;
use tower_lsp::lsp_types::{CompletionItem, CompletionTextEdit, Range, TextEdit, Url};

use sparql_language_server::lsp::models::CompletionDataUpdate;
use sparql_language_server::lsp::session::Session;
use sparql_language_server::parsers::GrammarVariant;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";

pub fn query_uri(name: &str) -> Url {
    Url::parse(&format!("file:///workspace/{}", name)).expect("valid test uri")
}

/// A session with one open document, `query.rq`.
pub fn open_session(variant: GrammarVariant, text: &str) -> (Session, Url) {
    let mut session = Session::with_grammar(variant);
    let uri = query_uri("query.rq");
    session.open_document(uri.clone(), 1, text);
    (session, uri)
}

/// Parses a notification payload the way the server receives it.
pub fn update(payload: Value) -> CompletionDataUpdate {
    serde_json::from_value(payload).expect("valid completion data payload")
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_str()).collect()
}

pub fn find<'a>(items: &'a [CompletionItem], label: &str) -> &'a CompletionItem {
    items
        .iter()
        .find(|item| item.label == label)
        .unwrap_or_else(|| panic!("no completion item labelled {:?} in {:?}", label, labels(items)))
}

pub fn edit(item: &CompletionItem) -> &TextEdit {
    match &item.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => edit,
        other => panic!("expected a plain text edit, got {:?}", other),
    }
}

pub fn edit_range(item: &CompletionItem) -> Range {
    edit(item).range
}
