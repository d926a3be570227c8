//! `$/didUpdateCompletionData` payloads applied to a session.

mod common;

use serde_json::json;

use common::{RDF, labels, open_session, update};
use sparql_language_server::lsp::features::completion::data::CompletionDataStore;
use sparql_language_server::parsers::GrammarVariant;

fn rdf_type_binding(count: &str) -> serde_json::Value {
    json!({ "relationship": { "value": format!("{}type", RDF) }, "count": { "value": count } })
}

#[test]
fn test_rdf_type_yields_prefixed_then_full_item() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({
        "namespaces": [{ "prefix": "rdf", "name": RDF }],
        "relationshipBindings": [rdf_type_binding("42")]
    })));

    let items = store.relationship_items();
    assert_eq!(labels(items), vec!["rdf:type", "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"]);
    assert_eq!(items[0].sort_text.as_deref(), Some("00099999999999958rdf:type"));
    assert_eq!(
        items[1].sort_text.as_deref(),
        Some("01099999999999958http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    );
    assert!(items.iter().all(|item| item.detail.as_deref() == Some("42 occurrences")));
}

#[test]
fn test_namespaces_arriving_after_bindings() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({ "relationshipBindings": [rdf_type_binding("42")] })));
    assert_eq!(labels(store.relationship_items()), vec!["<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"]);

    store.apply_update(update(json!({ "namespaces": [{ "prefix": "rdf", "name": RDF }] })));
    assert_eq!(
        labels(store.relationship_items()),
        vec!["rdf:type", "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"]
    );
}

#[test]
fn test_namespace_update_without_bindings_builds_nothing() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({ "namespaces": [{ "prefix": "rdf", "name": RDF }] })));
    assert!(store.relationship_items().is_empty());
    assert!(store.type_items().is_empty());
    assert_eq!(store.namespaces().len(), 1);
}

#[test]
fn test_explicit_empty_list_is_not_recomputed_on_namespace_update() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({ "typeBindings": [] })));
    store.apply_update(update(json!({ "namespaces": [{ "prefix": "rdf", "name": RDF }] })));
    assert!(store.type_items().is_empty());
}

#[test]
fn test_malformed_bindings_are_skipped() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({
        "typeBindings": [
            null,
            { "type": { "value": "http://example.org/NoCount" } },
            { "count": { "value": "3" } },
            { "type": {}, "count": { "value": "3" } },
            { "type": { "value": "http://example.org/Kept" }, "count": { "value": 9 } }
        ]
    })));
    assert_eq!(labels(store.type_items()), vec!["<http://example.org/Kept>"]);
    assert_eq!(store.type_items()[0].detail.as_deref(), Some("9 occurrences"));
}

#[test]
fn test_replacing_bindings_replaces_items() {
    let mut store = CompletionDataStore::new();
    store.apply_update(update(json!({
        "typeBindings": [{ "type": { "value": "http://example.org/Old" }, "count": { "value": "1" } }]
    })));
    store.apply_update(update(json!({
        "typeBindings": [{ "type": { "value": "http://example.org/New" }, "count": { "value": "1" } }]
    })));
    assert_eq!(labels(store.type_items()), vec!["<http://example.org/New>"]);
}

#[test]
fn test_updates_reach_open_documents() {
    let (mut session, uri) = open_session(GrammarVariant::Stardog, "SELECT * WHERE { ?s ?p ?o . ?s ex }");
    session.apply_completion_data(update(json!({
        "namespaces": [{ "prefix": "ex", "name": "http://example.org/" }],
        "relationshipBindings": [
            { "relationship": { "value": "http://example.org/knows" }, "count": { "value": "7" } },
            { "relationship": { "value": "http://example.org/likes" }, "count": { "value": "70" } }
        ]
    })));
    let items = session
        .completion(&uri, tower_lsp::lsp_types::Position::new(0, 33))
        .unwrap();
    let ranked: Vec<&str> = labels(&items)
        .into_iter()
        .filter(|label| label.starts_with("ex:"))
        .collect();
    assert_eq!(ranked, vec!["ex:likes", "ex:knows"]);
    assert_eq!(session.completion_data().relationship_items().len(), 4);
}
