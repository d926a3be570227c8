//! Completion through a live session and the bundled grammar.

mod common;

use indoc::indoc;
use serde_json::json;
use tower_lsp::lsp_types::{CompletionItemKind, Position, Range};

use common::{OWL, RDF, edit, edit_range, find, labels, open_session, update};
use sparql_language_server::parsers::GrammarVariant;

#[test]
fn test_variables_rank_first_in_subject_position() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT * WHERE { ?person a ?type . ?p }");
    // right after the partial `?p`
    let items = session.completion(&uri, Position::new(0, 37)).unwrap();

    let person = find(&items, "?person");
    assert_eq!(person.kind, Some(CompletionItemKind::VARIABLE));
    assert_eq!(person.sort_text.as_deref(), Some("1?person"));
    assert_eq!(edit_range(person), Range::new(Position::new(0, 35), Position::new(0, 37)));
    assert_eq!(edit(person).new_text, "?person");
    assert_eq!(find(&items, "?type").sort_text.as_deref(), Some("1?type"));

    // the token being typed is not offered back
    assert!(!labels(&items).contains(&"?p"));
    assert!(labels(&items).contains(&"OPTIONAL"));
    assert!(labels(&items).contains(&"FILTER"));
}

#[test]
fn test_keywords_after_where_clause() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT * WHERE { ?s ?p ?o } LIM");
    let items = session.completion(&uri, Position::new(0, 31)).unwrap();

    let limit = find(&items, "LIMIT");
    assert_eq!(limit.kind, Some(CompletionItemKind::KEYWORD));
    assert_eq!(edit_range(limit), Range::new(Position::new(0, 28), Position::new(0, 31)));
    assert!(labels(&items).contains(&"ORDER"));
    assert!(!labels(&items).contains(&"SELECT"));

    // variables are still offered, without priority
    assert_eq!(find(&items, "?s").sort_text, None);
}

#[test]
fn test_stardog_offers_path_queries() {
    let text = "PREFIX ex: <http://example.org/>\nSEL";
    let (mut session, uri) = open_session(GrammarVariant::Stardog, text);
    let items = session.completion(&uri, Position::new(1, 3)).unwrap();
    assert!(labels(&items).contains(&"SELECT"));
    assert!(labels(&items).contains(&"PATHS"));

    let (mut session, uri) = open_session(GrammarVariant::W3, text);
    let items = session.completion(&uri, Position::new(1, 3)).unwrap();
    assert!(labels(&items).contains(&"SELECT"));
    assert!(!labels(&items).contains(&"PATHS"));
}

#[test]
fn test_prefixes_from_document_and_namespaces() {
    let text = indoc! {"
        PREFIX ex: <http://example.org/>
        SELECT * WHERE { ?s ?p e }
    "};
    let (mut session, uri) = open_session(GrammarVariant::W3, text);
    session.apply_completion_data(update(json!({
        "namespaces": [
            { "prefix": "ex", "name": "http://example.org/" },
            { "prefix": "owl", "name": OWL }
        ]
    })));
    let items = session.completion(&uri, Position::new(1, 24)).unwrap();

    let ex = find(&items, "ex");
    assert_eq!(ex.sort_text.as_deref(), Some("2ex"));
    assert_eq!(edit(ex).new_text, "ex:");
    let owl = find(&items, "owl");
    assert_eq!(edit(owl).new_text, "owl:");
    assert_eq!(labels(&items).iter().filter(|label| **label == "ex").count(), 1);
}

#[test]
fn test_relationships_in_verb_position_only() {
    let mut verb_session = open_session(GrammarVariant::W3, "SELECT * WHERE { ?s rd }");
    let mut object_session = open_session(GrammarVariant::W3, "SELECT * WHERE { ?s ?p rd }");
    let data = json!({
        "namespaces": [{ "prefix": "rdf", "name": RDF }],
        "relationshipBindings": [
            { "relationship": { "value": format!("{}type", RDF) }, "count": { "value": "42" } }
        ]
    });
    verb_session.0.apply_completion_data(update(data.clone()));
    object_session.0.apply_completion_data(update(data));

    let items = verb_session.0.completion(&verb_session.1, Position::new(0, 22)).unwrap();
    let rdf_type = find(&items, "rdf:type");
    assert_eq!(rdf_type.sort_text.as_deref(), Some("00099999999999958rdf:type"));
    assert_eq!(edit_range(rdf_type), Range::new(Position::new(0, 20), Position::new(0, 22)));
    assert_eq!(edit(rdf_type).new_text, "rdf:type");
    assert!(labels(&items).contains(&"<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"));
    // well-known properties of bound vocabularies follow the ranked ones
    assert!(labels(&items).contains(&"rdf:first"));
    assert!(labels(&items).contains(&"a"));

    let items = object_session.0.completion(&object_session.1, Position::new(0, 25)).unwrap();
    assert!(!labels(&items).contains(&"rdf:type"));
}

#[test]
fn test_classes_after_a() {
    let (mut session, uri) = open_session(GrammarVariant::Stardog, "SELECT * WHERE { ?s a ow }");
    session.apply_completion_data(update(json!({
        "namespaces": [{ "prefix": "owl", "name": OWL }],
        "typeBindings": [
            { "type": { "value": "http://example.org/Person" }, "count": { "value": "12" } },
            null
        ]
    })));
    let items = session.completion(&uri, Position::new(0, 24)).unwrap();

    let person = find(&items, "<http://example.org/Person>");
    assert_eq!(person.detail.as_deref(), Some("12 occurrences"));
    assert_eq!(edit_range(person), Range::new(Position::new(0, 22), Position::new(0, 24)));
    let thing = find(&items, "owl:Thing");
    assert_eq!(thing.kind, Some(CompletionItemKind::CLASS));
}

#[test]
fn test_no_classes_without_a() {
    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT * WHERE { ?s ?p ow }");
    session.apply_completion_data(update(json!({
        "typeBindings": [
            { "type": { "value": "http://example.org/Person" }, "count": { "value": "12" } }
        ]
    })));
    let items = session.completion(&uri, Position::new(0, 25)).unwrap();
    assert!(!labels(&items).contains(&"<http://example.org/Person>"));
}

#[test]
fn test_ontology_labels_on_local_names() {
    let text = indoc! {"
        PREFIX bfo: <http://purl.obolibrary.org/obo/>
        SELECT * WHERE {
          ?process bfo:BFO_0000055 ?role .
          ?role ?p b
        }
    "};
    let (mut session, uri) = open_session(GrammarVariant::W3, text);
    let items = session.completion(&uri, Position::new(3, 12)).unwrap();

    let realizes = find(&items, "bfo:BFO_0000055 (realizes)");
    assert_eq!(edit(realizes).new_text, "bfo:BFO_0000055");
    // object position expects prefixed names
    assert_eq!(realizes.sort_text.as_deref(), Some("2bfo:BFO_0000055"));
}

#[test]
fn test_empty_document_has_no_completions() {
    let (mut session, uri) = open_session(GrammarVariant::Stardog, "");
    assert!(session.completion(&uri, Position::new(0, 0)).unwrap().is_empty());
}

#[test]
fn test_completion_follows_latest_change() {
    use tower_lsp::lsp_types::TextDocumentContentChangeEvent;

    let (mut session, uri) = open_session(GrammarVariant::W3, "SELECT * WHERE { ?a ?b ?c }");
    session
        .change_document(
            &uri,
            2,
            vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "SELECT * WHERE { ?x ?y ?z . ?w }".to_string(),
            }],
        )
        .unwrap();
    let items = session.completion(&uri, Position::new(0, 30)).unwrap();
    assert!(labels(&items).contains(&"?x"));
    assert!(!labels(&items).contains(&"?a"));
}

#[test]
fn test_columns_after_wide_characters_are_utf16() {
    // the emoji takes two UTF-16 code units, so `?su` ends at column 40
    let text = "SELECT * { ?s ?p \"😀\" . ?sub ?q ?o . ?su }";
    let (mut session, uri) = open_session(GrammarVariant::W3, text);
    let items = session.completion(&uri, Position::new(0, 40)).unwrap();

    assert!(!labels(&items).contains(&"?su"));
    let sub = find(&items, "?sub");
    assert_eq!(edit_range(sub), Range::new(Position::new(0, 37), Position::new(0, 40)));
    assert_eq!(edit(sub).new_text, "?sub");
}

#[test]
fn test_relationships_inside_property_paths() {
    let data = json!({
        "namespaces": [{ "prefix": "rdf", "name": RDF }],
        "relationshipBindings": [
            { "relationship": { "value": format!("{}type", RDF) }, "count": { "value": "42" } }
        ]
    });
    let cases = [
        ("SELECT * WHERE { ?s (rd }", 23),
        ("SELECT * WHERE { ?s !(rd }", 24),
        ("SELECT * WHERE { ?s !rd }", 23),
        ("SELECT * WHERE { ?s rdfs:label/(rd }", 34),
    ];
    for (text, column) in cases {
        let (mut session, uri) = open_session(GrammarVariant::W3, text);
        session.apply_completion_data(update(data.clone()));
        let items = session.completion(&uri, Position::new(0, column)).unwrap();
        let rdf_type = find(&items, "rdf:type");
        assert_eq!(
            edit_range(rdf_type),
            Range::new(Position::new(0, column - 2), Position::new(0, column)),
            "in {:?}",
            text
        );
    }
}
