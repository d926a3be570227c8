//! Handler-level tests against the tower-lsp backend.

mod common;

use serde_json::json;
use tower_lsp::LanguageServer;
use tower_lsp::LspService;
use tower_lsp::lsp_types::{
    CompletionParams, CompletionResponse, HoverParams, InitializeParams, PartialResultParams, Position,
    TextDocumentIdentifier, TextDocumentPositionParams, TextDocumentSyncCapability, TextDocumentSyncKind,
    WorkDoneProgressParams,
};

use common::{RDF, update};
use sparql_language_server::lsp::backend::SparqlBackend;
use sparql_language_server::parsers::GrammarVariant;

fn service(default_grammar: GrammarVariant) -> LspService<SparqlBackend> {
    let (service, _socket) = LspService::new(move |client| SparqlBackend::new(client, default_grammar));
    service
}

fn initialize_with(options: Option<serde_json::Value>) -> InitializeParams {
    InitializeParams {
        initialization_options: options,
        ..Default::default()
    }
}

fn position_params(uri: &tower_lsp::lsp_types::Url, line: u32, character: u32) -> TextDocumentPositionParams {
    TextDocumentPositionParams {
        text_document: TextDocumentIdentifier { uri: uri.clone() },
        position: Position::new(line, character),
    }
}

#[tokio::test]
async fn test_initialize_selects_requested_grammar() {
    let service = service(GrammarVariant::Stardog);
    let backend = service.inner();

    let result = backend
        .initialize(initialize_with(Some(json!({ "grammar": "w3" }))))
        .await
        .unwrap();
    assert_eq!(backend.session().lock().grammar(), GrammarVariant::W3);

    let capabilities = result.capabilities;
    assert_eq!(
        capabilities.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );
    let triggers = capabilities.completion_provider.unwrap().trigger_characters.unwrap();
    assert_eq!(triggers, vec!["<", "?", "$"]);
}

#[tokio::test]
async fn test_initialize_without_options_uses_default_grammar() {
    let service = service(GrammarVariant::W3);
    let backend = service.inner();
    backend.initialize(initialize_with(None)).await.unwrap();
    assert_eq!(backend.session().lock().grammar(), GrammarVariant::W3);

    let service = self::service(GrammarVariant::Stardog);
    let backend = service.inner();
    backend.initialize(initialize_with(Some(json!({})))).await.unwrap();
    assert_eq!(backend.session().lock().grammar(), GrammarVariant::Stardog);
}

#[tokio::test]
async fn test_initialize_rejects_unknown_grammar() {
    let service = service(GrammarVariant::Stardog);
    let error = service
        .inner()
        .initialize(initialize_with(Some(json!({ "grammar": "sparql12" }))))
        .await
        .unwrap_err();
    assert_eq!(error.code, tower_lsp::jsonrpc::ErrorCode::InvalidParams);
}

#[tokio::test]
async fn test_completion_data_notification_feeds_completion() {
    let service = service(GrammarVariant::Stardog);
    let backend = service.inner();
    backend.initialize(initialize_with(None)).await.unwrap();

    let uri = common::query_uri("handlers.rq");
    backend
        .session()
        .lock()
        .open_document(uri.clone(), 1, "SELECT * WHERE { ?s rd }");
    backend
        .did_update_completion_data(update(json!({
            "namespaces": [{ "prefix": "rdf", "name": RDF }],
            "relationshipBindings": [
                { "relationship": { "value": format!("{}type", RDF) }, "count": { "value": "42" } }
            ]
        })))
        .await;

    let response = backend
        .completion(CompletionParams {
            text_document_position: position_params(&uri, 0, 22),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();
    let Some(CompletionResponse::Array(items)) = response else {
        panic!("expected a completion array");
    };
    assert!(items.iter().any(|item| item.label == "rdf:type"));
}

#[tokio::test]
async fn test_requests_for_unknown_documents_are_empty() {
    let service = service(GrammarVariant::Stardog);
    let backend = service.inner();
    let uri = common::query_uri("never-opened.rq");

    let hover = backend
        .hover(HoverParams {
            text_document_position_params: position_params(&uri, 0, 0),
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();
    assert!(hover.is_none());

    let completion = backend
        .completion(CompletionParams {
            text_document_position: position_params(&uri, 0, 0),
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();
    assert!(matches!(completion, Some(CompletionResponse::Array(items)) if items.is_empty()));
}

#[tokio::test]
async fn test_debug_output_while_session_is_locked() {
    let service = service(GrammarVariant::W3);
    let backend = service.inner();

    let shared = backend.session();
    let session = shared.lock();
    let locked = format!("{:?}", backend);
    assert!(locked.contains("session: \"<locked>\""), "got {}", locked);
    drop(session);

    let unlocked = format!("{:?}", backend);
    assert!(unlocked.contains("Session"), "got {}", unlocked);
    assert!(!unlocked.contains("<locked>"));
}
