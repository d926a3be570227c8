//! LSP protocol handler implementations
//!
//! Every handler locks the session, does its work synchronously and releases
//! the lock before talking to the client again.

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, FoldingRange, FoldingRangeParams,
    FoldingRangeProviderCapability, Hover, HoverParams, HoverProviderCapability, InitializeParams,
    InitializeResult, InitializedParams, ServerCapabilities, ServerInfo, TextDocumentSyncCapability,
    TextDocumentSyncKind,
};
use tower_lsp::{LanguageServer, jsonrpc};
use tracing::{debug, info, warn};

use super::state::SparqlBackend;
use crate::lsp::models::InitializationOptions;

/// Characters that open a variable or an IRI.
const COMPLETION_TRIGGERS: [&str; 3] = ["<", "?", "$"];

pub(crate) fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(COMPLETION_TRIGGERS.iter().map(|c| c.to_string()).collect()),
            resolve_provider: Some(false),
            ..Default::default()
        }),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for SparqlBackend {
    /// Selects the grammar and declares capabilities.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize from {:?}", params.client_info.as_ref().map(|c| &c.name));

        let options = match params.initialization_options {
            Some(value) => serde_json::from_value::<InitializationOptions>(value).map_err(|e| {
                warn!("Malformed initialization options: {}", e);
                jsonrpc::Error::invalid_params(format!("malformed initialization options: {}", e))
            })?,
            None => InitializationOptions::default(),
        };

        {
            let mut session = self.session.lock();
            match options.grammar.as_deref() {
                Some(name) => {
                    let variant = session.select_grammar(name).map_err(|e| {
                        warn!("Refusing to initialize: {}", e);
                        jsonrpc::Error::invalid_params(e.to_string())
                    })?;
                    info!("Using {} grammar", variant);
                }
                None => {
                    session.set_grammar(self.default_grammar);
                    info!("No grammar requested, using {}", self.default_grammar);
                }
            }
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Client initialized");
    }

    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        info!("Opening document: URI={}, version={}", document.uri, document.version);
        let diagnostics = self
            .session
            .lock()
            .open_document(document.uri.clone(), document.version, &document.text);
        self.publish(document.uri, diagnostics, Some(document.version)).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);
        let result = self
            .session
            .lock()
            .change_document(&uri, version, params.content_changes);
        match result {
            Ok(diagnostics) => self.publish(uri, diagnostics, Some(version)).await,
            Err(e) => warn!("Failed to apply change: {}", e),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!("Closing document: {}", uri);
        let result = self.session.lock().close_document(&uri);
        if let Err(e) = result {
            warn!("{}", e);
        }
        self.publish(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let position = params.text_document_position;
        debug!("textDocument/completion at {:?} in {}", position.position, position.text_document.uri);
        let result = self
            .session
            .lock()
            .completion(&position.text_document.uri, position.position);
        match result {
            Ok(items) => Ok(Some(CompletionResponse::Array(items))),
            Err(e) => {
                warn!("Completion failed: {}", e);
                Ok(Some(CompletionResponse::Array(Vec::new())))
            }
        }
    }

    async fn hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let position = params.text_document_position_params;
        debug!("textDocument/hover at {:?} in {}", position.position, position.text_document.uri);
        let result = self.session.lock().hover(&position.text_document.uri, position.position);
        match result {
            Ok(hover) => Ok(Some(hover)),
            Err(e) => {
                warn!("Hover failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> LspResult<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        debug!("textDocument/foldingRange in {}", uri);
        let result = self.session.lock().folding_ranges(&uri);
        match result {
            Ok(ranges) => Ok(Some(ranges)),
            Err(e) => {
                warn!("Folding ranges failed: {}", e);
                Ok(None)
            }
        }
    }
}
