use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, info};

use crate::lsp::models::CompletionDataUpdate;
use crate::lsp::session::Session;
use crate::parsers::GrammarVariant;

mod handlers;
mod state;

pub use state::SparqlBackend;

impl SparqlBackend {
    /// Creates a backend whose session starts on `default_grammar`.
    pub fn new(client: Client, default_grammar: GrammarVariant) -> Self {
        info!("Creating SPARQL backend (default grammar: {})", default_grammar);
        Self {
            client,
            session: Arc::new(Mutex::new(Session::with_grammar(default_grammar))),
            default_grammar,
        }
    }

    /// Shared session, for embedding the server and for tests.
    pub fn session(&self) -> Arc<Mutex<Session>> {
        Arc::clone(&self.session)
    }

    /// Handles the `$/didUpdateCompletionData` notification.
    pub async fn did_update_completion_data(&self, params: CompletionDataUpdate) {
        debug!(
            "Completion data update: namespaces={}, relationships={}, types={}",
            params.namespaces.as_ref().map_or(0, Vec::len),
            params.relationship_bindings.as_ref().map_or(0, Vec::len),
            params.type_bindings.as_ref().map_or(0, Vec::len),
        );
        self.session.lock().apply_completion_data(params);
    }

    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, version).await;
    }
}
