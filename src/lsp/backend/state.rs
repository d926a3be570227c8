//! Backend state
//!
//! This module defines the SparqlBackend struct, the handle tower-lsp clones
//! into every request. All language state lives in the shared [`Session`].

use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;

use crate::lsp::session::Session;
use crate::parsers::GrammarVariant;

/// The SPARQL language server backend.
#[derive(Clone)]
pub struct SparqlBackend {
    pub(super) client: Client,
    /// Never locked across an `.await`.
    pub(super) session: Arc<Mutex<Session>>,
    /// Grammar used when the client sends no initialization option.
    pub(super) default_grammar: GrammarVariant,
}

impl std::fmt::Debug for SparqlBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("SparqlBackend");
        match self.session.try_lock() {
            Some(session) => debug.field("session", &*session),
            None => debug.field("session", &"<locked>"),
        };
        debug.field("default_grammar", &self.default_grammar).finish()
    }
}
