//! Server state
//!
//! The [`Session`] owns everything the language features read: the open
//! documents, their cached parse states, the completion data pushed by the
//! client and the grammar in use. Handlers run one at a time, so a request
//! always sees the last applied change and data update.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tower_lsp::lsp_types::{
    CompletionItem, Diagnostic, FoldingRange, Hover, Position, TextDocumentContentChangeEvent, Url,
};
use tracing::{debug, info, trace, warn};

use crate::lsp::diagnostics::parse_diagnostics;
use crate::lsp::document::LspDocument;
use crate::lsp::features::completion::complete;
use crate::lsp::features::completion::data::CompletionDataStore;
use crate::lsp::features::{folding, hover};
use crate::lsp::models::CompletionDataUpdate;
use crate::lsp::parse_cache::{CacheStats, ParseState, ParseStateCache};
use crate::parsers::{GrammarError, GrammarParser, GrammarVariant, create_parser};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("document {0} is not open")]
    UnknownDocument(Url),
    #[error("change to {uri} rejected: {reason}")]
    RejectedChange { uri: Url, reason: String },
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

pub struct Session {
    parser: Box<dyn GrammarParser>,
    documents: FxHashMap<Url, LspDocument>,
    cache: ParseStateCache,
    data: CompletionDataStore,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("grammar", &self.parser.variant())
            .field("documents", &self.documents.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Session {
    pub fn new(parser: Box<dyn GrammarParser>) -> Self {
        Self {
            parser,
            documents: FxHashMap::default(),
            cache: ParseStateCache::new(),
            data: CompletionDataStore::new(),
        }
    }

    pub fn with_grammar(variant: GrammarVariant) -> Self {
        Self::new(create_parser(variant))
    }

    pub fn grammar(&self) -> GrammarVariant {
        self.parser.variant()
    }

    /// Switch grammars. Cached states came from the old parser and are dropped.
    pub fn set_grammar(&mut self, variant: GrammarVariant) {
        if variant != self.parser.variant() {
            info!("Switching grammar from {} to {}", self.parser.variant(), variant);
            self.parser = create_parser(variant);
        }
        self.cache.clear();
    }

    /// Select a grammar by its initialization-option name.
    pub fn select_grammar(&mut self, name: &str) -> Result<GrammarVariant, SessionError> {
        let variant = name.parse::<GrammarVariant>()?;
        self.set_grammar(variant);
        Ok(variant)
    }

    pub fn document(&self, uri: &Url) -> Option<&LspDocument> {
        self.documents.get(uri)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn completion_data(&self) -> &CompletionDataStore {
        &self.data
    }

    /// Registers the document and parses it right away.
    pub fn open_document(&mut self, uri: Url, version: i32, text: &str) -> Vec<Diagnostic> {
        debug!("Opening {} (version {}, {} chars)", uri, version, text.chars().count());
        let document = LspDocument::new(uri.clone(), version, text);
        self.cache.invalidate(&uri);
        let diagnostics = if document.is_empty() {
            Vec::new()
        } else {
            self.reparse(&document)
        };
        self.documents.insert(uri, document);
        diagnostics
    }

    /// Applies the changes and returns the diagnostics for the new snapshot.
    ///
    /// The cached parse state is always invalidated. An emptied document is not
    /// reparsed and yields no diagnostics, which clears stale markers.
    pub fn change_document(
        &mut self,
        uri: &Url,
        version: i32,
        changes: Vec<TextDocumentContentChangeEvent>,
    ) -> Result<Vec<Diagnostic>, SessionError> {
        let document = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| SessionError::UnknownDocument(uri.clone()))?;
        document.apply(changes, version).map_err(|reason| SessionError::RejectedChange {
            uri: uri.clone(),
            reason,
        })?;
        self.cache.invalidate(uri);

        if document.is_empty() {
            trace!("{} is empty, clearing diagnostics", uri);
            return Ok(Vec::new());
        }
        let document = document.clone();
        Ok(self.reparse(&document))
    }

    pub fn close_document(&mut self, uri: &Url) -> Result<(), SessionError> {
        self.cache.remove(uri);
        match self.documents.remove(uri) {
            Some(_) => Ok(()),
            None => Err(SessionError::UnknownDocument(uri.clone())),
        }
    }

    pub fn completion(&mut self, uri: &Url, position: Position) -> Result<Vec<CompletionItem>, SessionError> {
        let state = self.ensure_state(uri)?;
        let document = self.open(uri)?;
        let items = complete(document, &state, self.parser.as_ref(), &self.data, position);
        debug!("{} completion items for {} at {:?}", items.len(), uri, position);
        Ok(items)
    }

    pub fn hover(&mut self, uri: &Url, position: Position) -> Result<Hover, SessionError> {
        let state = self.ensure_state(uri)?;
        Ok(hover::hover(self.open(uri)?, &state.cst, position))
    }

    pub fn folding_ranges(&mut self, uri: &Url) -> Result<Vec<FoldingRange>, SessionError> {
        let state = self.ensure_state(uri)?;
        Ok(folding::folding_ranges(self.open(uri)?, &state.cst))
    }

    pub fn apply_completion_data(&mut self, update: CompletionDataUpdate) {
        self.data.apply_update(update);
    }

    fn reparse(&mut self, document: &LspDocument) -> Vec<Diagnostic> {
        let output = self.parser.parse(&document.text());
        let diagnostics = parse_diagnostics(document, &output.errors);
        if !output.errors.is_empty() {
            debug!("{} parse errors in {}", output.errors.len(), document.uri);
        }
        self.cache.put(document.uri.clone(), ParseState::from(output));
        diagnostics
    }

    fn open(&self, uri: &Url) -> Result<&LspDocument, SessionError> {
        self.documents.get(uri).ok_or_else(|| {
            warn!("Request for unknown document {}", uri);
            SessionError::UnknownDocument(uri.clone())
        })
    }

    /// The document's parse state, parsing on a cache miss.
    fn ensure_state(&mut self, uri: &Url) -> Result<Arc<ParseState>, SessionError> {
        let document = self
            .documents
            .get(uri)
            .ok_or_else(|| SessionError::UnknownDocument(uri.clone()))?;
        if let Some(state) = self.cache.get(uri) {
            return Ok(state);
        }
        let output = self.parser.parse(&document.text());
        Ok(self.cache.put(uri.clone(), ParseState::from(output)))
    }
}
