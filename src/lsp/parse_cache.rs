//! Per-document parse state cache
//!
//! A read-through cache: a request that misses parses the document and stores
//! the result before continuing. Entries are never patched. Every content
//! change invalidates the entry, and closing the document removes it.
//!
//! # Invariant
//!
//! A [`ParseState`]'s tokens and tree always come from the same parse of the
//! same snapshot, so the pair is stored behind one `Arc` and replaced together.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tower_lsp::lsp_types::Url;
use tracing::trace;

use crate::parsers::{ParseOutput, RuleNode, Token};

/// Tokens and concrete syntax tree of one document snapshot.
#[derive(Debug, Clone)]
pub struct ParseState {
    pub tokens: Vec<Token>,
    pub cst: RuleNode,
}

impl From<ParseOutput> for ParseState {
    fn from(output: ParseOutput) -> Self {
        Self {
            tokens: output.tokens,
            cst: output.cst,
        }
    }
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct ParseStateCache {
    entries: FxHashMap<Url, Arc<ParseState>>,
    stats: CacheStats,
}

impl ParseStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached state for `uri`, counting the lookup as a hit or a miss.
    pub fn get(&mut self, uri: &Url) -> Option<Arc<ParseState>> {
        match self.entries.get(uri) {
            Some(state) => {
                self.stats.hits += 1;
                trace!("Parse cache hit for {}", uri);
                Some(Arc::clone(state))
            }
            None => {
                self.stats.misses += 1;
                trace!("Parse cache miss for {}", uri);
                None
            }
        }
    }

    /// Overwrites any existing entry.
    pub fn put(&mut self, uri: Url, state: ParseState) -> Arc<ParseState> {
        let state = Arc::new(state);
        self.entries.insert(uri, Arc::clone(&state));
        state
    }

    pub fn invalidate(&mut self, uri: &Url) {
        if self.entries.remove(uri).is_some() {
            self.stats.invalidations += 1;
        }
    }

    pub fn remove(&mut self, uri: &Url) -> Option<Arc<ParseState>> {
        self.entries.remove(uri)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
