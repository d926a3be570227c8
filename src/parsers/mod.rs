//! Grammar collaborators
//!
//! The language features never tokenize or parse on their own: they talk to a
//! [`GrammarParser`], which turns document text into a token stream plus a
//! concrete syntax tree, and answers "which terminals may come next" for a
//! token prefix. The bundled [`sparql::SparqlParser`] provides both grammar
//! variants the server can be initialized with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod sparql;
pub mod token;

pub use sparql::SparqlParser;
pub use token::{
    CompletionCandidate, CstNode, OffsetRange, ParseError, ParseOutput, RuleNode, Token,
    TokenCategory, TokenKind, TokenType,
};

/// Start rule used for content assist over whole documents.
pub const START_RULE: &str = "SparqlDoc";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("unrecognized grammar variant '{0}' (expected 'w3' or 'stardog')")]
    UnknownVariant(String),
}

/// The supported SPARQL dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarVariant {
    /// SPARQL 1.1 as published by the W3C
    W3,
    /// SPARQL 1.1 plus Stardog's extensions
    #[default]
    Stardog,
}

impl FromStr for GrammarVariant {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w3" => Ok(GrammarVariant::W3),
            "stardog" => Ok(GrammarVariant::Stardog),
            _ => Err(GrammarError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for GrammarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarVariant::W3 => f.write_str("w3"),
            GrammarVariant::Stardog => f.write_str("stardog"),
        }
    }
}

/// Common interface for grammar implementations.
///
/// Implementations must be error tolerant: `parse` always yields a token
/// stream and a tree, with problems reported through `ParseOutput::errors`.
pub trait GrammarParser: Send + Sync {
    fn variant(&self) -> GrammarVariant;

    /// Tokenize and parse a full document snapshot.
    fn parse(&self, text: &str) -> ParseOutput;

    /// Grammar-valid next terminals after `tokens`, each with its rule context.
    fn compute_content_assist(&self, start_rule: &str, tokens: &[Token]) -> Vec<CompletionCandidate>;
}

/// Create the parser for a grammar variant.
pub fn create_parser(variant: GrammarVariant) -> Box<dyn GrammarParser> {
    Box::new(SparqlParser::new(variant))
}
