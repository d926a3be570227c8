//! Bundled SPARQL grammar (W3C SPARQL 1.1 and the Stardog dialect).

use tracing::{debug, trace};

use super::token::{CompletionCandidate, ParseOutput, Token};
use super::{GrammarParser, GrammarVariant};

mod assist;
mod cst;
mod lexer;
pub mod terminals;

use cst::CstBuilder;
use lexer::Lexer;

#[derive(Debug, Clone, Copy)]
pub struct SparqlParser {
    variant: GrammarVariant,
}

impl SparqlParser {
    pub fn new(variant: GrammarVariant) -> Self {
        Self { variant }
    }
}

impl Default for SparqlParser {
    fn default() -> Self {
        Self::new(GrammarVariant::default())
    }
}

impl GrammarParser for SparqlParser {
    fn variant(&self) -> GrammarVariant {
        self.variant
    }

    fn parse(&self, text: &str) -> ParseOutput {
        let (tokens, mut errors) = Lexer::new(text, self.variant).tokenize();
        let (cst, cst_errors) = CstBuilder::build(&tokens);
        errors.extend(cst_errors);
        debug!(
            "Parsed {} chars into {} tokens with {} errors ({})",
            text.chars().count(),
            tokens.len(),
            errors.len(),
            self.variant
        );
        ParseOutput { tokens, cst, errors }
    }

    fn compute_content_assist(&self, start_rule: &str, tokens: &[Token]) -> Vec<CompletionCandidate> {
        let candidates = assist::content_assist(self.variant, start_rule, tokens);
        trace!(
            "Content assist after {} tokens: {} candidates",
            tokens.len(),
            candidates.len()
        );
        candidates
    }
}
