//! Hover over the concrete syntax tree
//!
//! Hovering names the grammar rule that directly contains the token under the
//! cursor and highlights that rule's whole span, so the client marks the
//! complete construct (a path, a triple, a prefix declaration) instead of a
//! single token. Known BFO identifiers get their human label appended.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkedString, Position, Range};
use tracing::trace;

use crate::lsp::document::LspDocument;
use crate::ontology;
use crate::parsers::{CstNode, RuleNode, Token};

/// The innermost rule around the cursor token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget<'t> {
    pub rule: &'t str,
    pub token: &'t Token,
    /// Inclusive offsets of the rule's tokens.
    pub start: usize,
    pub end: usize,
}

/// Depth-first search for the token whose span holds `offset`.
///
/// Unlike completion, the position just after a token does not count.
pub fn find_target(cst: &RuleNode, offset: usize) -> Option<HoverTarget<'_>> {
    let mut target = None;
    visit(cst, offset, &mut target);
    target
}

fn visit<'t>(rule: &'t RuleNode, offset: usize, target: &mut Option<HoverTarget<'t>>) {
    for child in &rule.children {
        match child {
            CstNode::Rule(nested) => visit(nested, offset, target),
            CstNode::Token(token) if token.contains(offset) => {
                if let Some((start, end)) = rule.span() {
                    *target = Some(HoverTarget {
                        rule: &rule.name,
                        token,
                        start,
                        end,
                    });
                }
            }
            CstNode::Token(_) => {}
        }
    }
}

pub fn empty_hover() -> Hover {
    Hover {
        contents: HoverContents::Array(Vec::new()),
        range: None,
    }
}

pub fn render(target: &HoverTarget<'_>) -> String {
    match ontology::label(&target.token.image) {
        Some(label) => format!("```\n{} : '{}'\n```", target.rule, label),
        None => format!("```\n{}\n```", target.rule),
    }
}

pub fn hover(document: &LspDocument, cst: &RuleNode, position: Position) -> Hover {
    let offset = document.offset_at(position);
    let Some(target) = find_target(cst, offset) else {
        trace!("Nothing to hover at offset {}", offset);
        return empty_hover();
    };
    Hover {
        contents: HoverContents::Scalar(MarkedString::String(render(&target))),
        range: Some(Range::new(
            document.position_at(target.start),
            document.position_at(target.end + 1),
        )),
    }
}
