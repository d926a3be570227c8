use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

use crate::lsp::document::LspDocument;
use crate::parsers::{CstNode, RuleNode};

/// One region per rule spanning several lines; for rules starting on the same
/// line only the outermost is kept.
pub fn folding_ranges(document: &LspDocument, cst: &RuleNode) -> Vec<FoldingRange> {
    let mut ranges = Vec::new();
    let mut seen_start_lines = FxHashSet::default();
    collect(document, cst, &mut seen_start_lines, &mut ranges);
    ranges
}

fn collect(document: &LspDocument, rule: &RuleNode, seen: &mut FxHashSet<u32>, out: &mut Vec<FoldingRange>) {
    if let Some((start, end)) = rule.span() {
        let start_line = document.position_at(start).line;
        let end_line = document.position_at(end).line;
        if end_line > start_line && seen.insert(start_line) {
            out.push(FoldingRange {
                start_line,
                end_line,
                kind: Some(FoldingRangeKind::Region),
                ..Default::default()
            });
        }
    }
    for child in rule.children.iter().filter_map(CstNode::as_rule) {
        collect(document, child, seen, out);
    }
}
