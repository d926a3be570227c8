//! Grammar-aware completion
//!
//! Suggestions come from three places:
//!
//! 1. identifiers already used in the document (variables, prefixes, local
//!    names, IRIs), offered everywhere and ranked first when the grammar
//!    expects that category at the cursor;
//! 2. keywords the grammar accepts next;
//! 3. usage statistics from the [`data::CompletionDataStore`], offered as
//!    predicates in verb position and as classes right after `a`.

use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, CompletionTextEdit, Position, Range, TextEdit};
use tracing::debug;

use crate::lsp::document::LspDocument;
use crate::lsp::features::cursor::{CursorContext, cursor_context};
use crate::lsp::parse_cache::ParseState;
use crate::ontology;
use crate::parsers::{CompletionCandidate, GrammarParser, OffsetRange, START_RULE, TokenCategory, TokenKind};

pub mod data;
pub mod identifiers;
pub mod namespaces;

use data::CompletionDataStore;
use identifiers::UniqueIdentifiers;

/// Rules marking a position where a predicate is expected.
pub const EDGE_RULES: &[&str] = &["Verb", "PathPrimary", "PathOneInPropertySet"];

/// Computes text edits relative to the cursor token.
struct Replacer<'a> {
    document: &'a LspDocument,
    default_range: OffsetRange,
}

impl Replacer<'_> {
    fn edit(&self, range: Option<OffsetRange>, text: &str) -> CompletionTextEdit {
        let range = range.unwrap_or(self.default_range);
        CompletionTextEdit::Edit(TextEdit {
            range: Range::new(
                self.document.position_at(range.start),
                self.document.position_at(range.end),
            ),
            new_text: text.to_string(),
        })
    }

    fn with_edit(&self, item: &CompletionItem) -> CompletionItem {
        CompletionItem {
            text_edit: Some(self.edit(None, &item.label)),
            ..item.clone()
        }
    }
}

fn expects(candidates: &[CompletionCandidate], category: TokenCategory) -> bool {
    candidates
        .iter()
        .any(|candidate| candidate.next_token_type.category() == Some(category))
}

fn in_edge_position(candidates: &[CompletionCandidate]) -> bool {
    candidates
        .iter()
        .any(|candidate| candidate.rule_stack.iter().any(|rule| EDGE_RULES.contains(&rule.as_str())))
}

fn identifier_item(
    replacer: &Replacer<'_>,
    label: String,
    replacement: &str,
    kind: CompletionItemKind,
    sort_prefix: Option<char>,
    sort_key: &str,
) -> CompletionItem {
    CompletionItem {
        sort_text: sort_prefix.map(|prefix| format!("{}{}", prefix, sort_key)),
        kind: Some(kind),
        text_edit: Some(replacer.edit(None, replacement)),
        label,
        ..Default::default()
    }
}

/// Completions at `position`, or nothing when the cursor touches no token.
pub fn complete(
    document: &LspDocument,
    state: &ParseState,
    parser: &dyn GrammarParser,
    data: &CompletionDataStore,
    position: Position,
) -> Vec<CompletionItem> {
    let offset = document.offset_at(position);
    let Some(context) = cursor_context(&state.tokens, offset) else {
        debug!("No token at offset {} in {}", offset, document.uri);
        return Vec::new();
    };
    let replacer = Replacer {
        document,
        default_range: OffsetRange {
            start: context.token.start_offset,
            end: context.token.end_exclusive(),
        },
    };

    let identifiers = UniqueIdentifiers::collect(context.before_and_after());
    let candidates = parser.compute_content_assist(START_RULE, context.before);

    let mut items = identifier_completions(&replacer, &identifiers, &candidates, data);
    items.extend(keyword_completions(&replacer, &context, &candidates));

    if in_edge_position(&candidates) {
        items.extend(data.relationship_completions().map(|item| replacer.with_edit(item)));
    }
    if context.previous().is_some_and(|token| token.kind() == TokenKind::A) {
        items.extend(data.class_completions().map(|item| replacer.with_edit(item)));
    }

    debug!(
        "Completion at {}:{} ({}): {} candidates, {} items",
        position.line,
        position.character,
        context.token,
        candidates.len(),
        items.len()
    );
    items
}

fn identifier_completions(
    replacer: &Replacer<'_>,
    identifiers: &UniqueIdentifiers,
    candidates: &[CompletionCandidate],
    data: &CompletionDataStore,
) -> Vec<CompletionItem> {
    let priority = |category: TokenCategory, prefix: char| expects(candidates, category).then_some(prefix);
    let mut items = Vec::new();

    let variable_priority = priority(TokenCategory::Variable, '1');
    for variable in &identifiers.vars {
        items.push(identifier_item(
            replacer,
            variable.clone(),
            variable,
            CompletionItemKind::VARIABLE,
            variable_priority,
            variable,
        ));
    }

    let prefix_priority = priority(TokenCategory::Prefix, '2');
    let mut seen_prefixes = FxHashSet::default();
    let prefixes = identifiers
        .prefixes
        .iter()
        .map(String::as_str)
        .chain(data.namespaces().prefixes());
    for prefix in prefixes {
        let label = prefix.strip_suffix(':').unwrap_or(prefix);
        if !seen_prefixes.insert(label.to_string()) {
            continue;
        }
        items.push(identifier_item(
            replacer,
            label.to_string(),
            &format!("{}:", label),
            CompletionItemKind::ENUM_MEMBER,
            prefix_priority,
            label,
        ));
    }

    let local_priority = priority(TokenCategory::LocalName, '2');
    for local in &identifiers.local_names {
        let label = match ontology::label(local) {
            Some(human) => format!("{} ({})", local, human),
            None => local.clone(),
        };
        items.push(identifier_item(
            replacer,
            label,
            local,
            CompletionItemKind::ENUM_MEMBER,
            local_priority,
            local,
        ));
    }

    let iri_priority = priority(TokenCategory::IriRef, '2');
    for iri in &identifiers.iris {
        items.push(identifier_item(
            replacer,
            iri.clone(),
            iri,
            CompletionItemKind::ENUM_MEMBER,
            iri_priority,
            iri,
        ));
    }

    items
}

/// Keywords the grammar accepts next, one item per surface pattern.
fn keyword_completions(
    replacer: &Replacer<'_>,
    context: &CursorContext<'_>,
    candidates: &[CompletionCandidate],
) -> Vec<CompletionItem> {
    let mut seen = FxHashSet::default();
    candidates
        .iter()
        .filter(|candidate| {
            let token_type = candidate.next_token_type;
            token_type.kind.is_keyword() && token_type.name != context.token.image
        })
        .filter(|candidate| seen.insert(candidate.next_token_type.pattern))
        .map(|candidate| {
            let keyword = candidate.next_token_type.pattern;
            CompletionItem {
                label: keyword.to_string(),
                kind: Some(CompletionItemKind::KEYWORD),
                text_edit: Some(replacer.edit(candidate.replacement_range, keyword)),
                ..Default::default()
            }
        })
        .collect()
}
