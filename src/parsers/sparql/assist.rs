//! Content assist: which terminals the grammar accepts after a token prefix.
//!
//! The prefix is replayed through a small pushdown automaton. Top-level query
//! clauses are tracked in [`Clause`], every open `{`, `[` or `(` pushes a
//! [`Frame`], and inside group patterns [`Slot`] follows the position within
//! the current triple. A `(` in predicate position opens a property path
//! rather than an expression.

use crate::parsers::GrammarVariant;
use crate::parsers::token::{CompletionCandidate, Token, TokenKind, TokenType};

use super::terminals::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Start,
    PrefixName,
    PrefixIri,
    BaseIri,
    Projection,
    ProjectionMore,
    DatasetIri,
    Dataset,
    Where,
    Construct,
    Template,
    Ask,
    Describe,
    Modifiers,
    OrderBy,
    Condition,
    LimitValue,
    Paths,
    Via,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Subject,
    Verb,
    /// After `!` in predicate position.
    Negated,
    Object,
    AfterObject,
    /// After a keyword that must be followed by a nested block.
    Block(TokenType),
    /// After FILTER, BIND or UNNEST.
    Call,
}

impl Slot {
    fn after_term(self) -> Slot {
        match self {
            Slot::Subject => Slot::Verb,
            Slot::Verb | Slot::Negated => Slot::Object,
            Slot::Object | Slot::AfterObject => Slot::AfterObject,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Group {
        slot: Slot,
        closer: TokenKind,
        resume: Clause,
    },
    Parens,
    /// A parenthesized property path; `set` marks a negated property set `!( ... )`.
    Path {
        set: bool,
        negated: bool,
        after_primary: bool,
    },
}

const SUBJECT_TERMS: &[TokenType] = &[VAR1, VAR2, IRIREF, PNAME_LN, PNAME_NS, BLANK_NODE_LABEL, LBRACKET];
const OBJECT_TERMS: &[TokenType] = &[
    VAR1, VAR2, IRIREF, PNAME_LN, PNAME_NS, STRING_LITERAL, INTEGER, DECIMAL, TRUE, FALSE,
    BLANK_NODE_LABEL, LBRACKET,
];
const PATH_TERMS: &[TokenType] = &[A, IRIREF, PNAME_LN, PNAME_NS, LPAREN];
const PROPERTY_SET_TERMS: &[TokenType] = &[A, IRIREF, PNAME_LN, PNAME_NS];
const VERB_PATH: &[&str] = &["TriplesBlock", "TriplesSameSubjectPath", "PropertyListPathNotEmpty", "VerbPath"];
const PATTERN_KEYWORDS: &[TokenType] = &[FILTER, OPTIONAL, MINUS, GRAPH, SERVICE, BIND, VALUES, SELECT];
const MODIFIER_KEYWORDS: &[TokenType] = &[ORDER, GROUP, HAVING, LIMIT, OFFSET, VALUES];
const EXPRESSION_TERMS: &[TokenType] = &[
    VAR1, VAR2, IRIREF, PNAME_LN, STRING_LITERAL, INTEGER, DECIMAL, TRUE, FALSE, NOT, EXISTS,
    LPAREN, RPAREN,
];

struct Assist<'r> {
    variant: GrammarVariant,
    root: &'r str,
    clause: Clause,
    query_form: Option<&'static str>,
    frames: Vec<Frame>,
}

/// Replay `tokens` and list the terminals that may follow them.
pub(super) fn content_assist(
    variant: GrammarVariant,
    start_rule: &str,
    tokens: &[Token],
) -> Vec<CompletionCandidate> {
    let mut assist = Assist {
        variant,
        root: start_rule,
        clause: Clause::Start,
        query_form: None,
        frames: Vec::new(),
    };
    for token in tokens {
        assist.feed(token);
    }
    assist.candidates()
}

impl Assist<'_> {
    fn feed(&mut self, token: &Token) {
        if token.kind() == TokenKind::Unknown {
            return;
        }
        match self.frames.last().copied() {
            None => self.feed_clause(token),
            Some(Frame::Parens) => self.feed_parens(token),
            Some(Frame::Path { set, negated, .. }) => self.feed_path(set, negated, token),
            Some(Frame::Group { slot, closer, resume }) => {
                if token.kind() == closer {
                    self.frames.pop();
                    if self.frames.is_empty() {
                        self.clause = resume;
                    }
                } else {
                    self.feed_group(slot, token);
                }
            }
        }
    }

    fn set_slot(&mut self, next: Slot) {
        if let Some(Frame::Group { slot, .. }) = self.frames.last_mut() {
            *slot = next;
        }
    }

    fn open_group(&mut self, slot: Slot, closer: TokenKind) {
        let resume = match self.clause {
            Clause::Construct => Clause::Template,
            Clause::Via => Clause::Paths,
            _ => Clause::Modifiers,
        };
        self.frames.push(Frame::Group { slot, closer, resume });
    }

    fn feed_parens(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::LParen => self.frames.push(Frame::Parens),
            TokenKind::RParen => {
                self.frames.pop();
            }
            // EXISTS { ... }
            TokenKind::LCurly => self.open_group(Slot::Subject, TokenKind::RCurly),
            _ => {}
        }
    }

    fn feed_path(&mut self, set: bool, negated: bool, token: &Token) {
        let next = match token.kind() {
            TokenKind::RParen => {
                self.frames.pop();
                return;
            }
            TokenKind::LParen => {
                self.set_path(false, true);
                self.frames.push(Frame::Path {
                    set: set || negated,
                    negated: false,
                    after_primary: false,
                });
                return;
            }
            TokenKind::Operator if token.image == "!" => (true, false),
            TokenKind::Operator if token.image == "^" => (negated, false),
            TokenKind::Operator if token.image == "/" || token.image == "|" => (false, false),
            TokenKind::A | TokenKind::IriRef | TokenKind::PnameLn | TokenKind::PnameNs => (false, true),
            _ => return,
        };
        self.set_path(next.0, next.1);
    }

    fn set_path(&mut self, next_negated: bool, next_after_primary: bool) {
        if let Some(Frame::Path { negated, after_primary, .. }) = self.frames.last_mut() {
            *negated = next_negated;
            *after_primary = next_after_primary;
        }
    }

    fn feed_group(&mut self, slot: Slot, token: &Token) {
        let tt = token.token_type;
        match token.kind() {
            TokenKind::LCurly => {
                self.set_slot(Slot::Subject);
                self.open_group(Slot::Subject, TokenKind::RCurly);
            }
            TokenKind::LBracket => {
                self.set_slot(slot.after_term());
                self.open_group(Slot::Verb, TokenKind::RBracket);
            }
            TokenKind::LParen if matches!(slot, Slot::Verb | Slot::Negated) => {
                self.set_slot(Slot::Object);
                self.frames.push(Frame::Path {
                    set: slot == Slot::Negated,
                    negated: false,
                    after_primary: false,
                });
            }
            TokenKind::LParen => {
                let next = match slot {
                    Slot::Call => Slot::Subject,
                    Slot::Block(_) => slot,
                    other => other.after_term(),
                };
                self.set_slot(next);
                self.frames.push(Frame::Parens);
            }
            TokenKind::Period => self.set_slot(Slot::Subject),
            TokenKind::Semicolon => self.set_slot(Slot::Verb),
            TokenKind::Comma => self.set_slot(Slot::Object),
            TokenKind::Operator if slot == Slot::Object && (token.image == "/" || token.image == "|") => {
                self.set_slot(Slot::Verb)
            }
            TokenKind::Operator if token.image == "!" && slot == Slot::Verb => {
                self.set_slot(Slot::Negated)
            }
            TokenKind::Keyword if [OPTIONAL, MINUS, GRAPH, SERVICE, UNION, VALUES, SELECT].contains(&tt) => {
                self.set_slot(Slot::Block(tt))
            }
            TokenKind::Keyword if tt == FILTER || tt == BIND || tt == UNNEST => self.set_slot(Slot::Call),
            TokenKind::Keyword if tt != TRUE && tt != FALSE => {}
            TokenKind::Keyword
            | TokenKind::A
            | TokenKind::Var1
            | TokenKind::Var2
            | TokenKind::IriRef
            | TokenKind::PnameLn
            | TokenKind::PnameNs
            | TokenKind::StringLiteral
            | TokenKind::Integer
            | TokenKind::Decimal
            | TokenKind::BlankNodeLabel => {
                if !matches!(slot, Slot::Block(_) | Slot::Call) {
                    self.set_slot(slot.after_term());
                }
            }
            _ => {}
        }
    }

    fn feed_clause(&mut self, token: &Token) {
        let tt = token.token_type;
        let kind = token.kind();
        if kind == TokenKind::LCurly {
            self.open_group(Slot::Subject, TokenKind::RCurly);
            return;
        }
        if kind == TokenKind::LParen {
            if self.clause == Clause::Projection {
                self.clause = Clause::ProjectionMore;
            }
            self.frames.push(Frame::Parens);
            return;
        }

        let query_form = if tt == SELECT {
            Some("SelectQuery")
        } else if tt == CONSTRUCT {
            Some("ConstructQuery")
        } else if tt == ASK {
            Some("AskQuery")
        } else if tt == DESCRIBE {
            Some("DescribeQuery")
        } else if tt == PATHS {
            Some("PathQuery")
        } else {
            None
        };
        if query_form.is_some() {
            self.query_form = query_form;
        }

        let variable = matches!(kind, TokenKind::Var1 | TokenKind::Var2);
        let iri = matches!(kind, TokenKind::IriRef | TokenKind::PnameLn);
        self.clause = match self.clause {
            _ if tt == PREFIX => Clause::PrefixName,
            _ if tt == BASE => Clause::BaseIri,
            _ if tt == SELECT => Clause::Projection,
            _ if tt == CONSTRUCT => Clause::Construct,
            _ if tt == ASK => Clause::Ask,
            _ if tt == DESCRIBE => Clause::Describe,
            _ if tt == PATHS => Clause::Paths,
            _ if tt == FROM => Clause::DatasetIri,
            _ if tt == WHERE => Clause::Where,
            _ if tt == ORDER || tt == GROUP => Clause::OrderBy,
            _ if tt == HAVING => Clause::Condition,
            _ if tt == LIMIT || tt == OFFSET => Clause::LimitValue,
            Clause::PrefixName if kind == TokenKind::PnameNs => Clause::PrefixIri,
            Clause::PrefixIri | Clause::BaseIri if kind == TokenKind::IriRef => Clause::Start,
            Clause::Projection if tt == DISTINCT || tt == REDUCED => Clause::Projection,
            Clause::Projection | Clause::ProjectionMore if variable || kind == TokenKind::Star => {
                Clause::ProjectionMore
            }
            Clause::DatasetIri if tt == NAMED => Clause::DatasetIri,
            Clause::DatasetIri if iri => Clause::Dataset,
            Clause::OrderBy if tt == BY => Clause::Condition,
            Clause::LimitValue if kind == TokenKind::Integer => Clause::Modifiers,
            Clause::Paths if tt == VIA => Clause::Via,
            Clause::Via if variable || iri => Clause::Paths,
            current => current,
        };
    }

    fn rule_stack(&self, tail: &[&str]) -> Vec<String> {
        let mut stack = vec![self.root.to_string()];
        let in_group = self.frames.first().is_some_and(|f| matches!(f, Frame::Group { .. }));
        if self.query_form.is_some() || in_group {
            stack.push("QueryUnit".to_string());
            stack.push("Query".to_string());
        }
        if let Some(form) = self.query_form {
            stack.push(form.to_string());
        }
        if in_group {
            stack.push("WhereClause".to_string());
        }
        for (i, frame) in self.frames.iter().enumerate() {
            match frame {
                Frame::Path { set, .. } => {
                    let nested = i > 0 && matches!(self.frames[i - 1], Frame::Path { .. });
                    if !nested {
                        stack.extend(VERB_PATH.iter().map(|rule| rule.to_string()));
                    }
                    stack.push("Path".to_string());
                    stack.push("PathPrimary".to_string());
                    if *set {
                        stack.push("PathNegatedPropertySet".to_string());
                    }
                }
                Frame::Group { closer: TokenKind::RBracket, .. } => {
                    stack.push("BlankNodePropertyListPath".to_string());
                }
                Frame::Group { .. } => {
                    stack.push("GroupGraphPattern".to_string());
                    stack.push("GroupGraphPatternSub".to_string());
                }
                Frame::Parens => stack.push("BrackettedExpression".to_string()),
            }
        }
        stack.extend(tail.iter().map(|rule| rule.to_string()));
        stack
    }

    fn candidates(&self) -> Vec<CompletionCandidate> {
        let mut out = Vec::new();
        match self.frames.last() {
            None => self.clause_candidates(&mut out),
            Some(Frame::Parens) => {
                let stack = self.rule_stack(&["Expression"]);
                push_all(&mut out, EXPRESSION_TERMS, &stack);
                push_all(&mut out, BUILTIN_CALLS, &stack);
                if self.frames.len() == 1 && matches!(self.clause, Clause::Projection | Clause::ProjectionMore) {
                    push_all(&mut out, &[AS], &stack);
                }
            }
            Some(Frame::Path { set, negated, after_primary }) => {
                if *after_primary {
                    push_all(&mut out, &[RPAREN], &self.rule_stack(&["Path"]));
                } else if *set {
                    push_all(&mut out, PROPERTY_SET_TERMS, &self.rule_stack(&["PathOneInPropertySet"]));
                } else if *negated {
                    let one = self.rule_stack(&["Path", "PathPrimary", "PathNegatedPropertySet", "PathOneInPropertySet"]);
                    push_all(&mut out, PROPERTY_SET_TERMS, &one);
                    push_all(&mut out, &[LPAREN], &one);
                } else {
                    push_all(&mut out, PATH_TERMS, &self.rule_stack(&["Path", "PathPrimary"]));
                }
            }
            Some(Frame::Group { slot, .. }) => self.slot_candidates(*slot, &mut out),
        }
        out
    }

    fn clause_candidates(&self, out: &mut Vec<CompletionCandidate>) {
        let query = self.rule_stack(&[]);
        match self.clause {
            Clause::Start => {
                push_all(out, &[PREFIX], &[self.root.to_string(), "Prologue".into(), "PrefixDecl".into()]);
                push_all(out, &[BASE], &[self.root.to_string(), "Prologue".into(), "BaseDecl".into()]);
                let forms = [self.root.to_string(), "QueryUnit".into(), "Query".into()];
                push_all(out, &[SELECT, CONSTRUCT, DESCRIBE, ASK], &forms);
                if self.variant == GrammarVariant::Stardog {
                    push_all(out, &[PATHS], &forms);
                }
            }
            Clause::PrefixName => {
                let decl = [self.root.to_string(), "Prologue".into(), "PrefixDecl".into()];
                push_all(out, &[PNAME_NS], &decl);
            }
            Clause::PrefixIri => {
                let decl = [self.root.to_string(), "Prologue".into(), "PrefixDecl".into()];
                push_all(out, &[IRIREF], &decl);
            }
            Clause::BaseIri => {
                let decl = [self.root.to_string(), "Prologue".into(), "BaseDecl".into()];
                push_all(out, &[IRIREF], &decl);
            }
            Clause::Projection => {
                let select = self.rule_stack(&["SelectClause"]);
                push_all(out, &[DISTINCT, REDUCED, STAR, VAR1, VAR2, LPAREN], &select);
            }
            Clause::ProjectionMore => {
                let select = self.rule_stack(&["SelectClause"]);
                push_all(out, &[VAR1, VAR2, LPAREN], &select);
                push_all(out, &[FROM], &self.rule_stack(&["DatasetClause"]));
                push_all(out, &[WHERE, LCURLY], &self.rule_stack(&["WhereClause"]));
            }
            Clause::DatasetIri => {
                push_all(out, &[NAMED, IRIREF, PNAME_LN], &self.rule_stack(&["DatasetClause"]));
            }
            Clause::Dataset | Clause::Ask => {
                push_all(out, &[FROM], &self.rule_stack(&["DatasetClause"]));
                push_all(out, &[WHERE, LCURLY], &self.rule_stack(&["WhereClause"]));
            }
            Clause::Where => push_all(out, &[LCURLY], &self.rule_stack(&["WhereClause"])),
            Clause::Construct => {
                push_all(out, &[LCURLY], &self.rule_stack(&["ConstructTemplate"]));
                push_all(out, &[WHERE], &self.rule_stack(&["WhereClause"]));
            }
            Clause::Template => {
                push_all(out, &[FROM], &self.rule_stack(&["DatasetClause"]));
                push_all(out, &[WHERE], &self.rule_stack(&["WhereClause"]));
            }
            Clause::Describe => {
                push_all(out, &[VAR1, VAR2, IRIREF, PNAME_LN, STAR], &query);
                push_all(out, &[WHERE, LCURLY], &self.rule_stack(&["WhereClause"]));
            }
            Clause::Modifiers => {
                push_all(out, MODIFIER_KEYWORDS, &self.rule_stack(&["SolutionModifier"]));
            }
            Clause::OrderBy => push_all(out, &[BY], &self.rule_stack(&["SolutionModifier"])),
            Clause::Condition => {
                let modifier = self.rule_stack(&["SolutionModifier", "OrderCondition"]);
                push_all(out, &[VAR1, VAR2, ASC, DESC, LPAREN], &modifier);
                push_all(out, &[HAVING, LIMIT, OFFSET], &self.rule_stack(&["SolutionModifier"]));
            }
            Clause::LimitValue => {
                push_all(out, &[INTEGER], &self.rule_stack(&["SolutionModifier", "LimitOffsetClauses"]));
            }
            Clause::Paths => {
                push_all(out, &[START, END, VIA, SHORTEST, ALL, CYCLIC, VAR1, VAR2], &query);
                push_all(out, &[WHERE, LCURLY], &self.rule_stack(&["WhereClause"]));
            }
            Clause::Via => push_all(out, &[VAR1, VAR2, IRIREF, PNAME_LN, LCURLY], &query),
        }
    }

    fn slot_candidates(&self, slot: Slot, out: &mut Vec<CompletionCandidate>) {
        let not_triples = self.rule_stack(&["GraphPatternNotTriples"]);
        match slot {
            Slot::Subject => {
                let subject = self.rule_stack(&["TriplesBlock", "TriplesSameSubjectPath", "VarOrTerm"]);
                push_all(out, SUBJECT_TERMS, &subject);
                push_all(out, PATTERN_KEYWORDS, &not_triples);
                if self.variant == GrammarVariant::Stardog {
                    push_all(out, &[UNNEST], &not_triples);
                }
                push_all(out, &[LCURLY, RCURLY], &self.rule_stack(&[]));
            }
            Slot::Verb => {
                let path = self.rule_stack(&[
                    "TriplesBlock",
                    "TriplesSameSubjectPath",
                    "PropertyListPathNotEmpty",
                    "VerbPath",
                    "Path",
                    "PathPrimary",
                ]);
                push_all(out, PATH_TERMS, &path);
                let simple = self.rule_stack(&[
                    "TriplesBlock",
                    "TriplesSameSubjectPath",
                    "PropertyListPathNotEmpty",
                    "VerbSimple",
                ]);
                push_all(out, &[VAR1, VAR2], &simple);
            }
            Slot::Negated => {
                let mut one = VERB_PATH.to_vec();
                one.extend(["Path", "PathPrimary", "PathNegatedPropertySet", "PathOneInPropertySet"]);
                let stack = self.rule_stack(&one);
                push_all(out, PROPERTY_SET_TERMS, &stack);
                push_all(out, &[LPAREN], &stack);
            }
            Slot::Object => {
                let object = self.rule_stack(&[
                    "TriplesBlock",
                    "TriplesSameSubjectPath",
                    "PropertyListPathNotEmpty",
                    "ObjectListPath",
                    "ObjectPath",
                ]);
                push_all(out, OBJECT_TERMS, &object);
            }
            Slot::AfterObject => {
                let triples = self.rule_stack(&["TriplesBlock"]);
                push_all(out, &[PERIOD, SEMICOLON, COMMA], &triples);
                push_all(out, &[FILTER, OPTIONAL, MINUS, BIND], &not_triples);
                push_all(out, &[RCURLY], &self.rule_stack(&[]));
            }
            Slot::Block(keyword) => {
                let types: &[TokenType] = if keyword == GRAPH {
                    &[VAR1, VAR2, IRIREF, PNAME_LN, LCURLY]
                } else if keyword == SERVICE {
                    &[SILENT, VAR1, IRIREF, PNAME_LN, LCURLY]
                } else if keyword == VALUES {
                    &[VAR1, VAR2, LPAREN, LCURLY]
                } else if keyword == SELECT {
                    &[DISTINCT, STAR, VAR1, VAR2, WHERE, LCURLY]
                } else {
                    &[LCURLY]
                };
                push_all(out, types, &not_triples);
            }
            Slot::Call => {
                let constraint = self.rule_stack(&["GraphPatternNotTriples", "Filter", "Constraint"]);
                push_all(out, &[LPAREN, NOT, EXISTS], &constraint);
                push_all(out, BUILTIN_CALLS, &constraint);
            }
        }
    }
}

fn push_all(out: &mut Vec<CompletionCandidate>, types: &[TokenType], stack: &[String]) {
    out.extend(types.iter().map(|&next_token_type| CompletionCandidate {
        next_token_type,
        rule_stack: stack.to_vec(),
        replacement_range: None,
    }));
}
