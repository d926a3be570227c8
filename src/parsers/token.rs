//! Token stream, concrete syntax tree and content-assist types shared between
//! the grammar collaborator and the language features.
//!
//! All offsets are character offsets into the document text. A token's
//! `end_offset` is inclusive: the token `SELECT` starting at 0 ends at 5.

use std::fmt;

/// Closed set of terminal kinds the language features care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `?name`
    Var1,
    /// `$name`
    Var2,
    /// `prefix:` (a prefixed name with no local part)
    PnameNs,
    /// `prefix:local`
    PnameLn,
    /// `<http://...>`
    IriRef,
    /// The `a` shorthand for `rdf:type`
    A,
    /// Any reserved word of the grammar variant
    Keyword,
    StringLiteral,
    Integer,
    Decimal,
    BlankNodeLabel,
    LCurly,
    RCurly,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Period,
    Semicolon,
    Comma,
    Star,
    Operator,
    Unknown,
}

impl TokenKind {
    /// Keyword-set membership: reserved words plus the `a` shorthand.
    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Keyword | TokenKind::A)
    }
}

/// Identifier categories offered from the document regardless of grammar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Variable,
    Prefix,
    LocalName,
    IriRef,
}

impl TokenCategory {
    pub fn classify(kind: TokenKind) -> Option<TokenCategory> {
        match kind {
            TokenKind::Var1 | TokenKind::Var2 => Some(TokenCategory::Variable),
            TokenKind::PnameNs => Some(TokenCategory::Prefix),
            TokenKind::PnameLn => Some(TokenCategory::LocalName),
            TokenKind::IriRef => Some(TokenCategory::IriRef),
            _ => None,
        }
    }
}

/// Grammar terminal descriptor: its name, its literal surface pattern and its kind.
///
/// For keywords the pattern is the canonical spelling offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenType {
    pub name: &'static str,
    pub pattern: &'static str,
    pub kind: TokenKind,
}

impl TokenType {
    pub const fn new(name: &'static str, pattern: &'static str, kind: TokenKind) -> Self {
        Self { name, pattern, kind }
    }

    pub fn category(&self) -> Option<TokenCategory> {
        TokenCategory::classify(self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start_offset: usize,
    /// Inclusive.
    pub end_offset: usize,
    pub image: String,
    pub token_type: TokenType,
}

impl Token {
    pub fn new(start_offset: usize, image: impl Into<String>, token_type: TokenType) -> Self {
        let image = image.into();
        let len = image.chars().count().max(1);
        Self {
            start_offset,
            end_offset: start_offset + len - 1,
            image,
            token_type,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token_type.kind
    }

    /// Whether `offset` falls on one of this token's characters.
    pub fn contains(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset <= self.end_offset
    }

    /// Exclusive end, suitable for text edit ranges.
    pub fn end_exclusive(&self) -> usize {
        self.end_offset + 1
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?})@{}..={}",
            self.token_type.name, self.image, self.start_offset, self.end_offset
        )
    }
}

/// A named grammar rule with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    pub name: String,
    pub children: Vec<CstNode>,
}

impl RuleNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<CstNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Every token beneath this rule, in document order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        collect_tokens(self, &mut tokens);
        tokens
    }

    /// `(first start, last end)` over the tokens beneath this rule.
    pub fn span(&self) -> Option<(usize, usize)> {
        self.tokens().iter().fold(None, |acc, token| match acc {
            None => Some((token.start_offset, token.end_offset)),
            Some((start, end)) => Some((start.min(token.start_offset), end.max(token.end_offset))),
        })
    }
}

fn collect_tokens<'a>(rule: &'a RuleNode, out: &mut Vec<&'a Token>) {
    for child in &rule.children {
        match child {
            CstNode::Token(token) => out.push(token),
            CstNode::Rule(nested) => collect_tokens(nested, out),
        }
    }
}

/// A node of the concrete syntax tree: a leaf token or a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstNode {
    Token(Token),
    Rule(RuleNode),
}

impl CstNode {
    pub fn as_rule(&self) -> Option<&RuleNode> {
        match self {
            CstNode::Rule(rule) => Some(rule),
            CstNode::Token(_) => None,
        }
    }
}

impl From<Token> for CstNode {
    fn from(token: Token) -> Self {
        CstNode::Token(token)
    }
}

impl From<RuleNode> for CstNode {
    fn from(rule: RuleNode) -> Self {
        CstNode::Rule(rule)
    }
}

/// Half-open offset range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub start: usize,
    pub end: usize,
}

/// A grammar-valid next terminal at some parse position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub next_token_type: TokenType,
    /// Rule names from the root down to the point of expectation.
    pub rule_stack: Vec<String>,
    /// Overrides the default token-under-cursor replacement range.
    pub replacement_range: Option<OffsetRange>,
}

impl CompletionCandidate {
    pub fn new(next_token_type: TokenType, rule_stack: &[&str]) -> Self {
        Self {
            next_token_type,
            rule_stack: rule_stack.iter().map(|rule| rule.to_string()).collect(),
            replacement_range: None,
        }
    }

    pub fn with_replacement_range(mut self, range: OffsetRange) -> Self {
        self.replacement_range = Some(range);
        self
    }
}

/// A recoverable parse problem, anchored at a token when one is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub token: Option<Token>,
}

impl ParseError {
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: Some(token.clone()),
        }
    }
}

/// Everything a single parse of a document snapshot produces.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub tokens: Vec<Token>,
    pub cst: RuleNode,
    pub errors: Vec<ParseError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VAR: TokenType = TokenType::new("VAR1", "?", TokenKind::Var1);
    const LCURLY: TokenType = TokenType::new("LCurly", "{", TokenKind::LCurly);

    #[test]
    fn test_token_end_offset_is_inclusive() {
        let token = Token::new(4, "?name", VAR);
        assert_eq!(token.end_offset, 8);
        assert_eq!(token.end_exclusive(), 9);
        assert!(token.contains(4));
        assert!(token.contains(8));
        assert!(!token.contains(9));
    }

    #[test]
    fn test_classify_categories() {
        assert_eq!(TokenCategory::classify(TokenKind::Var2), Some(TokenCategory::Variable));
        assert_eq!(TokenCategory::classify(TokenKind::PnameNs), Some(TokenCategory::Prefix));
        assert_eq!(TokenCategory::classify(TokenKind::PnameLn), Some(TokenCategory::LocalName));
        assert_eq!(TokenCategory::classify(TokenKind::IriRef), Some(TokenCategory::IriRef));
        assert_eq!(TokenCategory::classify(TokenKind::Keyword), None);
        assert!(TokenKind::A.is_keyword());
    }

    #[test]
    fn test_rule_span_covers_nested_tokens() {
        let rule = RuleNode::with_children(
            "GroupGraphPattern",
            vec![
                Token::new(10, "{", LCURLY).into(),
                RuleNode::with_children("TriplesBlock", vec![Token::new(12, "?s", VAR).into()]).into(),
            ],
        );
        assert_eq!(rule.span(), Some((10, 13)));
        assert_eq!(rule.tokens().len(), 2);
        assert_eq!(RuleNode::new("Empty").span(), None);
    }
}
