//! Error-tolerant concrete syntax tree construction.
//!
//! The builder never stops early: unexpected tokens are attached to the
//! enclosing rule and reported, unclosed blocks are closed at end of input.

use crate::parsers::token::{CstNode, ParseError, RuleNode, Token, TokenKind, TokenType};

use super::terminals::{
    ASK, BASE, BIND, CONSTRUCT, DESCRIBE, FALSE, FILTER, FROM, GRAPH, GROUP, HAVING, LANGTAG,
    LIMIT, MINUS, NAMED, OFFSET, OPTIONAL, ORDER, PATHS, PREFIX, SELECT, SERVICE, TRUE, UNION,
    UNNEST, VALUES, VIA, WHERE,
};

const QUERY_STARTERS: &[TokenType] = &[PREFIX, BASE, SELECT, CONSTRUCT, ASK, DESCRIBE, PATHS, FROM, WHERE];
const MODIFIERS: &[TokenType] = &[ORDER, GROUP, HAVING, LIMIT, OFFSET, VALUES];

fn is_term_start(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Var1
            | TokenKind::Var2
            | TokenKind::IriRef
            | TokenKind::PnameLn
            | TokenKind::PnameNs
            | TokenKind::StringLiteral
            | TokenKind::Integer
            | TokenKind::Decimal
            | TokenKind::BlankNodeLabel
            | TokenKind::LBracket
            | TokenKind::LParen
    ) || token.token_type == TRUE
        || token.token_type == FALSE
}

fn is_verb_start(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::Var1
            | TokenKind::Var2
            | TokenKind::IriRef
            | TokenKind::PnameLn
            | TokenKind::PnameNs
            | TokenKind::A
            | TokenKind::LParen
    ) || is_operator(token, "^")
        || is_operator(token, "!")
}

fn is_operator(token: &Token, image: &str) -> bool {
    token.kind() == TokenKind::Operator && token.image == image
}

fn is_path_iri(token: &Token) -> bool {
    matches!(
        token.kind(),
        TokenKind::IriRef | TokenKind::PnameLn | TokenKind::PnameNs | TokenKind::A
    )
}

pub(super) struct CstBuilder<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> CstBuilder<'a> {
    pub(super) fn build(tokens: &'a [Token]) -> (RuleNode, Vec<ParseError>) {
        let mut builder = Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        };
        let root = builder.document();
        (root, builder.errors)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, token_type: TokenType) -> bool {
        self.peek().is_some_and(|t| t.token_type == token_type)
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind() == kind)
    }

    fn at_any(&self, types: &[TokenType]) -> bool {
        self.peek().is_some_and(|t| types.contains(&t.token_type))
    }

    fn bump(&mut self, node: &mut RuleNode) {
        if let Some(token) = self.peek() {
            node.children.push(CstNode::Token(token.clone()));
            self.pos += 1;
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let anchor = self
            .peek()
            .or_else(|| self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)));
        self.errors.push(ParseError {
            message: message.into(),
            token: anchor.cloned(),
        });
    }

    fn document(&mut self) -> RuleNode {
        let mut root = RuleNode::new("SparqlDoc");
        while let Some(token) = self.peek() {
            let tt = token.token_type;
            let child = if tt == PREFIX || tt == BASE {
                self.prologue()
            } else if tt == SELECT {
                self.clause("SelectClause")
            } else if tt == CONSTRUCT {
                self.construct()
            } else if tt == ASK {
                self.clause("AskQuery")
            } else if tt == DESCRIBE {
                self.clause("DescribeQuery")
            } else if tt == PATHS {
                self.path_query()
            } else if tt == FROM {
                self.dataset_clause()
            } else if tt == WHERE || token.kind() == TokenKind::LCurly {
                self.where_clause()
            } else if MODIFIERS.contains(&tt) {
                self.solution_modifier()
            } else {
                if token.kind() != TokenKind::Unknown {
                    self.error(format!("unexpected '{}'", token.image));
                }
                self.bump(&mut root);
                continue;
            };
            root.children.push(child.into());
        }
        root
    }

    fn prologue(&mut self) -> RuleNode {
        let mut node = RuleNode::new("Prologue");
        loop {
            if self.at(PREFIX) {
                let mut decl = RuleNode::new("PrefixDecl");
                self.bump(&mut decl);
                if self.at_kind(TokenKind::PnameNs) {
                    self.bump(&mut decl);
                } else {
                    self.error("expected a prefix name after PREFIX");
                }
                if self.at_kind(TokenKind::IriRef) {
                    self.bump(&mut decl);
                } else {
                    self.error("expected an IRI for the prefix declaration");
                }
                node.children.push(decl.into());
            } else if self.at(BASE) {
                let mut decl = RuleNode::new("BaseDecl");
                self.bump(&mut decl);
                if self.at_kind(TokenKind::IriRef) {
                    self.bump(&mut decl);
                } else {
                    self.error("expected an IRI after BASE");
                }
                node.children.push(decl.into());
            } else {
                return node;
            }
        }
    }

    /// A keyword-led clause running up to the group pattern or the next clause.
    fn clause(&mut self, name: &str) -> RuleNode {
        let mut node = RuleNode::new(name);
        self.bump(&mut node);
        while let Some(token) = self.peek() {
            if token.kind() == TokenKind::LCurly
                || token.kind() == TokenKind::RCurly
                || self.at_any(QUERY_STARTERS)
                || self.at_any(MODIFIERS)
            {
                break;
            }
            if token.kind() == TokenKind::LParen {
                let expression = self.parenthesized("Expression");
                node.children.push(expression.into());
            } else {
                self.bump(&mut node);
            }
        }
        node
    }

    fn construct(&mut self) -> RuleNode {
        let mut node = RuleNode::new("ConstructQuery");
        self.bump(&mut node);
        if self.at_kind(TokenKind::LCurly) {
            let template = self.group("ConstructTemplate");
            node.children.push(template.into());
        }
        node
    }

    fn path_query(&mut self) -> RuleNode {
        let mut node = RuleNode::new("PathQuery");
        self.bump(&mut node);
        while let Some(token) = self.peek() {
            if token.kind() == TokenKind::LCurly {
                let after_via = node
                    .children
                    .last()
                    .is_some_and(|c| matches!(c, CstNode::Token(t) if t.token_type == VIA));
                if !after_via {
                    break;
                }
                let via = self.group("GroupGraphPattern");
                node.children.push(via.into());
            } else if token.kind() == TokenKind::RCurly
                || self.at_any(QUERY_STARTERS)
                || self.at_any(MODIFIERS)
            {
                break;
            } else if token.kind() == TokenKind::LParen {
                let expression = self.parenthesized("Expression");
                node.children.push(expression.into());
            } else {
                self.bump(&mut node);
            }
        }
        node
    }

    fn dataset_clause(&mut self) -> RuleNode {
        let mut node = RuleNode::new("DatasetClause");
        self.bump(&mut node);
        if self.at(NAMED) {
            self.bump(&mut node);
        }
        if self.at_kind(TokenKind::IriRef) || self.at_kind(TokenKind::PnameLn) {
            self.bump(&mut node);
        } else {
            self.error("expected a graph IRI after FROM");
        }
        node
    }

    fn where_clause(&mut self) -> RuleNode {
        let mut node = RuleNode::new("WhereClause");
        if self.at(WHERE) {
            self.bump(&mut node);
        }
        if self.at_kind(TokenKind::LCurly) {
            let group = self.group("GroupGraphPattern");
            node.children.push(group.into());
        } else {
            self.error("expected '{' to open the WHERE clause");
        }
        node
    }

    fn solution_modifier(&mut self) -> RuleNode {
        let mut node = RuleNode::new("SolutionModifier");
        while let Some(token) = self.peek() {
            if self.at_any(QUERY_STARTERS) {
                break;
            }
            match token.kind() {
                TokenKind::LCurly => {
                    let data = self.balanced("DataBlock", TokenKind::LCurly, TokenKind::RCurly);
                    node.children.push(data.into());
                }
                TokenKind::LParen => {
                    let expression = self.parenthesized("Expression");
                    node.children.push(expression.into());
                }
                TokenKind::RCurly => {
                    self.error("unexpected '}'");
                    self.bump(&mut node);
                }
                _ => self.bump(&mut node),
            }
        }
        node
    }

    fn group(&mut self, name: &str) -> RuleNode {
        let mut node = RuleNode::new(name);
        let open = self.peek().cloned();
        self.bump(&mut node);
        loop {
            let Some(token) = self.peek() else {
                self.errors.push(ParseError {
                    message: "unclosed '{'".to_string(),
                    token: open,
                });
                break;
            };
            let tt = token.token_type;
            match token.kind() {
                TokenKind::RCurly => {
                    self.bump(&mut node);
                    break;
                }
                TokenKind::LCurly => {
                    let nested = self.group("GroupGraphPattern");
                    node.children.push(nested.into());
                }
                TokenKind::Period | TokenKind::Unknown => self.bump(&mut node),
                _ if tt == OPTIONAL || tt == MINUS || tt == GRAPH || tt == SERVICE => {
                    let pattern = self.pattern_not_triples(tt);
                    node.children.push(pattern.into());
                }
                _ if tt == FILTER || tt == BIND || tt == UNNEST => {
                    let call = self.call(tt);
                    node.children.push(call.into());
                }
                _ if tt == VALUES => {
                    let data = self.inline_data();
                    node.children.push(data.into());
                }
                _ if tt == SELECT => {
                    let sub_select = self.sub_select();
                    node.children.push(sub_select.into());
                }
                _ if tt == UNION => self.bump(&mut node),
                _ if is_term_start(token) => {
                    let triples = self.triples_block();
                    node.children.push(triples.into());
                }
                _ => {
                    self.error(format!("unexpected '{}' in group pattern", token.image));
                    self.bump(&mut node);
                }
            }
        }
        node
    }

    fn pattern_not_triples(&mut self, keyword: TokenType) -> RuleNode {
        let name = if keyword == OPTIONAL {
            "OptionalGraphPattern"
        } else if keyword == MINUS {
            "MinusGraphPattern"
        } else if keyword == GRAPH {
            "GraphGraphPattern"
        } else {
            "ServiceGraphPattern"
        };
        let mut node = RuleNode::new(name);
        self.bump(&mut node);
        while let Some(token) = self.peek() {
            if matches!(token.kind(), TokenKind::LCurly | TokenKind::RCurly) {
                break;
            }
            self.bump(&mut node);
        }
        if self.at_kind(TokenKind::LCurly) {
            let group = self.group("GroupGraphPattern");
            node.children.push(group.into());
        } else {
            self.error(format!("expected '{{' after {}", keyword.pattern));
        }
        node
    }

    fn call(&mut self, keyword: TokenType) -> RuleNode {
        let name = if keyword == FILTER {
            "Filter"
        } else if keyword == BIND {
            "Bind"
        } else {
            "Unnest"
        };
        let mut node = RuleNode::new(name);
        self.bump(&mut node);
        if self.at_kind(TokenKind::LParen) {
            let constraint = self.parenthesized("BrackettedExpression");
            node.children.push(constraint.into());
            return node;
        }
        let is_function = self.peek().is_some_and(|t| {
            matches!(t.kind(), TokenKind::Keyword | TokenKind::IriRef | TokenKind::PnameLn)
        });
        if is_function {
            let mut function_call = RuleNode::new("FunctionCall");
            self.bump(&mut function_call);
            if self.at_kind(TokenKind::LParen) {
                let args = self.parenthesized("ArgList");
                function_call.children.push(args.into());
            }
            node.children.push(function_call.into());
        } else {
            self.error(format!("expected '(' after {}", keyword.pattern));
        }
        node
    }

    fn inline_data(&mut self) -> RuleNode {
        let mut node = RuleNode::new("InlineData");
        self.bump(&mut node);
        while let Some(token) = self.peek() {
            match token.kind() {
                TokenKind::LCurly => {
                    let data = self.balanced("DataBlock", TokenKind::LCurly, TokenKind::RCurly);
                    node.children.push(data.into());
                    break;
                }
                TokenKind::RCurly => break,
                _ => self.bump(&mut node),
            }
        }
        node
    }

    fn sub_select(&mut self) -> RuleNode {
        let mut node = RuleNode::new("SubSelect");
        let select = self.clause("SelectClause");
        node.children.push(select.into());
        if self.at(WHERE) || self.at_kind(TokenKind::LCurly) {
            let where_clause = self.where_clause();
            node.children.push(where_clause.into());
        }
        node
    }

    /// `( ... )` with nesting; `EXISTS { ... }` blocks inside are full groups.
    fn parenthesized(&mut self, name: &str) -> RuleNode {
        let mut node = RuleNode::new(name);
        let open = self.peek().cloned();
        self.bump(&mut node);
        let mut depth = 1usize;
        loop {
            let Some(token) = self.peek() else {
                self.errors.push(ParseError {
                    message: "unclosed '('".to_string(),
                    token: open,
                });
                break;
            };
            match token.kind() {
                TokenKind::LParen => {
                    depth += 1;
                    self.bump(&mut node);
                }
                TokenKind::RParen => {
                    self.bump(&mut node);
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::LCurly => {
                    let group = self.group("GroupGraphPattern");
                    node.children.push(group.into());
                }
                TokenKind::RCurly => {
                    self.errors.push(ParseError {
                        message: "unclosed '('".to_string(),
                        token: open,
                    });
                    break;
                }
                _ => self.bump(&mut node),
            }
        }
        node
    }

    fn balanced(&mut self, name: &str, open_kind: TokenKind, close_kind: TokenKind) -> RuleNode {
        let mut node = RuleNode::new(name);
        let open = self.peek().cloned();
        self.bump(&mut node);
        let mut depth = 1usize;
        while let Some(token) = self.peek() {
            let kind = token.kind();
            self.bump(&mut node);
            if kind == open_kind {
                depth += 1;
            } else if kind == close_kind {
                depth -= 1;
                if depth == 0 {
                    return node;
                }
            }
        }
        self.errors.push(ParseError {
            message: format!("unclosed '{}'", open.as_ref().map_or("", |t| t.image.as_str())),
            token: open,
        });
        node
    }

    fn triples_block(&mut self) -> RuleNode {
        let mut node = RuleNode::new("TriplesBlock");
        loop {
            let triples = self.triples_same_subject();
            node.children.push(triples.into());
            if !self.at_kind(TokenKind::Period) {
                break;
            }
            self.bump(&mut node);
            if !self.peek().is_some_and(is_term_start) {
                break;
            }
        }
        node
    }

    fn triples_same_subject(&mut self) -> RuleNode {
        let mut node = RuleNode::new("TriplesSameSubjectPath");
        let bracketed = self.at_kind(TokenKind::LBracket);
        let subject = self.term("VarOrTerm");
        node.children.push(subject.into());
        if self.peek().is_some_and(is_verb_start) {
            let properties = self.property_list();
            node.children.push(properties.into());
        } else if !bracketed {
            self.error("incomplete triple pattern: expected a predicate");
        }
        node
    }

    fn property_list(&mut self) -> RuleNode {
        let mut node = RuleNode::new("PropertyListPathNotEmpty");
        loop {
            let verb = self.verb();
            node.children.push(verb.into());
            if self.peek().is_some_and(is_term_start) {
                let objects = self.object_list();
                node.children.push(objects.into());
            } else {
                self.error("incomplete triple pattern: expected an object");
            }
            if !self.at_kind(TokenKind::Semicolon) {
                break;
            }
            while self.at_kind(TokenKind::Semicolon) {
                self.bump(&mut node);
            }
            if !self.peek().is_some_and(is_verb_start) {
                break;
            }
        }
        node
    }

    fn verb(&mut self) -> RuleNode {
        let mut node = RuleNode::new("Verb");
        if self.at_kind(TokenKind::Var1) || self.at_kind(TokenKind::Var2) {
            let mut simple = RuleNode::new("VerbSimple");
            self.bump(&mut simple);
            node.children.push(simple.into());
            return node;
        }
        loop {
            if self.peek().is_some_and(|t| is_operator(t, "^")) {
                self.bump(&mut node);
            }
            if self.peek().is_some_and(|t| is_operator(t, "!")) {
                let negated = self.negated_property_set();
                let mut primary = RuleNode::new("PathPrimary");
                primary.children.push(negated.into());
                node.children.push(primary.into());
            } else if self.at_kind(TokenKind::LParen) {
                let group = self.parenthesized("PathPrimary");
                node.children.push(group.into());
            } else if self.peek().is_some_and(is_path_iri) {
                let mut primary = RuleNode::new("PathPrimary");
                self.bump(&mut primary);
                node.children.push(primary.into());
            } else {
                break;
            }
            if self.at_kind(TokenKind::Star)
                || self.peek().is_some_and(|t| is_operator(t, "+"))
            {
                self.bump(&mut node);
            }
            let continues = self.peek().is_some_and(|t| is_operator(t, "/") || is_operator(t, "|"));
            if !continues {
                break;
            }
            self.bump(&mut node);
        }
        node
    }

    /// `!iri` or `!( iri | ^iri ... )`.
    fn negated_property_set(&mut self) -> RuleNode {
        let mut node = RuleNode::new("PathNegatedPropertySet");
        self.bump(&mut node);
        if self.at_kind(TokenKind::LParen) {
            let set = self.parenthesized("PathNegatedPropertySet");
            node.children.extend(set.children);
        } else {
            if self.peek().is_some_and(|t| is_operator(t, "^")) {
                self.bump(&mut node);
            }
            if self.peek().is_some_and(is_path_iri) {
                let mut one = RuleNode::new("PathOneInPropertySet");
                self.bump(&mut one);
                node.children.push(one.into());
            } else {
                self.error("expected an IRI after '!'");
            }
        }
        node
    }

    fn object_list(&mut self) -> RuleNode {
        let mut node = RuleNode::new("ObjectListPath");
        loop {
            let object = self.term("ObjectPath");
            node.children.push(object.into());
            if !self.at_kind(TokenKind::Comma) {
                break;
            }
            self.bump(&mut node);
            if !self.peek().is_some_and(is_term_start) {
                self.error("expected an object after ','");
                break;
            }
        }
        node
    }

    fn term(&mut self, name: &str) -> RuleNode {
        match self.peek().map(Token::kind) {
            Some(TokenKind::LBracket) => {
                let mut node = RuleNode::new(name);
                let list = self.balanced("BlankNodePropertyList", TokenKind::LBracket, TokenKind::RBracket);
                node.children.push(list.into());
                node
            }
            Some(TokenKind::LParen) => {
                let mut node = RuleNode::new(name);
                let collection = self.balanced("Collection", TokenKind::LParen, TokenKind::RParen);
                node.children.push(collection.into());
                node
            }
            Some(TokenKind::StringLiteral) => {
                let mut node = RuleNode::new("RDFLiteral");
                self.bump(&mut node);
                if self.at(LANGTAG) {
                    self.bump(&mut node);
                } else if self.peek().is_some_and(|t| t.kind() == TokenKind::Operator && t.image == "^^") {
                    self.bump(&mut node);
                    if self.at_kind(TokenKind::IriRef) || self.at_kind(TokenKind::PnameLn) {
                        self.bump(&mut node);
                    }
                }
                RuleNode::with_children(name, vec![node.into()])
            }
            _ => {
                let mut node = RuleNode::new(name);
                self.bump(&mut node);
                node
            }
        }
    }
}
