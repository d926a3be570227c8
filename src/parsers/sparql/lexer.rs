//! Character-offset lexer.
//!
//! Never fails: characters it cannot place become `Unknown` tokens and each
//! problem is reported alongside the tokens.

use crate::parsers::GrammarVariant;
use crate::parsers::token::{ParseError, Token, TokenType};

use super::terminals::{self, keyword};

pub(super) struct Lexer {
    chars: Vec<char>,
    pos: usize,
    variant: GrammarVariant,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_pn_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn is_iri_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'))
}

impl Lexer {
    pub(super) fn new(text: &str, variant: GrammarVariant) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            variant,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(super) fn tokenize(mut self) -> (Vec<Token>, Vec<ParseError>) {
        while let Some(c) = self.peek(0) {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }
            match c {
                '#' => self.skip_comment(),
                '<' => self.lex_angle(),
                '?' => self.lex_variable(terminals::VAR1),
                '$' => self.lex_variable(terminals::VAR2),
                '"' | '\'' => self.lex_string(c),
                '@' => self.lex_langtag(),
                '_' if self.peek(1) == Some(':') => self.lex_blank_node(),
                c if c.is_ascii_digit() => self.lex_number(),
                c if c.is_alphabetic() || c == ':' => self.lex_word(),
                _ => self.lex_punctuation(c),
            }
        }
        (self.tokens, self.errors)
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn emit(&mut self, start: usize, end: usize, token_type: TokenType) {
        let image = self.slice(start, end);
        self.tokens.push(Token::new(start, image, token_type));
        self.pos = end;
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn scan_while(&self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        let mut end = from;
        while end < self.chars.len() && pred(self.chars[end]) {
            end += 1;
        }
        end
    }

    fn lex_angle(&mut self) {
        let start = self.pos;
        let end = self.scan_while(start + 1, is_iri_char);
        if self.chars.get(end) == Some(&'>') {
            self.emit(start, end + 1, terminals::IRIREF);
        } else if self.peek(1) == Some('=') {
            self.emit(start, start + 2, terminals::OPERATOR);
        } else if end > start + 1 && self.chars.get(start + 1).is_some_and(|c| c.is_alphabetic()) {
            // `<http://example.org/partial` while typing
            self.emit(start, end, terminals::IRIREF);
            if let Some(token) = self.tokens.last() {
                self.errors.push(ParseError::at(token, "unterminated IRI reference"));
            }
        } else {
            self.emit(start, start + 1, terminals::OPERATOR);
        }
    }

    fn lex_variable(&mut self, token_type: TokenType) {
        let start = self.pos;
        let end = self.scan_while(start + 1, is_name_char);
        self.emit(start, end, token_type);
    }

    fn lex_string(&mut self, quote: char) {
        let start = self.pos;
        let mut end = start + 1;
        let mut closed = false;
        while end < self.chars.len() {
            match self.chars[end] {
                '\\' => end += 2,
                '\n' => break,
                c if c == quote => {
                    end += 1;
                    closed = true;
                    break;
                }
                _ => end += 1,
            }
        }
        let end = end.min(self.chars.len());
        self.emit(start, end, terminals::STRING_LITERAL);
        if !closed {
            if let Some(token) = self.tokens.last() {
                self.errors.push(ParseError::at(token, "unterminated string literal"));
            }
        }
    }

    fn lex_langtag(&mut self) {
        let start = self.pos;
        let end = self.scan_while(start + 1, |c| c.is_ascii_alphanumeric() || c == '-');
        if end == start + 1 {
            self.unknown(start);
        } else {
            self.emit(start, end, terminals::LANGTAG);
        }
    }

    fn lex_blank_node(&mut self) {
        let start = self.pos;
        let end = self.scan_while(start + 2, is_name_char);
        self.emit(start, end, terminals::BLANK_NODE_LABEL);
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        let mut end = self.scan_while(start, |c| c.is_ascii_digit());
        let decimal = self.chars.get(end) == Some(&'.')
            && self.chars.get(end + 1).is_some_and(|c| c.is_ascii_digit());
        if decimal {
            end = self.scan_while(end + 1, |c| c.is_ascii_digit());
            self.emit(start, end, terminals::DECIMAL);
        } else {
            self.emit(start, end, terminals::INTEGER);
        }
    }

    /// Trailing periods terminate a triple and are never part of a name.
    fn trim_trailing_periods(&self, start: usize, mut end: usize) -> usize {
        while end > start && self.chars[end - 1] == '.' {
            end -= 1;
        }
        end
    }

    fn lex_word(&mut self) {
        let start = self.pos;
        let prefix_end = self.scan_while(start, is_pn_char);
        if self.chars.get(prefix_end) == Some(&':') {
            let local_start = prefix_end + 1;
            let end = self.scan_while(local_start, |c| is_pn_char(c) || c == ':' || c == '%');
            let end = self.trim_trailing_periods(local_start, end);
            let token_type = if end == local_start {
                terminals::PNAME_NS
            } else {
                terminals::PNAME_LN
            };
            self.emit(start, end, token_type);
            return;
        }

        let end = self.trim_trailing_periods(start, prefix_end);
        let word = self.slice(start, end);
        if word == "a" {
            self.emit(start, end, terminals::A);
        } else if let Some(token_type) = keyword(self.variant, &word) {
            self.emit(start, end, token_type);
        } else {
            self.emit(start, end, terminals::UNKNOWN);
            if let Some(token) = self.tokens.last() {
                self.errors.push(ParseError::at(token, format!("unexpected word '{}'", word)));
            }
        }
    }

    fn lex_punctuation(&mut self, c: char) {
        let start = self.pos;
        let token_type = match c {
            '{' => terminals::LCURLY,
            '}' => terminals::RCURLY,
            '(' => terminals::LPAREN,
            ')' => terminals::RPAREN,
            '[' => terminals::LBRACKET,
            ']' => terminals::RBRACKET,
            '.' => terminals::PERIOD,
            ';' => terminals::SEMICOLON,
            ',' => terminals::COMMA,
            '*' => terminals::STAR,
            '=' | '+' | '-' | '/' | '^' | '|' | '&' | '!' | '>' => {
                let doubled = matches!(
                    (c, self.peek(1)),
                    ('^', Some('^')) | ('|', Some('|')) | ('&', Some('&')) | ('!', Some('=')) | ('>', Some('='))
                );
                let len = if doubled { 2 } else { 1 };
                self.emit(start, start + len, terminals::OPERATOR);
                return;
            }
            _ => {
                self.unknown(start);
                return;
            }
        };
        self.emit(start, start + 1, token_type);
    }

    fn unknown(&mut self, start: usize) {
        self.emit(start, start + 1, terminals::UNKNOWN);
        if let Some(token) = self.tokens.last() {
            let message = format!("unexpected character '{}'", token.image);
            self.errors.push(ParseError::at(token, message));
        }
    }
}
