//! Terminal table for both SPARQL variants.

use crate::parsers::GrammarVariant;
use crate::parsers::token::{TokenKind, TokenType};

pub const VAR1: TokenType = TokenType::new("VAR1", "?", TokenKind::Var1);
pub const VAR2: TokenType = TokenType::new("VAR2", "$", TokenKind::Var2);
pub const PNAME_NS: TokenType = TokenType::new("PNAME_NS", "prefix:", TokenKind::PnameNs);
pub const PNAME_LN: TokenType = TokenType::new("PNAME_LN", "prefix:local", TokenKind::PnameLn);
pub const IRIREF: TokenType = TokenType::new("IRIREF", "<>", TokenKind::IriRef);
pub const A: TokenType = TokenType::new("A", "a", TokenKind::A);
pub const STRING_LITERAL: TokenType = TokenType::new("STRING_LITERAL", "\"\"", TokenKind::StringLiteral);
pub const INTEGER: TokenType = TokenType::new("INTEGER", "0", TokenKind::Integer);
pub const DECIMAL: TokenType = TokenType::new("DECIMAL", "0.0", TokenKind::Decimal);
pub const BLANK_NODE_LABEL: TokenType = TokenType::new("BLANK_NODE_LABEL", "_:", TokenKind::BlankNodeLabel);
pub const LANGTAG: TokenType = TokenType::new("LANGTAG", "@", TokenKind::Operator);
pub const LCURLY: TokenType = TokenType::new("LCurly", "{", TokenKind::LCurly);
pub const RCURLY: TokenType = TokenType::new("RCurly", "}", TokenKind::RCurly);
pub const LPAREN: TokenType = TokenType::new("LParen", "(", TokenKind::LParen);
pub const RPAREN: TokenType = TokenType::new("RParen", ")", TokenKind::RParen);
pub const LBRACKET: TokenType = TokenType::new("LBracket", "[", TokenKind::LBracket);
pub const RBRACKET: TokenType = TokenType::new("RBracket", "]", TokenKind::RBracket);
pub const PERIOD: TokenType = TokenType::new("Period", ".", TokenKind::Period);
pub const SEMICOLON: TokenType = TokenType::new("Semicolon", ";", TokenKind::Semicolon);
pub const COMMA: TokenType = TokenType::new("Comma", ",", TokenKind::Comma);
pub const STAR: TokenType = TokenType::new("Star", "*", TokenKind::Star);
pub const OPERATOR: TokenType = TokenType::new("Operator", "", TokenKind::Operator);
pub const UNKNOWN: TokenType = TokenType::new("Unknown", "", TokenKind::Unknown);

const fn kw(word: &'static str) -> TokenType {
    TokenType::new(word, word, TokenKind::Keyword)
}

pub const SELECT: TokenType = kw("SELECT");
pub const CONSTRUCT: TokenType = kw("CONSTRUCT");
pub const DESCRIBE: TokenType = kw("DESCRIBE");
pub const ASK: TokenType = kw("ASK");
pub const WHERE: TokenType = kw("WHERE");
pub const FROM: TokenType = kw("FROM");
pub const NAMED: TokenType = kw("NAMED");
pub const PREFIX: TokenType = kw("PREFIX");
pub const BASE: TokenType = kw("BASE");
pub const DISTINCT: TokenType = kw("DISTINCT");
pub const REDUCED: TokenType = kw("REDUCED");
pub const AS: TokenType = kw("AS");
pub const ORDER: TokenType = kw("ORDER");
pub const GROUP: TokenType = kw("GROUP");
pub const BY: TokenType = kw("BY");
pub const ASC: TokenType = kw("ASC");
pub const DESC: TokenType = kw("DESC");
pub const HAVING: TokenType = kw("HAVING");
pub const LIMIT: TokenType = kw("LIMIT");
pub const OFFSET: TokenType = kw("OFFSET");
pub const VALUES: TokenType = kw("VALUES");
pub const OPTIONAL: TokenType = kw("OPTIONAL");
pub const UNION: TokenType = kw("UNION");
pub const MINUS: TokenType = kw("MINUS");
pub const GRAPH: TokenType = kw("GRAPH");
pub const SERVICE: TokenType = kw("SERVICE");
pub const SILENT: TokenType = kw("SILENT");
pub const FILTER: TokenType = kw("FILTER");
pub const BIND: TokenType = kw("BIND");
pub const EXISTS: TokenType = kw("EXISTS");
pub const NOT: TokenType = kw("NOT");
pub const IN: TokenType = kw("IN");
pub const UNDEF: TokenType = kw("UNDEF");
pub const TRUE: TokenType = TokenType::new("TRUE", "true", TokenKind::Keyword);
pub const FALSE: TokenType = TokenType::new("FALSE", "false", TokenKind::Keyword);

// Stardog extensions
pub const PATHS: TokenType = kw("PATHS");
pub const START: TokenType = kw("START");
pub const END: TokenType = kw("END");
pub const VIA: TokenType = kw("VIA");
pub const CYCLIC: TokenType = kw("CYCLIC");
pub const SHORTEST: TokenType = kw("SHORTEST");
pub const ALL: TokenType = kw("ALL");
pub const UNNEST: TokenType = kw("UNNEST");

/// Built-in call names valid inside expressions.
pub const BUILTIN_CALLS: &[TokenType] = &[
    kw("STR"),
    kw("LANG"),
    kw("LANGMATCHES"),
    kw("DATATYPE"),
    kw("BOUND"),
    kw("IRI"),
    kw("URI"),
    kw("BNODE"),
    kw("RAND"),
    kw("ABS"),
    kw("CEIL"),
    kw("FLOOR"),
    kw("ROUND"),
    kw("CONCAT"),
    kw("STRLEN"),
    kw("UCASE"),
    kw("LCASE"),
    kw("CONTAINS"),
    kw("STRSTARTS"),
    kw("STRENDS"),
    kw("STRBEFORE"),
    kw("STRAFTER"),
    kw("REPLACE"),
    kw("REGEX"),
    kw("SUBSTR"),
    kw("ENCODE_FOR_URI"),
    kw("NOW"),
    kw("YEAR"),
    kw("MONTH"),
    kw("DAY"),
    kw("HOURS"),
    kw("MINUTES"),
    kw("SECONDS"),
    kw("TIMEZONE"),
    kw("TZ"),
    kw("UUID"),
    kw("STRUUID"),
    kw("MD5"),
    kw("SHA1"),
    kw("SHA256"),
    kw("SHA384"),
    kw("SHA512"),
    kw("COALESCE"),
    kw("IF"),
    kw("STRLANG"),
    kw("STRDT"),
    kw("SAMETERM"),
    kw("ISIRI"),
    kw("ISURI"),
    kw("ISBLANK"),
    kw("ISLITERAL"),
    kw("ISNUMERIC"),
    kw("COUNT"),
    kw("SUM"),
    kw("MIN"),
    kw("MAX"),
    kw("AVG"),
    kw("SAMPLE"),
    kw("GROUP_CONCAT"),
    kw("SEPARATOR"),
];

const W3_KEYWORDS: &[TokenType] = &[
    SELECT, CONSTRUCT, DESCRIBE, ASK, WHERE, FROM, NAMED, PREFIX, BASE, DISTINCT, REDUCED, AS,
    ORDER, GROUP, BY, ASC, DESC, HAVING, LIMIT, OFFSET, VALUES, OPTIONAL, UNION, MINUS, GRAPH,
    SERVICE, SILENT, FILTER, BIND, EXISTS, NOT, IN, UNDEF, TRUE, FALSE,
    kw("INSERT"),
    kw("DELETE"),
    kw("DATA"),
    kw("WITH"),
    kw("USING"),
    kw("DEFAULT"),
    kw("LOAD"),
    kw("CLEAR"),
    kw("DROP"),
    kw("CREATE"),
    kw("ADD"),
    kw("MOVE"),
    kw("COPY"),
    kw("INTO"),
    kw("TO"),
    ALL,
];

const STARDOG_KEYWORDS: &[TokenType] = &[PATHS, START, END, VIA, CYCLIC, SHORTEST, UNNEST];

/// Look up a reserved word, case-insensitively.
pub fn keyword(variant: GrammarVariant, word: &str) -> Option<TokenType> {
    let extensions: &[TokenType] = match variant {
        GrammarVariant::W3 => &[],
        GrammarVariant::Stardog => STARDOG_KEYWORDS,
    };
    W3_KEYWORDS
        .iter()
        .chain(BUILTIN_CALLS)
        .chain(extensions)
        .find(|tt| tt.pattern.eq_ignore_ascii_case(word))
        .copied()
}
