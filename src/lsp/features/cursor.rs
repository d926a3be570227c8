//! Mapping a cursor offset onto the token stream.

use crate::parsers::Token;

/// The token under the cursor and its neighbourhood.
#[derive(Debug, Clone, Copy)]
pub struct CursorContext<'t> {
    pub index: usize,
    pub token: &'t Token,
    /// Tokens strictly before the cursor token.
    pub before: &'t [Token],
    /// Tokens strictly after the cursor token.
    pub after: &'t [Token],
}

impl<'t> CursorContext<'t> {
    /// The token immediately preceding the cursor token.
    pub fn previous(&self) -> Option<&'t Token> {
        self.before.last()
    }

    /// Every token except the cursor token, in document order.
    pub fn before_and_after(&self) -> impl Iterator<Item = &'t Token> {
        self.before.iter().chain(self.after.iter())
    }
}

/// Index of the first token with `start <= offset <= end + 1`.
///
/// The position just past a token's last character still counts as inside
/// it, which is where the cursor sits while typing.
pub fn resolve(tokens: &[Token], offset: usize) -> Option<usize> {
    tokens
        .iter()
        .position(|token| token.start_offset <= offset && offset <= token.end_offset + 1)
}

pub fn cursor_context(tokens: &[Token], offset: usize) -> Option<CursorContext<'_>> {
    let index = resolve(tokens, offset)?;
    Some(CursorContext {
        index,
        token: &tokens[index],
        before: &tokens[..index],
        after: &tokens[index + 1..],
    })
}
