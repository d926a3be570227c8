use rustc_hash::FxHashSet;

use crate::parsers::{Token, TokenCategory};

/// Distinct identifier images already used in a document, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueIdentifiers {
    pub vars: Vec<String>,
    pub prefixes: Vec<String>,
    pub local_names: Vec<String>,
    pub iris: Vec<String>,
}

impl UniqueIdentifiers {
    pub fn collect<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> Self {
        let mut identifiers = Self::default();
        let mut seen: FxHashSet<(TokenCategory, &str)> = FxHashSet::default();
        for token in tokens {
            let Some(category) = token.token_type.category() else {
                continue;
            };
            if !seen.insert((category, token.image.as_str())) {
                continue;
            }
            let bucket = match category {
                TokenCategory::Variable => &mut identifiers.vars,
                TokenCategory::Prefix => &mut identifiers.prefixes,
                TokenCategory::LocalName => &mut identifiers.local_names,
                TokenCategory::IriRef => &mut identifiers.iris,
            };
            bucket.push(token.image.clone());
        }
        identifiers
    }
}
