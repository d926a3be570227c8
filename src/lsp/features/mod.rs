//! Language features computed from a document's parse state.

pub mod completion;
pub mod cursor;
pub mod folding;
pub mod hover;
