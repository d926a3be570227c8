pub mod logging;
pub mod lsp;
pub mod ontology;
pub mod parsers;
