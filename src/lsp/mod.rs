pub mod backend;
pub mod diagnostics;
pub mod document;
pub mod features;
pub mod models;
pub mod parse_cache;
pub mod session;
