//! In-memory page model the appliers mutate.

pub mod document;
pub mod parser;
pub mod selector;
pub mod serializer;
pub mod walker;

pub use document::{Document, ListenerId, NodeId, NodeKind};
pub use parser::parse_document;
pub use selector::SelectorList;
pub use walker::{eligible_text_nodes, TextFilter};
