//! In-memory representation of a `.tree` source.
//!
//! The parser turns indentation-based text into a forest of nodes,
//! where each node is either a directory (owning its children) or a file.

mod node;
mod parser;

pub use node::{EntryKind, Forest, Node, NodeKind};
pub use parser::{INDENT_WIDTH, ParseError, Parser};
