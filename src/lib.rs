//! Build directory trees from indentation-based `.tree` descriptions.
//!
//! The pipeline runs in four stages: [`tree::Parser`] turns text into a
//! [`tree::Forest`], [`validator::Validator`] rejects malformed or illegal
//! entries, [`normalizer::Normalizer`] flattens the forest into a
//! [`normalizer::PathSet`], and [`builder::Builder`] creates those paths on
//! disk.

#![allow(clippy::module_inception)]

pub mod builder;
pub mod ext;
pub mod normalizer;
pub mod tree;
pub mod validator;

pub use builder::{BuildError, BuildPolicy, BuildResult, Builder};
pub use normalizer::{Normalizer, PathSet};
pub use tree::{EntryKind, Forest, Node, NodeKind, ParseError, Parser};
pub use validator::{InvalidName, PlatformPolicy, ValidationError, Validator};
