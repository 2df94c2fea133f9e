use std::collections::HashSet;
use std::fs;
use std::path::Path;

use snafu::{ResultExt, Snafu, ensure};
use tracing::debug;

use crate::normalizer::{ROOT, join_path};
use crate::tree::{EntryKind, Forest, Node};
use crate::validator::name_rules::check_name;
use crate::validator::{InvalidName, PlatformPolicy};

/// Checks a parsed tree against the naming rules of one platform.
///
/// All structural checks stop at the first problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    policy: PlatformPolicy,
}

impl Validator {
    pub fn new(policy: PlatformPolicy) -> Self {
        Validator { policy }
    }

    /// Judges a single name. Never touches the filesystem.
    pub fn is_valid_name(&self, name: &str, kind: EntryKind) -> Result<(), InvalidName> {
        check_name(name, kind, self.policy)
    }

    /// Applies [`Self::is_valid_name`] to every node, depth first.
    pub fn validate_tree(&self, forest: &Forest) -> Result<(), ValidationError> {
        debug!("Validating names against the {} policy", self.policy);
        self.validate_nodes(forest.roots())
    }

    fn validate_nodes(&self, nodes: &[Node]) -> Result<(), ValidationError> {
        for node in nodes {
            self.is_valid_name(&node.name, node.entry_kind())
                .context(InvalidEntrySnafu {
                    name: &node.name,
                    kind: node.entry_kind(),
                    line: node.line,
                    indent: node.indent,
                })?;
            self.validate_nodes(node.children())?;
        }
        Ok(())
    }

    /// Rejects two siblings sharing a name (case-sensitive), at any depth.
    pub fn check_duplicates(forest: &Forest) -> Result<(), ValidationError> {
        debug!("Checking for duplicate entries");
        Self::check_siblings(forest.roots(), ROOT)
    }

    fn check_siblings(nodes: &[Node], parent: &str) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in nodes {
            ensure!(
                seen.insert(node.name.as_str()),
                DuplicateEntrySnafu {
                    name: &node.name,
                    kind: node.entry_kind(),
                    parent,
                    line: node.line,
                }
            );
        }

        for node in nodes.iter().filter(|node| node.is_directory()) {
            Self::check_siblings(node.children(), &join_path(parent, &node.name))?;
        }
        Ok(())
    }

    /// Returns the first of `paths` that already exists below `root`.
    pub fn check_existing<I, S>(root: &Path, paths: I) -> Option<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .find(|path| Self::path_exists(root, path.as_ref()))
    }

    /// Returns every one of `paths` that already exists below `root`, in order.
    pub fn existing_paths<I, S>(root: &Path, paths: I) -> Vec<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter(|path| Self::path_exists(root, path.as_ref()))
            .collect()
    }

    // Any entry counts, whatever its type and even as a dangling symlink.
    fn path_exists(root: &Path, path: &str) -> bool {
        fs::symlink_metadata(root.join(path)).is_ok()
    }
}

#[derive(Debug, Snafu)]
pub enum ValidationError {
    #[snafu(display(
        "Invalid {kind} name '{name}' on line {line} (indentation level {indent})"
    ))]
    InvalidEntry {
        name: String,
        kind: EntryKind,
        line: usize,
        indent: usize,
        source: InvalidName,
    },
    #[snafu(display("Duplicate {kind} '{name}' in '{parent}' on line {line}"))]
    DuplicateEntry {
        name: String,
        kind: EntryKind,
        parent: String,
        line: usize,
    },
}
