use tracing::debug;

use crate::normalizer::{PathSet, ROOT, join_path};
use crate::tree::{Forest, Node, NodeKind};

pub struct Normalizer;

impl Normalizer {
    /// Collects the path of every node, relative to [`ROOT`].
    ///
    /// Entries that resolve to the same path collapse into one.
    pub fn normalize(forest: &Forest) -> PathSet {
        let mut paths = PathSet::default();
        Self::traverse(forest.roots(), ROOT, &mut paths);
        debug!(
            "Normalized tree into {} directories and {} files",
            paths.directory_count(),
            paths.file_count()
        );
        paths
    }

    fn traverse(nodes: &[Node], parent: &str, paths: &mut PathSet) {
        for node in nodes {
            let path = join_path(parent, &node.name);
            match &node.kind {
                NodeKind::Directory { children } => {
                    paths.insert_directory(path.clone());
                    if !children.is_empty() {
                        Self::traverse(children, &path, paths);
                    }
                }
                NodeKind::File => {
                    paths.insert_file(path);
                }
            }
        }
    }
}
