use hashlink::LinkedHashSet;

/// Deduplicated directory and file paths, kept in first-seen order.
///
/// First-seen order is a pre-order walk of the tree, so every directory
/// appears before anything inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    directories: LinkedHashSet<String>,
    files: LinkedHashSet<String>,
}

impl PathSet {
    /// Returns `false` if the directory was already present, in which case
    /// it keeps its original position.
    pub fn insert_directory(&mut self, path: String) -> bool {
        Self::insert_new(&mut self.directories, path)
    }

    /// Returns `false` if the file was already present.
    pub fn insert_file(&mut self, path: String) -> bool {
        Self::insert_new(&mut self.files, path)
    }

    // `LinkedHashSet::insert` moves an existing entry to the back.
    fn insert_new(set: &mut LinkedHashSet<String>, path: String) -> bool {
        if set.contains(&path) {
            return false;
        }
        set.insert(path)
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}
