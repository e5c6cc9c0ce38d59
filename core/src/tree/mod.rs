//! Folder hierarchy built from a flat list of object keys.
//!
//! Folders live in an arena owned by [`FolderTree`] and refer to their children by
//! [`FolderId`]. The tree is immutable once built; a refresh builds a brand new tree.

mod builder;

use std::fmt;

use crate::types::{FileEntry, FolderId};

pub use builder::TreeBuilder;

/// Path separator used by object keys.
pub const SEPARATOR: char = '/';

/// One path segment of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FolderNode {
    name: String,
    path: String,
    files: Vec<FileEntry>,
    subfolders: Vec<FolderId>,
}

impl FolderNode {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            files: Vec::new(),
            subfolders: Vec::new(),
        }
    }
}

/// Counters collected while building, mostly for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub keys: usize,
    pub files: usize,
    /// Keys whose leaf had an ineligible extension.
    pub dropped: usize,
    /// Keys with no segments at all (empty or separator-only).
    pub malformed: usize,
}

/// Root-owned folder hierarchy.
#[derive(Clone, PartialEq, Eq)]
pub struct FolderTree {
    nodes: Vec<FolderNode>,
    stats: BuildStats,
}

impl FolderTree {
    /// Build with raw keys as file references.
    pub fn build<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TreeBuilder::new().build(keys)
    }

    pub fn root(&self) -> FolderRef<'_> {
        self.folder(FolderId::ROOT)
    }

    /// Panics if `id` did not come from this tree.
    pub fn folder(&self, id: FolderId) -> FolderRef<'_> {
        assert!(id.index() < self.nodes.len(), "folder id {id:?} out of range");
        FolderRef { tree: self, id }
    }

    pub fn get(&self, id: FolderId) -> Option<FolderRef<'_>> {
        (id.index() < self.nodes.len()).then_some(FolderRef { tree: self, id })
    }

    /// Number of folders, including the root.
    pub fn folder_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn file_count(&self) -> usize {
        self.stats.files
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Every folder in creation order, root first.
    pub fn folders(&self) -> impl Iterator<Item = FolderRef<'_>> + '_ {
        (0..self.nodes.len()).map(|index| FolderRef { tree: self, id: FolderId::from_index(index) })
    }

    fn node(&self, id: FolderId) -> &FolderNode {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for FolderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderTree")
            .field("folders", &self.nodes.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Borrowed view of one folder inside a [`FolderTree`].
#[derive(Clone, Copy)]
pub struct FolderRef<'a> {
    tree: &'a FolderTree,
    id: FolderId,
}

impl<'a> FolderRef<'a> {
    pub fn id(&self) -> FolderId {
        self.id
    }

    /// Own segment name; empty for the root.
    pub fn name(&self) -> &'a str {
        &self.tree.node(self.id).name
    }

    /// Segments from the root joined by `/`; empty for the root.
    pub fn path(&self) -> &'a str {
        &self.tree.node(self.id).path
    }

    pub fn is_root(&self) -> bool {
        self.id == FolderId::ROOT
    }

    /// Files in the order their keys were encountered.
    pub fn files(&self) -> &'a [FileEntry] {
        &self.tree.node(self.id).files
    }

    /// Direct subfolders in first-seen order.
    pub fn subfolders(self) -> impl ExactSizeIterator<Item = FolderRef<'a>> + 'a {
        let tree = self.tree;
        tree.node(self.id).subfolders.iter().map(move |&id| FolderRef { tree, id })
    }

    pub fn subfolder_count(&self) -> usize {
        self.tree.node(self.id).subfolders.len()
    }

    /// Direct subfolder with exactly this name.
    pub fn subfolder(self, name: &str) -> Option<FolderRef<'a>> {
        self.subfolders().find(|child| child.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        let node = self.tree.node(self.id);
        node.files.is_empty() && node.subfolders.is_empty()
    }
}

impl PartialEq for FolderRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for FolderRef<'_> {}

impl fmt::Debug for FolderRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderRef")
            .field("id", &self.id)
            .field("path", &self.path())
            .field("files", &self.files().len())
            .field("subfolders", &self.subfolder_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(folder: FolderRef<'a>) -> Vec<&'a str> {
        folder.subfolders().map(|child| child.name()).collect()
    }

    fn file_names(folder: FolderRef<'_>) -> Vec<&str> {
        folder.files().iter().map(|file| file.name.as_str()).collect()
    }

    #[test]
    fn builds_mixed_hierarchy() {
        let tree =
            FolderTree::build(["a.jpg", "docs/readme.txt", "docs/x.exe", "docs/2023/report.csv"]);
        let root = tree.root();

        assert!(root.is_root());
        assert_eq!(root.name(), "");
        assert_eq!(root.path(), "");
        assert_eq!(names(root), vec!["docs"]);
        assert_eq!(file_names(root), vec!["a.jpg"]);

        let docs = root.subfolder("docs").expect("docs folder");
        assert_eq!(docs.path(), "docs");
        assert_eq!(file_names(docs), vec!["readme.txt"]);
        assert_eq!(names(docs), vec!["2023"]);

        let year = docs.subfolder("2023").expect("2023 folder");
        assert_eq!(year.path(), "docs/2023");
        assert_eq!(file_names(year), vec!["report.csv"]);
        assert_eq!(year.files()[0].full_key, "docs/2023/report.csv");

        assert_eq!(tree.folder_count(), 3);
        assert_eq!(tree.stats(), BuildStats { keys: 4, files: 3, dropped: 1, malformed: 0 });
    }

    #[test]
    fn doubled_separators_do_not_create_empty_folders() {
        let tree = FolderTree::build(["a//b.png", "/a/c.png/", "//"]);
        let root = tree.root();
        assert_eq!(names(root), vec!["a"]);
        let a = root.subfolder("a").unwrap();
        assert_eq!(file_names(a), vec!["b.png", "c.png"]);
        assert_eq!(a.files()[0].full_key, "a//b.png");
        assert!(a.subfolder("").is_none());
        assert_eq!(tree.stats().malformed, 1);
    }

    #[test]
    fn subfolders_keep_first_seen_order() {
        let tree = FolderTree::build(["z/1.txt", "a/1.txt", "m/1.txt", "a/2.txt"]);
        assert_eq!(names(tree.root()), vec!["z", "a", "m"]);
        assert_eq!(file_names(tree.root().subfolder("a").unwrap()), vec!["1.txt", "2.txt"]);
    }

    #[test]
    fn folder_and_file_with_same_name_coexist() {
        let tree = FolderTree::build(["a.txt", "a.txt/inner.pdf"]);
        let root = tree.root();
        assert_eq!(file_names(root), vec!["a.txt"]);
        assert_eq!(names(root), vec!["a.txt"]);
        assert_eq!(file_names(root.subfolder("a.txt").unwrap()), vec!["inner.pdf"]);
    }

    #[test]
    fn empty_input_yields_bare_root() {
        let tree = FolderTree::build(Vec::<String>::new());
        assert!(tree.root().is_empty());
        assert_eq!(tree.folder_count(), 1);
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn folders_iterates_in_creation_order() {
        let tree = FolderTree::build(["b/c/x.txt", "a/y.txt"]);
        let paths: Vec<&str> = tree.folders().map(|folder| folder.path()).collect();
        assert_eq!(paths, vec!["", "b", "b/c", "a"]);
        assert!(tree.get(FolderId::from_index(4)).is_none());
    }
}
