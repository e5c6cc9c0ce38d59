//! Flat key list to folder hierarchy.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::classify;
use crate::source::{RawKey, ReferenceBuilder};
use crate::types::{FileEntry, FolderId};

use super::{BuildStats, FolderNode, FolderTree, SEPARATOR};

/// Builds a [`FolderTree`] in one pass over the keys.
///
/// Every folder is registered under its cumulative path the first time it is seen, so finding
/// the parent of the next segment is a single map lookup instead of a walk from the root.
/// Build cost is linear in the total number of key segments.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder<R = RawKey> {
    references: R,
}

impl TreeBuilder<RawKey> {
    pub fn new() -> Self {
        Self { references: RawKey }
    }
}

impl<R: ReferenceBuilder> TreeBuilder<R> {
    /// Use `references` to derive each file's fetch reference from its key.
    pub fn with_references<T: ReferenceBuilder>(self, references: T) -> TreeBuilder<T> {
        TreeBuilder { references }
    }

    pub fn build<I, S>(&self, keys: I) -> FolderTree
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = BuildState::new();
        for key in keys {
            state.insert(key.as_ref(), &self.references);
        }

        let tree = state.finish();
        let stats = tree.stats();
        debug!(
            keys = stats.keys,
            folders = tree.folder_count(),
            files = stats.files,
            dropped = stats.dropped,
            malformed = stats.malformed,
            "built folder tree"
        );
        tree
    }
}

struct BuildState {
    nodes: Vec<FolderNode>,
    /// Cumulative path to arena slot. The root is registered under `""`.
    index: HashMap<String, FolderId>,
    stats: BuildStats,
    /// Reused across keys to avoid an allocation per segment.
    cumulative: String,
}

impl BuildState {
    fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(String::new(), FolderId::ROOT);
        Self {
            nodes: vec![FolderNode::new("", "")],
            index,
            stats: BuildStats::default(),
            cumulative: String::new(),
        }
    }

    fn insert(&mut self, key: &str, references: &impl ReferenceBuilder) {
        self.stats.keys += 1;
        self.cumulative.clear();

        let mut segments = key.split(SEPARATOR).filter(|segment| !segment.is_empty()).peekable();
        if segments.peek().is_none() {
            self.stats.malformed += 1;
            trace!(key, "skipping key without segments");
            return;
        }

        let mut parent = FolderId::ROOT;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                self.push_file(parent, segment, key, references);
                break;
            }
            parent = self.enter_folder(parent, segment);
        }
    }

    fn enter_folder(&mut self, parent: FolderId, name: &str) -> FolderId {
        if !self.cumulative.is_empty() {
            self.cumulative.push(SEPARATOR);
        }
        self.cumulative.push_str(name);

        if let Some(&existing) = self.index.get(self.cumulative.as_str()) {
            return existing;
        }

        let id = FolderId::from_index(self.nodes.len());
        self.nodes.push(FolderNode::new(name, &self.cumulative));
        self.nodes[parent.index()].subfolders.push(id);
        self.index.insert(self.cumulative.clone(), id);
        id
    }

    fn push_file(
        &mut self,
        parent: FolderId,
        name: &str,
        key: &str,
        references: &impl ReferenceBuilder,
    ) {
        let class = classify::classify(name);
        if !class.is_eligible() {
            self.stats.dropped += 1;
            trace!(key, extension = %class.extension, "dropping ineligible key");
            return;
        }

        self.stats.files += 1;
        self.nodes[parent.index()].files.push(FileEntry {
            name: name.to_string(),
            full_key: key.to_string(),
            url: references.reference(key),
            extension: class.extension,
            kind: class.kind,
        });
    }

    fn finish(self) -> FolderTree {
        FolderTree { nodes: self.nodes, stats: self.stats }
    }
}
