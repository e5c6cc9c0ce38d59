//! Cross-thread handle to the most recently built tree.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::tree::FolderTree;

/// Cloneable slot holding the current tree, if any.
///
/// Readers take an `Arc` snapshot and never block a rebuild for longer than the pointer swap.
/// A failed refresh clears the slot so no reader keeps rendering a stale listing.
#[derive(Debug, Clone, Default)]
pub struct SharedTree {
    slot: Arc<RwLock<Option<Arc<FolderTree>>>>,
}

impl SharedTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tree, or `None` while loading or after a failed refresh.
    pub fn load(&self) -> Option<Arc<FolderTree>> {
        self.slot.read().clone()
    }

    /// Replace the current tree, returning the previous one.
    pub fn swap(&self, tree: Option<Arc<FolderTree>>) -> Option<Arc<FolderTree>> {
        std::mem::replace(&mut *self.slot.write(), tree)
    }

    pub fn clear(&self) -> Option<Arc<FolderTree>> {
        self.swap(None)
    }
}
