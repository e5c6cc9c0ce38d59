//! Path resolution and breadcrumbs.

use thiserror::Error;

use crate::tree::{FolderRef, FolderTree};
use crate::types::NavigationPath;

/// A path segment with no matching subfolder.
///
/// Usually means the path was valid in a previous tree and the listing changed since.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no folder `{segment}` at depth {depth}")]
pub struct NotFound {
    /// Number of segments that did resolve.
    pub depth: usize,
    pub segment: String,
}

/// Walk `path` from the root, one exact-name subfolder lookup per segment.
pub fn resolve<'a, S: AsRef<str>>(
    tree: &'a FolderTree,
    path: &[S],
) -> Result<FolderRef<'a>, NotFound> {
    let mut current = tree.root();
    for (depth, name) in path.iter().enumerate() {
        let name = name.as_ref();
        current = current
            .subfolder(name)
            .ok_or_else(|| NotFound { depth, segment: name.to_string() })?;
    }
    Ok(current)
}

/// [`resolve`] for a [`NavigationPath`].
pub fn resolve_path<'a>(
    tree: &'a FolderTree,
    path: &NavigationPath,
) -> Result<FolderRef<'a>, NotFound> {
    resolve(tree, path.segments())
}

/// One clickable element of the location bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// `"Root"` for the first crumb, otherwise the folder name.
    pub label: String,
    /// Path length after selecting this crumb; `0` is the root.
    pub depth: usize,
}

pub const ROOT_LABEL: &str = "Root";

/// Root crumb followed by one crumb per segment.
pub fn breadcrumbs(path: &NavigationPath) -> Vec<Breadcrumb> {
    std::iter::once(Breadcrumb { label: ROOT_LABEL.to_string(), depth: 0 })
        .chain(
            path.segments()
                .iter()
                .enumerate()
                .map(|(index, name)| Breadcrumb { label: name.clone(), depth: index + 1 }),
        )
        .collect()
}
