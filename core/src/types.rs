//! Shared data structures exchanged between the core and presentation shells.

use std::fmt;
use std::num::NonZeroUsize;

/// Page size used when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(9) {
    Some(size) => size,
    None => unreachable!(),
};

/// Coarse classification of a listed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Can be displayed inline as a thumbnail.
    Image,
    Other,
}

/// One listed object, created only for keys with an eligible extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Base file name, without any folder prefix.
    pub name: String,
    /// Storage key exactly as it appeared in the listing.
    pub full_key: String,
    /// Fetch/download reference derived from `full_key`.
    pub url: String,
    /// Lower-cased suffix after the last `.`, empty if there is none.
    pub extension: String,
    pub kind: FileKind,
}

impl FileEntry {
    pub fn is_image(&self) -> bool {
        self.kind == FileKind::Image
    }
}

/// Arena index of a folder inside a [`FolderTree`](crate::tree::FolderTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(u32);

impl FolderId {
    /// The root folder always occupies the first arena slot.
    pub const ROOT: FolderId = FolderId(0);

    /// Panics if `index` does not fit in a `u32`.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("folder arena exceeds u32::MAX entries"))
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The consumer's current location, as folder names from the root. Empty means root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NavigationPath(Vec<String>);

impl NavigationPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated route such as `"/docs/2023/"`. Empty segments are dropped.
    pub fn parse_route(route: &str) -> Self {
        Self(route.split('/').filter(|segment| !segment.is_empty()).map(str::to_owned).collect())
    }

    /// Render the path back as a route, without leading or trailing separators.
    pub fn to_route(&self) -> String {
        self.0.join("/")
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// Drop the last segment; returns `false` when already at the root.
    pub fn pop(&mut self) -> bool {
        self.0.pop().is_some()
    }

    /// Keep only the first `depth` segments.
    pub fn truncate(&mut self, depth: usize) {
        self.0.truncate(depth);
    }
}

impl<S: Into<String>> FromIterator<S> for NavigationPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.to_route())
    }
}

/// Pagination cursor over one folder's file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub page_number: usize,
    pub page_size: NonZeroUsize,
}

impl PageState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_number: 1, page_size }
    }

    pub fn reset(&mut self) {
        self.page_number = 1;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Generation token handed out when a refresh starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}
