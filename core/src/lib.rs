//! Core library for browsing a flat object-storage key listing as a folder tree.

#![deny(missing_debug_implementations)]

pub mod browser;
pub mod classify;
pub mod config;
pub mod log;
pub mod nav;
pub mod paginate;
pub mod source;
pub mod tree;
pub mod types;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use browser::{Browser, BrowserView, FolderSummary, FolderView, LoadState, SharedTree};
pub use classify::{Classification, FileIcon, classify};
pub use config::BrowserConfig;
pub use nav::{Breadcrumb, NotFound, resolve};
pub use paginate::{Page, paginate};
pub use source::{BucketUrl, KeySource, ReferenceBuilder, SourceError};
pub use tree::{FolderRef, FolderTree, TreeBuilder};
pub use types::{FileEntry, FileKind, FolderId, NavigationPath, PageState, RefreshToken};

/// Returns the version of the core crate for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_semver_version() {
        assert!(version().contains('.'));
    }

    #[test]
    fn end_to_end_view() {
        let mut browser = Browser::default();
        let source = source::StaticKeySource::new(["a.jpg", "docs/readme.txt", "docs/2023/r.csv"]);
        assert!(browser.refresh(&source));

        browser.navigate(NavigationPath::parse_route("docs"));
        let view = browser.view();
        let folder = view.folder().expect("docs view");
        assert_eq!(folder.folder.path(), "docs");
        assert_eq!(folder.subfolders.len(), 1);
        assert_eq!(folder.files.len(), 1);
        assert_eq!(folder.total_pages, 1);
    }
}
