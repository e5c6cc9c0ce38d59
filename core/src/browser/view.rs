//! Derived, read-only view of the browser state.

use crate::nav::{Breadcrumb, NotFound};
use crate::tree::FolderRef;
use crate::types::{FileEntry, NavigationPath};

/// What the presentation layer should render.
#[derive(Debug)]
pub enum BrowserView<'a> {
    /// A refresh is in flight and no tree is available.
    Loading,
    /// The key source failed; nothing from a previous listing is shown.
    Unavailable { message: &'a str },
    /// The current path does not resolve in the current tree.
    Missing { path: &'a NavigationPath, error: NotFound },
    Folder(FolderView<'a>),
}

impl<'a> BrowserView<'a> {
    pub fn folder(&self) -> Option<&FolderView<'a>> {
        match self {
            BrowserView::Folder(view) => Some(view),
            _ => None,
        }
    }
}

/// The current folder with its visible page of files.
#[derive(Debug)]
pub struct FolderView<'a> {
    pub folder: FolderRef<'a>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub subfolders: Vec<FolderSummary<'a>>,
    /// Files on the current page, after filtering.
    pub files: Vec<&'a FileEntry>,
    /// Files in the folder matching the filter, across all pages.
    pub matching_files: usize,
    /// Active file name filter, if any.
    pub filter: Option<&'a str>,
    pub page_number: usize,
    pub total_pages: usize,
}

impl FolderView<'_> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Nothing to render: no subfolders and no file on this page.
    pub fn is_empty(&self) -> bool {
        self.subfolders.is_empty() && self.files.is_empty()
    }

    /// The folder has files but the filter hides all of them.
    pub fn filtered_out(&self) -> bool {
        self.filter.is_some() && self.matching_files == 0 && !self.folder.files().is_empty()
    }
}

/// Folder tile: name plus direct child counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary<'a> {
    pub name: &'a str,
    pub path: &'a str,
    pub file_count: usize,
    pub folder_count: usize,
}

impl<'a> From<FolderRef<'a>> for FolderSummary<'a> {
    fn from(folder: FolderRef<'a>) -> Self {
        Self {
            name: folder.name(),
            path: folder.path(),
            file_count: folder.files().len(),
            folder_count: folder.subfolder_count(),
        }
    }
}

/// Files of `folder` whose name contains `filter`, ignoring case.
pub(crate) fn matching_files<'a>(
    folder: FolderRef<'a>,
    filter: Option<&str>,
) -> Vec<&'a FileEntry> {
    match filter {
        None => folder.files().iter().collect(),
        Some(needle) => {
            let needle = needle.to_lowercase();
            folder
                .files()
                .iter()
                .filter(|file| file.name.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FolderTree;

    #[test]
    fn summary_counts_direct_children() {
        let tree = FolderTree::build(["p/a.png", "p/b.png", "p/q/c.png", "p/r/d.txt"]);
        let summary = FolderSummary::from(tree.root().subfolder("p").unwrap());
        assert_eq!(summary, FolderSummary { name: "p", path: "p", file_count: 2, folder_count: 2 });
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let tree = FolderTree::build(["Report-2023.pdf", "photo.JPG", "notes.txt"]);
        let names = |filter: Option<&str>| -> Vec<String> {
            matching_files(tree.root(), filter).iter().map(|file| file.name.clone()).collect()
        };
        assert_eq!(names(Some("REPORT")), vec!["Report-2023.pdf"]);
        assert_eq!(names(Some("o")), vec!["Report-2023.pdf", "photo.JPG", "notes.txt"]);
        assert_eq!(names(None).len(), 3);
        assert!(names(Some("zzz")).is_empty());
    }
}
