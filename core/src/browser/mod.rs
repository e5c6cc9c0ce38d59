//! Browsing session: owns the current tree, location, page and filter.
//!
//! The session is single-threaded. Refreshes are split into [`Browser::begin_refresh`] and
//! [`Browser::complete_refresh`] so a shell can run the actual fetch wherever it likes; every
//! refresh gets a new generation and results carrying an older generation are dropped. Once a
//! tree is built it is never mutated: a successful refresh swaps in a new `Arc<FolderTree>`.

mod shared;
mod view;

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::nav::{self, breadcrumbs};
use crate::paginate::{self, paginate};
use crate::source::{KeySource, RawKey, ReferenceBuilder, SourceError};
use crate::tree::{FolderRef, FolderTree, TreeBuilder};
use crate::types::{NavigationPath, PageState, RefreshToken};

pub use shared::SharedTree;
pub use view::{BrowserView, FolderSummary, FolderView};

/// Message surfaced when the key source fails.
pub const UNAVAILABLE_MESSAGE: &str = "Failed to load bucket contents";

/// Availability of the listing.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<FolderTree>),
    Unavailable { message: String },
}

#[derive(Debug)]
pub struct Browser<R = RawKey> {
    builder: TreeBuilder<R>,
    state: LoadState,
    path: NavigationPath,
    page: PageState,
    filter: Option<String>,
    generation: u64,
    published: Option<SharedTree>,
}

impl Browser<RawKey> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self::with_builder(TreeBuilder::new(), page_size)
    }
}

impl Default for Browser<RawKey> {
    fn default() -> Self {
        Self::with_builder(TreeBuilder::new(), PageState::default().page_size)
    }
}

impl<R: ReferenceBuilder> Browser<R> {
    pub fn with_builder(builder: TreeBuilder<R>, page_size: NonZeroUsize) -> Self {
        Self {
            builder,
            state: LoadState::Loading,
            path: NavigationPath::root(),
            page: PageState::new(page_size),
            filter: None,
            generation: 0,
            published: None,
        }
    }

    /// Mirror every tree swap into `shared` for readers on other threads.
    pub fn publish_to(&mut self, shared: SharedTree) {
        shared.swap(self.tree().cloned());
        self.published = Some(shared);
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn tree(&self) -> Option<&Arc<FolderTree>> {
        match &self.state {
            LoadState::Ready(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Start a refresh. Any result from an earlier refresh is ignored from now on.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        debug!(generation = self.generation, "refresh started");
        RefreshToken::new(self.generation)
    }

    /// Apply the outcome of the refresh identified by `token`.
    ///
    /// Returns `false` when the token is stale and the result was discarded.
    pub fn complete_refresh(
        &mut self,
        token: RefreshToken,
        result: Result<Vec<String>, SourceError>,
    ) -> bool {
        if token.as_u64() != self.generation {
            debug!(
                token = token.as_u64(),
                generation = self.generation,
                "discarding stale refresh result"
            );
            return false;
        }

        match result {
            Ok(keys) => {
                let tree = Arc::new(self.builder.build(&keys));
                info!(
                    keys = keys.len(),
                    folders = tree.folder_count(),
                    files = tree.file_count(),
                    "listing loaded"
                );
                if let Err(err) = nav::resolve_path(&tree, &self.path) {
                    warn!(path = %self.path, %err, "current folder vanished, returning to root");
                    self.path = NavigationPath::root();
                    self.page.reset();
                }
                self.publish(Some(Arc::clone(&tree)));
                self.state = LoadState::Ready(tree);
            }
            Err(err) => {
                let err = anyhow::Error::from(err);
                warn!("key source failed: {err:#}");
                self.publish(None);
                self.state = LoadState::Unavailable { message: UNAVAILABLE_MESSAGE.to_string() };
            }
        }
        self.clamp_page();
        true
    }

    /// Fetch from `source` and rebuild in one go. Returns whether the listing is available.
    pub fn refresh<S: KeySource + ?Sized>(&mut self, source: &S) -> bool {
        let token = self.begin_refresh();
        let result = source.fetch_keys();
        self.complete_refresh(token, result);
        matches!(self.state, LoadState::Ready(_))
    }

    /// Jump to `path`. Does not require the path to exist; see [`BrowserView::Missing`].
    pub fn navigate(&mut self, path: NavigationPath) {
        if path != self.path {
            debug!(from = %self.path, to = %path, "navigate");
            self.path = path;
        }
        self.page.reset();
    }

    /// Open a direct subfolder of the current folder.
    pub fn enter(&mut self, name: &str) -> bool {
        let exists = self.current_folder().is_some_and(|folder| folder.subfolder(name).is_some());
        if exists {
            let mut path = self.path.clone();
            path.push(name);
            self.navigate(path);
        }
        exists
    }

    pub fn go_up(&mut self) -> bool {
        let mut path = self.path.clone();
        let moved = path.pop();
        if moved {
            self.navigate(path);
        }
        moved
    }

    /// Follow breadcrumb `depth` (0 is the root).
    pub fn select_crumb(&mut self, depth: usize) {
        let mut path = self.path.clone();
        path.truncate(depth);
        self.navigate(path);
    }

    /// Move to page `n`, clamped into the valid range for the current folder.
    pub fn set_page(&mut self, n: usize) {
        self.page.page_number = paginate::clamp_page(n, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.page_number.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.page_number.saturating_sub(1));
    }

    /// Restrict listed files to names containing `query`. Blank clears the filter.
    pub fn set_filter(&mut self, query: &str) {
        let query = query.trim();
        self.filter = (!query.is_empty()).then(|| query.to_string());
        self.page.reset();
    }

    pub fn view(&self) -> BrowserView<'_> {
        let tree = match &self.state {
            LoadState::Loading => return BrowserView::Loading,
            LoadState::Unavailable { message } => {
                return BrowserView::Unavailable { message: message.as_str() };
            }
            LoadState::Ready(tree) => tree,
        };

        let folder = match nav::resolve_path(tree, &self.path) {
            Ok(folder) => folder,
            Err(error) => return BrowserView::Missing { path: &self.path, error },
        };

        let matching = view::matching_files(folder, self.filter());
        let page = paginate(&matching, self.page.page_number, self.page.page_size);
        BrowserView::Folder(FolderView {
            folder,
            breadcrumbs: breadcrumbs(&self.path),
            subfolders: folder.subfolders().map(FolderSummary::from).collect(),
            files: page.items.to_vec(),
            matching_files: matching.len(),
            filter: self.filter(),
            page_number: page.page_number,
            total_pages: page.total_pages,
        })
    }

    fn current_folder(&self) -> Option<FolderRef<'_>> {
        self.tree().and_then(|tree| nav::resolve_path(tree, &self.path).ok())
    }

    fn total_pages(&self) -> usize {
        self.current_folder()
            .map(|folder| view::matching_files(folder, self.filter()).len())
            .map_or(0, |len| paginate::total_pages(len, self.page.page_size))
    }

    fn clamp_page(&mut self) {
        self.page.page_number = paginate::clamp_page(self.page.page_number, self.total_pages());
    }

    fn publish(&self, tree: Option<Arc<FolderTree>>) {
        if let Some(shared) = &self.published {
            shared.swap(tree);
        }
    }
}
