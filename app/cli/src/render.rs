//! Plain-text rendering of a [`BrowserView`].

use std::fmt::Write;

use bucket_core::classify::FileIcon;
use bucket_core::{BrowserView, FolderView};

const FOLDER_GLYPH: &str = "📁";

pub fn render(view: &BrowserView<'_>) -> String {
    let mut out = String::new();
    match view {
        BrowserView::Loading => out.push_str("Loading...\n"),
        BrowserView::Unavailable { message } => {
            let _ = writeln!(out, "{message}");
        }
        BrowserView::Missing { path, error } => {
            let _ = writeln!(out, "Folder not found: {path} ({error})");
        }
        BrowserView::Folder(folder) => render_folder(&mut out, folder),
    }
    out
}

fn render_folder(out: &mut String, view: &FolderView<'_>) {
    let crumbs: Vec<&str> = view.breadcrumbs.iter().map(|crumb| crumb.label.as_str()).collect();
    let _ = writeln!(out, "{}", crumbs.join(" / "));

    if view.is_empty() && !view.filtered_out() {
        out.push_str("\nThis folder is empty.\n");
        return;
    }

    if !view.subfolders.is_empty() {
        out.push_str("\nFolders\n");
        for folder in &view.subfolders {
            let _ = writeln!(
                out,
                "  {FOLDER_GLYPH} {}  ({} files, {} folders)",
                folder.name, folder.file_count, folder.folder_count
            );
        }
    }

    if !view.files.is_empty() {
        out.push_str("\nFiles\n");
        for file in &view.files {
            let icon = FileIcon::for_extension(&file.extension);
            let _ = writeln!(out, "  {} {}  {}", icon.glyph(), file.name, file.url);
        }
    } else if let Some(filter) = view.filter.filter(|_| view.filtered_out()) {
        let _ = writeln!(out, "\nNo files match \"{filter}\".");
    }

    if view.total_pages > 1 {
        let _ = writeln!(out, "\nPage {} of {}", view.page_number, view.total_pages);
    }
}
