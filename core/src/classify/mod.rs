//! File-name classification: extension extraction, kind and listing eligibility.

use crate::types::FileKind;

/// Extensions rendered inline as images (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extensions eligible for listing at all. Every image extension is eligible.
pub const ELIGIBLE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "csv", "pdf", "xlsx", "docx", "txt"];

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub extension: String,
    pub kind: FileKind,
}

impl Classification {
    /// Whether a key ending in this file name becomes a visible entry.
    pub fn is_eligible(&self) -> bool {
        is_eligible_extension(&self.extension)
    }

    pub fn icon(&self) -> FileIcon {
        FileIcon::for_extension(&self.extension)
    }
}

/// Classify a base file name. Never fails.
pub fn classify(file_name: &str) -> Classification {
    let extension = extension_of(file_name);
    let kind = kind_of(&extension);
    Classification { extension, kind }
}

/// Lower-cased substring after the last `.`, or empty when there is no `.`.
pub fn extension_of(file_name: &str) -> String {
    file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).unwrap_or_default()
}

pub fn kind_of(extension: &str) -> FileKind {
    if IMAGE_EXTENSIONS.contains(&extension) { FileKind::Image } else { FileKind::Other }
}

pub fn is_eligible_extension(extension: &str) -> bool {
    ELIGIBLE_EXTENSIONS.contains(&extension)
}

/// Icon family shown next to non-image entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileIcon {
    Image,
    Pdf,
    Spreadsheet,
    Document,
    Text,
    Generic,
}

impl FileIcon {
    pub fn for_extension(extension: &str) -> Self {
        if kind_of(extension) == FileKind::Image {
            return FileIcon::Image;
        }
        match extension {
            "pdf" => FileIcon::Pdf,
            "csv" | "xlsx" => FileIcon::Spreadsheet,
            "docx" => FileIcon::Document,
            "txt" => FileIcon::Text,
            _ => FileIcon::Generic,
        }
    }

    /// Glyph used by text shells.
    pub fn glyph(self) -> &'static str {
        match self {
            FileIcon::Image => "🖼️",
            FileIcon::Spreadsheet => "📊",
            FileIcon::Document => "📝",
            FileIcon::Pdf | FileIcon::Text | FileIcon::Generic => "📄",
        }
    }
}
