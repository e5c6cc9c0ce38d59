//! Key source backed by a listing document on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::listing::{self, ListingFormat};
use super::{KeySource, SourceError};

/// Reads a saved bucket listing (XML, JSON array or plain lines) on every fetch.
#[derive(Debug, Clone)]
pub struct FileKeySource {
    path: PathBuf,
    format: Option<ListingFormat>,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), format: None }
    }

    /// Skip format sniffing and always parse as `format`.
    pub fn with_format(mut self, format: ListingFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeySource for FileKeySource {
    fn fetch_keys(&self) -> Result<Vec<String>, SourceError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Io { path: self.path.clone(), source })?;
        let format = self.format.unwrap_or_else(|| ListingFormat::detect(&text));
        let keys = listing::parse_as(format, &text)?;
        debug!(path = %self.path.display(), ?format, keys = keys.len(), "read listing");
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_xml_listing_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("listing.xml");
        fs::write(&path, "<ListBucketResult><Contents><Key>a/b.png</Key></Contents></ListBucketResult>")
            .unwrap();

        let keys = FileKeySource::new(&path).fetch_keys().expect("fetch keys");
        assert_eq!(keys, vec!["a/b.png"]);
    }

    #[test]
    fn forced_format_skips_detection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("listing.txt");
        fs::write(&path, "<not-xml>.txt\n").unwrap();

        let keys =
            FileKeySource::new(&path).with_format(ListingFormat::Lines).fetch_keys().unwrap();
        assert_eq!(keys, vec!["<not-xml>.txt"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let source = FileKeySource::new(dir.path().join("absent.xml"));
        match source.fetch_keys() {
            Err(SourceError::Io { path, .. }) => assert_eq!(path, source.path()),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
