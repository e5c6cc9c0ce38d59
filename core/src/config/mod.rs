//! Persisted browser settings.

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::source::{BucketUrl, FileKeySource};
use crate::types::DEFAULT_PAGE_SIZE;

pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANISATION: &str = "BucketBrowser";
pub(crate) const APP_NAME: &str = "bucket-browser";

/// Overrides [`BrowserConfig::bucket_url`] when set.
pub const BUCKET_URL_ENV: &str = "BUCKET_BROWSER_URL";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// Public endpoint prefixed to keys to build download links. Without it links are raw keys.
    pub bucket_url: Option<String>,
    /// Files per page. Zero is rejected when loading.
    pub page_size: NonZeroUsize,
    /// Saved listing document used as the key source.
    pub listing: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { bucket_url: None, page_size: DEFAULT_PAGE_SIZE, listing: None }
    }
}

impl BrowserConfig {
    /// Load from `path`, or from the platform config directory when `None`.
    ///
    /// A missing file yields the defaults. The bucket URL environment override is applied last.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        let mut config = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing config at {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                BrowserConfig::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config at {}", path.display()));
            }
        };

        if let Some(url) = std::env::var(BUCKET_URL_ENV).ok().filter(|url| !url.trim().is_empty())
        {
            config.bucket_url = Some(url);
        }

        Ok(config)
    }

    /// Write atomically to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("config path {} has no parent directory", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;

        let data = serde_json::to_vec_pretty(self)?;
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(&data)?;
        temp.flush()?;
        temp.persist(path).map_err(|err| err.error).context("persisting config")?;
        Ok(())
    }

    pub fn bucket(&self) -> Option<BucketUrl> {
        self.bucket_url.as_deref().map(BucketUrl::new)
    }

    pub fn listing_source(&self) -> Option<FileKeySource> {
        self.listing.as_deref().map(FileKeySource::new)
    }
}

pub fn default_config_path() -> crate::Result<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANISATION, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow!("unable to resolve application config directory"))
}
