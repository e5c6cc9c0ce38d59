//! Collaborators that feed the tree: key sources and reference builders.
//!
//! A [`KeySource`] produces the flat list of object keys for one refresh. The core treats it as
//! a one-shot operation: it is invoked, its outcome is handed to the browser, and a failure is
//! surfaced as an explicit "contents unavailable" state. No retry happens here.

pub mod file;
pub mod listing;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub use file::FileKeySource;
pub use listing::{ListingError, ListingFormat, parse_listing};

/// Failure to obtain a key list.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading listing at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing listing")]
    Listing(#[from] ListingError),
    #[error("key source unavailable: {0}")]
    Unavailable(String),
}

/// Supplies every object key under the collection being browsed.
///
/// Order must be deterministic for a given remote state but need not be sorted.
pub trait KeySource {
    fn fetch_keys(&self) -> Result<Vec<String>, SourceError>;
}

/// In-memory key list, mostly useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticKeySource {
    keys: Vec<String>,
}

impl StaticKeySource {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { keys: keys.into_iter().map(Into::into).collect() }
    }
}

impl KeySource for StaticKeySource {
    fn fetch_keys(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.keys.clone())
    }
}

/// Closure-backed source for shells that own the actual fetch.
pub struct FnKeySource<F>(pub F);

impl<F> fmt::Debug for FnKeySource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKeySource").finish_non_exhaustive()
    }
}

impl<F> KeySource for FnKeySource<F>
where
    F: Fn() -> Result<Vec<String>, SourceError>,
{
    fn fetch_keys(&self) -> Result<Vec<String>, SourceError> {
        (self.0)()
    }
}

/// Turns a raw key into a fetchable reference. The result is opaque to the core.
pub trait ReferenceBuilder {
    fn reference(&self, key: &str) -> String;
}

/// Uses the raw key itself as the reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawKey;

impl ReferenceBuilder for RawKey {
    fn reference(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Public bucket endpoint: references are `{base}/{key}` with the key left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketUrl {
    base: String,
}

impl BucketUrl {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl ReferenceBuilder for BucketUrl {
    fn reference(&self, key: &str) -> String {
        let mut url = String::with_capacity(self.base.len() + key.len() + 1);
        url.push_str(&self.base);
        url.push('/');
        url.push_str(key);
        url
    }
}

impl<F> ReferenceBuilder for F
where
    F: Fn(&str) -> String,
{
    fn reference(&self, key: &str) -> String {
        self(key)
    }
}
