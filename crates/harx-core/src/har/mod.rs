//! HAR (HTTP Archive) loading: read a `.har` file into a typed document.
//!
//! Loading is all-or-nothing: an unreadable file, invalid JSON, or a missing
//! `log.entries` array is fatal. Individual malformed entries are not; they
//! surface as [`EntrySlot::Malformed`] and are skipped by the extractor.

mod parse;

pub use parse::{EntrySlot, HarContent, HarDocument, HarEntry, HarLog, HarRequest, HarResponse};

use serde_json::error::Category;
use std::path::{Path, PathBuf};

/// Fatal errors while loading a HAR file.
#[derive(Debug, thiserror::Error)]
pub enum HarError {
    #[error("read HAR file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} has no usable log.entries array", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses a HAR file.
pub fn load_har(path: &Path) -> Result<HarDocument, HarError> {
    let bytes = std::fs::read(path).map_err(|source| HarError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_har(&bytes, path)?;
    tracing::debug!(
        "loaded {} HAR entries from {}",
        doc.entries().len(),
        path.display()
    );
    Ok(doc)
}

/// Parses HAR JSON already in memory. `origin` is only used in error messages.
pub fn parse_har(bytes: &[u8], origin: &Path) -> Result<HarDocument, HarError> {
    serde_json::from_slice(bytes).map_err(|source| {
        let path = origin.to_path_buf();
        match source.classify() {
            Category::Data => HarError::Structure { path, source },
            Category::Io | Category::Syntax | Category::Eof => HarError::Json { path, source },
        }
    })
}
