//! URL modeling and output path derivation.
//!
//! Maps a request URL to a relative path under the output root that mirrors
//! the site's path hierarchy, with every component sanitized for common
//! filesystems.

mod path;
mod sanitize;

pub use path::{locate_url, looks_like_file, UrlLocation, UrlPathError};
pub use sanitize::{sanitize_filename, split_extension, NAME_MAX, PLACEHOLDER_NAME};

pub(crate) use sanitize::prefix_within;

use std::path::PathBuf;

use crate::config::{HarxConfig, DEFAULT_INDEX_NAME};

/// Knobs for [`derive_relative_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    /// File name for empty/root paths.
    pub index_name: String,
    /// Put everything under a directory named after the host.
    pub group_by_host: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            group_by_host: false,
        }
    }
}

impl From<&HarxConfig> for PathOptions {
    fn from(cfg: &HarxConfig) -> Self {
        Self {
            index_name: cfg.index_name.clone(),
            group_by_host: cfg.group_by_host,
        }
    }
}

/// Derives the candidate relative path for a URL.
///
/// # Examples
///
/// - `https://example.com/style.css` → `style.css`
/// - `https://example.com/css/site/main.css` → `css/site/main.css`
/// - `https://example.com/api/user/123?type=customer` → `api/user/123/123_type=customer`
/// - `https://example.com/` → `index.html`
pub fn derive_relative_path(url: &str, opts: &PathOptions) -> Result<PathBuf, UrlPathError> {
    let location = locate_url(url)?;

    let mut rel = PathBuf::new();
    if opts.group_by_host && !location.authority.is_empty() {
        rel.push(sanitize_filename(&location.authority));
    }
    for dir in &location.dirs {
        rel.push(sanitize_filename(dir));
    }
    let file = location.file.as_deref().unwrap_or(&opts.index_name);
    rel.push(sanitize_filename(file));
    Ok(rel)
}
