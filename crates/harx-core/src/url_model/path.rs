//! Splitting a URL into the directory segments and file name it maps to.

use url::Url;

use super::sanitize::split_extension;

/// Unsanitized pieces of the on-disk location for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
    /// `host` or `host:port`; empty for hostless URLs (`file:///...`).
    pub authority: String,
    /// Path segments that become directories, outermost first.
    pub dirs: Vec<String>,
    /// File name, or `None` for an empty/root path.
    pub file: Option<String>,
}

/// Errors turning a URL into a location.
#[derive(Debug, thiserror::Error)]
pub enum UrlPathError {
    #[error("not an absolute URL: {0}")]
    Parse(#[from] url::ParseError),
    /// `data:`, `about:blank`, `mailto:` and other URLs without a path hierarchy.
    #[error("URL has no path hierarchy")]
    Opaque,
}

/// True if a path segment looks like a file name: a dot with text on both sides.
pub fn looks_like_file(segment: &str) -> bool {
    split_extension(segment).1.is_some()
}

/// Maps a URL to directories plus file name.
///
/// - Last segment looks like a file (`/css/site.css`): earlier segments are
///   directories, the segment is the file; the query string is dropped.
/// - Otherwise (`/api/user/123?type=customer`, `/docs/`): every segment is a
///   directory and the file is the last segment followed by `?` and the raw query.
/// - Empty or root path: no file name; the caller picks the index name.
pub fn locate_url(url: &str) -> Result<UrlLocation, UrlPathError> {
    let parsed = Url::parse(url)?;
    let raw_segments = parsed.path_segments().ok_or(UrlPathError::Opaque)?;
    let mut segments: Vec<String> = raw_segments
        .filter(|s| !s.is_empty())
        .map(percent_decode)
        .collect();

    let authority = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    let Some(last) = segments.last().cloned() else {
        return Ok(UrlLocation {
            authority,
            dirs: Vec::new(),
            file: None,
        });
    };

    let ends_with_slash = parsed.path().ends_with('/');
    if !ends_with_slash && looks_like_file(&last) {
        segments.pop();
        return Ok(UrlLocation {
            authority,
            dirs: segments,
            file: Some(last),
        });
    }

    let file = match parsed.query() {
        Some(query) if !query.is_empty() => format!("{last}?{query}"),
        _ => last,
    };
    Ok(UrlLocation {
        authority,
        dirs: segments,
        file: Some(file),
    })
}

/// Percent-decodes a path segment; invalid escapes are kept literally and
/// invalid UTF-8 is replaced.
pub(super) fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(high << 4 | low);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
