//! Portable filename sanitization.

/// Name used when sanitizing leaves nothing behind.
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Longest file name, in bytes, accepted by common filesystems (NAME_MAX).
pub const NAME_MAX: usize = 255;

/// Extensions longer than this are not preserved when truncating.
const MAX_KEPT_EXTENSION: usize = 16;

/// Characters rejected by at least one common filesystem (Windows is the strictest).
const ILLEGAL: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Sanitizes a candidate file or directory name.
///
/// - Replaces `\ / : * ? " < > |` and control characters with `_`
/// - Trims leading/trailing whitespace and dots
/// - Limits length to 255 bytes, keeping a short extension when it can
/// - Falls back to [`PLACEHOLDER_NAME`] when nothing is left
///
/// Total and idempotent: `sanitize_filename(&sanitize_filename(x)) == sanitize_filename(x)`.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if ILLEGAL.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = trim_edges(&replaced);
    let limited = truncate_name(trimmed, NAME_MAX);
    let limited = trim_edges(&limited);

    if limited.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        limited.to_string()
    }
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '.')
}

/// Splits `name` into stem and extension (without the dot).
/// `".profile"` and `"name."` have no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
pub(crate) fn prefix_within(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}

/// Shortens `name` to at most `max` bytes, cutting the stem before the extension.
fn truncate_name(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    match split_extension(name) {
        (stem, Some(ext)) if ext.len() <= MAX_KEPT_EXTENSION => {
            let stem = prefix_within(stem, max - ext.len() - 1);
            format!("{stem}.{ext}")
        }
        _ => prefix_within(name, max).to_string(),
    }
}
