//! Minimal HAR 1.2 structures for extracting response bodies.
//!
//! Only the fields the extractor reads are modeled; everything else in the
//! archive is ignored. Absent fields default to `None` rather than failing.

use serde::Deserialize;

/// Root HAR document (top-level wrapper).
#[derive(Debug, Deserialize)]
pub struct HarDocument {
    pub log: HarLog,
}

#[derive(Debug, Deserialize)]
pub struct HarLog {
    pub entries: Vec<EntrySlot>,
}

/// One element of `log.entries`.
///
/// An element that does not have the shape of an entry (not an object, or a
/// field of the wrong JSON type) is kept as `Malformed` so the rest of the
/// archive can still be extracted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EntrySlot {
    Entry(HarEntry),
    Malformed(serde_json::Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct HarEntry {
    #[serde(default)]
    pub request: HarRequest,
    #[serde(default)]
    pub response: HarResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarRequest {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub content: HarContent,
}

/// `response.content`: the captured body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct HarContent {
    pub text: Option<String>,
    /// `"base64"` for binary bodies; absent for plain text.
    pub encoding: Option<String>,
    /// Advisory only; never used to pick a path.
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

impl HarDocument {
    pub fn entries(&self) -> &[EntrySlot] {
        &self.log.entries
    }
}

impl HarEntry {
    /// Request URL, trimmed; `None` when absent or blank.
    pub fn url(&self) -> Option<&str> {
        self.request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn content(&self) -> &HarContent {
        &self.response.content
    }
}
