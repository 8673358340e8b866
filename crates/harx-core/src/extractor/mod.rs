//! Extraction run: one file per HAR entry under the output root.
//!
//! Entries are processed in document order. A failing entry is recorded in the
//! report and the run moves on; only an output root that cannot be created
//! aborts the run.

mod used_paths;

pub use used_paths::{numbered_name, UsedPaths};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::content::{self, DecodeError};
use crate::har::{EntrySlot, HarDocument, HarEntry};
use crate::url_model::{derive_relative_path, PathOptions, UrlPathError};

/// Fatal errors for a whole run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("create output directory {}", path.display())]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why an entry produced no file.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("malformed entry ({0})")]
    MalformedEntry(String),
    #[error("missing request URL")]
    MissingUrl,
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] UrlPathError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file written by the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Position of the entry in `log.entries`.
    pub index: usize,
    pub url: String,
    /// Path relative to the output root.
    pub relative_path: PathBuf,
    pub bytes: usize,
}

/// An entry that was skipped.
#[derive(Debug)]
pub struct EntryFailure {
    pub index: usize,
    pub url: Option<String>,
    pub reason: SkipReason,
}

/// Outcome of [`Extractor::run`].
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub written: Vec<ExtractedFile>,
    pub failures: Vec<EntryFailure>,
    /// The output root did not exist before the run.
    pub created_root: bool,
}

impl ExtractReport {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.failures.len()
    }
}

/// Writes HAR response bodies to disk.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    opts: PathOptions,
}

impl Extractor {
    pub fn new(opts: PathOptions) -> Self {
        Self { opts }
    }

    /// Extracts every entry of `har` under `output_root`, creating it if needed.
    pub fn run(
        &self,
        har: &HarDocument,
        output_root: &Path,
    ) -> Result<ExtractReport, ExtractError> {
        let mut report = ExtractReport {
            created_root: !output_root.is_dir(),
            ..ExtractReport::default()
        };
        fs::create_dir_all(output_root).map_err(|source| ExtractError::OutputRoot {
            path: output_root.to_path_buf(),
            source,
        })?;
        if report.created_root {
            tracing::info!("created output directory {}", output_root.display());
        }

        let mut used = UsedPaths::new();
        for (index, slot) in har.entries().iter().enumerate() {
            let entry = match slot {
                EntrySlot::Entry(entry) => entry,
                EntrySlot::Malformed(value) => {
                    let reason = SkipReason::MalformedEntry(describe_json(value).to_string());
                    record_failure(&mut report, index, None, reason);
                    continue;
                }
            };
            let url = entry.url().map(str::to_string);
            match self.extract_entry(entry, output_root, &mut used) {
                Ok((relative_path, bytes)) => {
                    tracing::info!(
                        "entry {index}: saved {} ({bytes} bytes)",
                        relative_path.display()
                    );
                    report.written.push(ExtractedFile {
                        index,
                        url: url.unwrap_or_default(),
                        relative_path,
                        bytes,
                    });
                }
                Err(reason) => record_failure(&mut report, index, url, reason),
            }
        }

        tracing::info!(
            "extraction finished: {} written, {} skipped",
            report.written_count(),
            report.skipped_count()
        );
        Ok(report)
    }

    /// Derive → decode → claim → write for one entry.
    fn extract_entry(
        &self,
        entry: &HarEntry,
        output_root: &Path,
        used: &mut UsedPaths,
    ) -> Result<(PathBuf, usize), SkipReason> {
        let url = entry.url().ok_or(SkipReason::MissingUrl)?;
        let candidate = derive_relative_path(url, &self.opts)?;
        let data = content::decode(entry.content())?;
        if let Some(mime) = entry.content().mime_type.as_deref() {
            tracing::trace!("{url}: {mime}, {} bytes", data.len());
        }

        let relative_path = used.claim(&candidate);
        if relative_path != candidate {
            tracing::debug!(
                "{} already used; writing {}",
                candidate.display(),
                relative_path.display()
            );
        }

        write_file(output_root, &relative_path, &data).map_err(|source| SkipReason::Write {
            path: relative_path.clone(),
            source,
        })?;
        Ok((relative_path, data.len()))
    }
}

/// Extracts with default path options.
pub fn run(har: &HarDocument, output_root: &Path) -> Result<ExtractReport, ExtractError> {
    Extractor::default().run(har, output_root)
}

fn record_failure(
    report: &mut ExtractReport,
    index: usize,
    url: Option<String>,
    reason: SkipReason,
) {
    match url.as_deref() {
        Some(u) => tracing::warn!("entry {index} ({u}) skipped: {reason}"),
        None => tracing::warn!("entry {index} skipped: {reason}"),
    }
    report.failures.push(EntryFailure { index, url, reason });
}

fn write_file(root: &Path, relative_path: &Path, data: &[u8]) -> io::Result<()> {
    let full = root.join(relative_path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&full, data)
}

fn describe_json(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object with unexpected field types",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::parse_har;

    fn doc(json: &str) -> HarDocument {
        parse_har(json.as_bytes(), Path::new("test.har")).unwrap()
    }

    #[test]
    fn scenario_plain_css() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"https://example.com/style.css"},
             "response":{"content":{"text":"body{color:red}","mimeType":"text/css"}}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert_eq!(report.written_count(), 1);
        assert!(report.failures.is_empty());
        assert!(!report.created_root);
        assert_eq!(report.written[0].relative_path, Path::new("style.css"));
        assert_eq!(
            fs::read(out.path().join("style.css")).unwrap(),
            b"body{color:red}"
        );
    }

    #[test]
    fn missing_url_recorded() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{}, "response":{"content":{"text":"x"}}},
            {"request":{"url":""}},
            {"request":{"url":"https://example.com/ok.txt"},"response":{"content":{"text":"ok"}}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert_eq!(report.written_count(), 1);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0].reason, SkipReason::MissingUrl));
        assert_eq!(report.failures[1].index, 1);
        assert_eq!(report.written[0].index, 2);
    }

    #[test]
    fn invalid_url_recorded() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"not a url"}},
            {"request":{"url":"data:image/png;base64,AAAA"}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert_eq!(report.written_count(), 0);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.reason, SkipReason::InvalidUrl(_))));
        assert_eq!(report.failures[0].url.as_deref(), Some("not a url"));
    }

    #[test]
    fn malformed_slot_recorded() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":["oops",{"request":{"url":"https://e.com/a.txt"}}]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert_eq!(report.written_count(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.index, 0);
        assert_eq!(failure.reason.to_string(), "malformed entry (string)");
    }

    #[test]
    fn decode_failure_does_not_claim_path() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"https://e.com/logo.png"},"response":{"content":{"text":"%%%","encoding":"base64"}}},
            {"request":{"url":"https://e.com/logo.png"},"response":{"content":{"text":"AAEC","encoding":"base64"}}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert!(matches!(report.failures[0].reason, SkipReason::Decode(_)));
        assert_eq!(report.written[0].relative_path, Path::new("logo.png"));
        assert_eq!(fs::read(out.path().join("logo.png")).unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn creates_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested").join("out");
        let har = doc(r#"{"log":{"entries":[{"request":{"url":"https://e.com/"}}]}}"#);
        let report = run(&har, &root).unwrap();
        assert!(report.created_root);
        assert!(root.join("index.html").is_file());
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("taken");
        fs::write(&root, b"x").unwrap();
        let har = doc(r#"{"log":{"entries":[]}}"#);
        let err = run(&har, &root).unwrap_err();
        assert!(matches!(err, ExtractError::OutputRoot { .. }));
    }

    #[test]
    fn write_failure_is_per_entry() {
        let out = tempfile::tempdir().unwrap();
        // A directory left behind by an earlier run where this run wants a file.
        fs::create_dir_all(out.path().join("busy.txt")).unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"https://e.com/busy.txt"},"response":{"content":{"text":"a"}}},
            {"request":{"url":"https://e.com/free.txt"},"response":{"content":{"text":"b"}}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        assert_eq!(report.written_count(), 1);
        assert!(matches!(report.failures[0].reason, SkipReason::Write { .. }));
        assert_eq!(fs::read(out.path().join("free.txt")).unwrap(), b"b");
    }

    #[test]
    fn failed_write_still_uses_up_the_name() {
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(out.path().join("busy.txt")).unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"https://e.com/busy.txt"},"response":{"content":{"text":"a"}}},
            {"request":{"url":"https://e.com/busy.txt"},"response":{"content":{"text":"b"}}}
        ]}}"#);
        let report = run(&har, out.path()).unwrap();
        match &report.failures[0].reason {
            SkipReason::Write { path, .. } => assert_eq!(path, Path::new("busy.txt")),
            other => panic!("expected write failure, got {other:?}"),
        }
        assert_eq!(report.written[0].relative_path, Path::new("busy_1.txt"));
        assert_eq!(fs::read(out.path().join("busy_1.txt")).unwrap(), b"b");
    }

    #[test]
    fn group_by_host_option() {
        let out = tempfile::tempdir().unwrap();
        let har = doc(r#"{"log":{"entries":[
            {"request":{"url":"https://a.example/"}},
            {"request":{"url":"https://b.example/"}}
        ]}}"#);
        let extractor = Extractor::new(PathOptions {
            group_by_host: true,
            ..PathOptions::default()
        });
        let report = extractor.run(&har, out.path()).unwrap();
        assert_eq!(report.written[0].relative_path, Path::new("a.example/index.html"));
        assert_eq!(report.written[1].relative_path, Path::new("b.example/index.html"));
    }
}
