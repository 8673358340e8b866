//! Builds HAR documents for tests.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// One entry: URL plus optional body and encoding.
pub fn entry(url: &str, text: Option<&str>, encoding: Option<&str>) -> Value {
    let mut content = json!({ "size": 0, "mimeType": "application/octet-stream" });
    if let Some(text) = text {
        content["text"] = json!(text);
    }
    if let Some(encoding) = encoding {
        content["encoding"] = json!(encoding);
    }
    json!({
        "startedDateTime": "2024-01-01T00:00:00.000Z",
        "time": 12.5,
        "request": { "method": "GET", "url": url, "httpVersion": "HTTP/1.1", "headers": [] },
        "response": { "status": 200, "statusText": "OK", "headers": [], "content": content }
    })
}

pub fn text_entry(url: &str, text: &str) -> Value {
    entry(url, Some(text), None)
}

pub fn har(entries: Vec<Value>) -> Value {
    json!({
        "log": {
            "version": "1.2",
            "creator": { "name": "harx-tests", "version": "0" },
            "entries": entries
        }
    })
}

/// Writes `doc` to `dir/name` and returns the path.
pub fn write_har(dir: &Path, name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(doc).unwrap()).unwrap();
    path
}
