//! Per-run registry of claimed output paths and collision resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::url_model::{prefix_within, split_extension, NAME_MAX};

/// Relative paths already assigned in the current run.
///
/// Keys are case-folded so that `Logo.png` and `logo.png` never land on the
/// same file on case-insensitive filesystems.
#[derive(Debug, Default)]
pub struct UsedPaths {
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl UsedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Claims a unique path for `candidate` and returns it.
    ///
    /// A directory component that is already a claimed file is renamed with a
    /// numeric suffix (deterministically, so siblings follow it). The file name
    /// itself is numbered until it is neither a claimed file nor a directory:
    /// `style.css`, `style_1.css`, `style_2.css`, ...
    pub fn claim(&mut self, candidate: &Path) -> PathBuf {
        let names: Vec<String> = candidate
            .iter()
            .map(|c| c.to_string_lossy().into_owned())
            .collect();
        let Some((file_name, dir_names)) = names.split_last() else {
            return candidate.to_path_buf();
        };

        let mut resolved = PathBuf::new();
        for dir in dir_names {
            let mut n = 0u64;
            loop {
                let next = resolved.join(numbered_name(dir, n));
                if !self.files.contains(&fold(&next)) {
                    resolved = next;
                    break;
                }
                n += 1;
            }
        }

        let mut n = 0u64;
        let path = loop {
            let next = resolved.join(numbered_name(file_name, n));
            let key = fold(&next);
            if !self.files.contains(&key) && !self.dirs.contains(&key) {
                break next;
            }
            n += 1;
        };

        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(fold(ancestor));
        }
        self.files.insert(fold(&path));
        path
    }
}

fn fold(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

/// `name` for `n == 0`, else `name` with `_n` before the extension.
/// The result never exceeds NAME_MAX: the stem is shortened first, and an
/// extension too long to keep alongside the suffix is treated as part of the stem.
pub fn numbered_name(name: &str, n: u64) -> String {
    if n == 0 {
        return name.to_string();
    }
    let suffix = format!("_{n}");
    match split_extension(name) {
        (stem, Some(ext)) if suffix.len() + ext.len() + 1 < NAME_MAX => {
            let room = NAME_MAX - (suffix.len() + ext.len() + 1);
            format!("{}{suffix}.{ext}", prefix_within(stem, room))
        }
        _ => {
            let room = NAME_MAX.saturating_sub(suffix.len());
            format!("{}{suffix}", prefix_within(name, room))
        }
    }
}
