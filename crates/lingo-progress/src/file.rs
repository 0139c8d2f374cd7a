//! File-backed progress store.
//!
//! [`FileProgressStore`] keeps all languages in one JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "languages": {
//!     "cpp": { "completed": ["hello-world"], "last_visited": "variables" }
//!   }
//! }
//! ```
//!
//! Every operation re-reads the file, so several processes sharing a progress
//! file see each other's updates. A missing, unreadable, corrupt or
//! version-mismatched file reads as empty progress and is replaced on the
//! next write.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::ProgressStore;

/// Format version written to new files.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgressFile {
    version: u32,
    #[serde(default)]
    languages: BTreeMap<String, LanguageProgress>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LanguageProgress {
    #[serde(default)]
    completed: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_visited: Option<String>,
}

/// [`ProgressStore`] persisted as a JSON file.
pub struct FileProgressStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileProgressStore {
    /// Create a store at `path`. The file is created on the first write.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the progress file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ProgressFile {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no progress file yet");
                return ProgressFile::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read progress: {e}");
                return ProgressFile::default();
            }
        };

        match serde_json::from_str::<ProgressFile>(&text) {
            Ok(file) if file.version == FORMAT_VERSION => file,
            Ok(file) => {
                tracing::info!(
                    "progress format mismatch (stored={}, current={FORMAT_VERSION}), ignoring",
                    file.version
                );
                ProgressFile::default()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "corrupt progress file: {e}");
                ProgressFile::default()
            }
        }
    }

    fn save(&self, file: &ProgressFile) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!("failed to create progress directory: {e}");
            return;
        }

        let bytes = match serde_json::to_vec_pretty(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("failed to serialize progress: {e}");
                return;
            }
        };

        // Write then rename so readers never observe a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, bytes) {
            tracing::warn!(path = %tmp.display(), "failed to write progress: {e}");
            return;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            tracing::warn!(path = %self.path.display(), "failed to replace progress: {e}");
            let _ = fs::remove_file(&tmp);
        }
    }

    fn update(&self, lang_id: &str, apply: impl FnOnce(&mut LanguageProgress) -> bool) {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut file = self.load();
        file.version = FORMAT_VERSION;
        let changed = apply(file.languages.entry(lang_id.to_owned()).or_default());
        if changed {
            self.save(&file);
        }
    }

    fn read<T>(&self, lang_id: &str, view: impl FnOnce(&LanguageProgress) -> T) -> T {
        let file = self.load();
        let empty = LanguageProgress::default();
        view(file.languages.get(lang_id).unwrap_or(&empty))
    }
}

impl ProgressStore for FileProgressStore {
    fn is_completed(&self, lang_id: &str, entry_id: &str) -> bool {
        self.read(lang_id, |p| p.completed.contains(entry_id))
    }

    fn mark_completed(&self, lang_id: &str, entry_id: &str) {
        self.update(lang_id, |p| p.completed.insert(entry_id.to_owned()));
    }

    fn count_completed(&self, lang_id: &str) -> usize {
        self.read(lang_id, |p| p.completed.len())
    }

    fn last_visited(&self, lang_id: &str) -> Option<String> {
        self.read(lang_id, |p| p.last_visited.clone())
    }

    fn record_visit(&self, lang_id: &str, entry_id: &str) {
        self.update(lang_id, |p| {
            if p.last_visited.as_deref() == Some(entry_id) {
                return false;
            }
            p.last_visited = Some(entry_id.to_owned());
            true
        });
    }

    fn reset(&self, lang_id: &str) {
        self.update(lang_id, |p| {
            let had_progress = !p.completed.is_empty() || p.last_visited.is_some();
            *p = LanguageProgress::default();
            had_progress
        });
    }
}
