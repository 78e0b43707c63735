//! File-backed high-score list.
//!
//! The file is a JSON object mapping keys to numeric arrays; this crate owns
//! the one under [`HIGHSCORES_KEY`] and leaves any other keys alone:
//!
//! ```json
//! { "fragtris.highscores": [24641.9, 10000.0] }
//! ```
//!
//! A missing file is an empty list. Writes go to a sibling temp file that is
//! then renamed over the original, so a crash mid-write leaves the old list.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tui_fragtris_core::highscores::{normalize, ScoreStore};

/// Fixed key the list lives under.
pub const HIGHSCORES_KEY: &str = "fragtris.highscores";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct ScoreFile {
    entries: BTreeMap<String, Vec<f64>>,
}

impl ScoreFile {
    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let tmp = temp_path(path);
        let text = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, text).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move {} into place", tmp.display()))?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "scores".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// High-score store backed by a JSON file.
///
/// [`load`](Self::load) and [`save`](Self::save) report failures. Through the
/// [`ScoreStore`] trait, failures degrade to an empty list (reads) or a no-op
/// (writes) and the error is kept for [`take_error`](Self::take_error).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    last_error: RefCell<Option<anyhow::Error>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_error: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored list, highest first. A missing file or key is an empty list.
    pub fn load(&self) -> Result<Vec<f64>> {
        let file = ScoreFile::read(&self.path)?;
        Ok(normalize(
            file.entries.get(HIGHSCORES_KEY).cloned().unwrap_or_default(),
        ))
    }

    /// Replace the stored list. Other keys survive; an unreadable file is replaced.
    pub fn save(&self, scores: &[f64]) -> Result<()> {
        let mut file = ScoreFile::read(&self.path).unwrap_or_default();
        file.entries
            .insert(HIGHSCORES_KEY.to_string(), normalize(scores.to_vec()));
        file.write(&self.path)
    }

    /// Most recent error swallowed by the [`ScoreStore`] impl.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.last_error.get_mut().take()
    }

    fn remember(&self, err: anyhow::Error) {
        *self.last_error.borrow_mut() = Some(err);
    }
}

impl ScoreStore for JsonFileStore {
    fn get_scores(&self) -> Vec<f64> {
        self.load().unwrap_or_else(|err| {
            self.remember(err);
            Vec::new()
        })
    }

    fn set_scores(&mut self, scores: &[f64]) {
        if let Err(err) = self.save(scores) {
            self.remember(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tui_fragtris_core::record_score;

    fn scratch_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("fragtris_scores_{tag}_{nanos}.json"))
    }

    #[test]
    fn missing_file_is_empty() {
        let store = JsonFileStore::new(scratch_path("missing"));
        assert_eq!(store.load().unwrap(), Vec::<f64>::new());
        assert!(store.get_scores().is_empty());
    }

    #[test]
    fn save_then_load_through_score_store() {
        let path = scratch_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(record_score(&mut store, 10_000.0), Some(0));
        assert_eq!(record_score(&mut store, 30_000.0), Some(0));
        assert_eq!(record_score(&mut store, 20_000.0), Some(1));

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get_scores(), vec![30_000.0, 20_000.0, 10_000.0]);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(HIGHSCORES_KEY));
        assert!(!temp_path(&path).exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_keeps_error() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        assert!(store.load().is_err());
        assert!(store.get_scores().is_empty());
        assert!(store.take_error().is_some());
        assert!(store.take_error().is_none());

        // Saving replaces the broken file.
        store.set_scores(&[5.0]);
        assert!(store.take_error().is_none());
        assert_eq!(store.load().unwrap(), vec![5.0]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn other_keys_are_preserved() {
        let path = scratch_path("keys");
        fs::write(&path, r#"{"other.game": [1.0, 2.0]}"#).unwrap();
        let store = JsonFileStore::new(&path);
        store.save(&[7.0]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, Vec<f64>> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["other.game"], vec![1.0, 2.0]);
        assert_eq!(parsed[HIGHSCORES_KEY], vec![7.0]);
        let _ = fs::remove_file(&path);
    }
}
