//! JSON persistence for the local request store
//!
//! Writes go to a sibling `.tmp` file that is synced and renamed over the
//! target, so `requests.json` is always either the old or the new snapshot.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{BuzzPayError, BuzzPayResult};

fn store_error(path: &Path, action: &str, cause: impl Display) -> BuzzPayError {
    BuzzPayError::Store(format!(
        "request store {}: {} failed: {}",
        path.display(),
        action,
        cause
    ))
}

/// Load a snapshot, or `T::default()` when the store has never been written
pub fn read_json<T, P>(path: P) -> BuzzPayResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no store file yet");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| store_error(path, "open", e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        store_error(
            path,
            "parse",
            format!("{} (fix or move the file aside to start empty)", e),
        )
    })
}

/// Replace the snapshot at `path` with `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> BuzzPayResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| store_error(parent, "create directory", e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| store_error(path, "replace", e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> BuzzPayResult<()> {
    let file = File::create(temp_path).map_err(|e| store_error(temp_path, "create", e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| store_error(temp_path, "serialize", e))?;
    writer.flush().map_err(|e| store_error(temp_path, "flush", e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| store_error(temp_path, "sync", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        requests: Vec<String>,
    }

    #[test]
    fn test_missing_file_is_empty_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot: Snapshot = read_json(temp_dir.path().join("requests.json")).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_write_replaces_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("requests.json");

        write_json_atomic(&path, &Snapshot { requests: vec!["a".into()] }).unwrap();
        write_json_atomic(&path, &Snapshot { requests: vec!["b".into()] }).unwrap();

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded.requests, vec!["b".to_string()]);
        assert!(!temp_dir.path().join("data").join("requests.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_names_the_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("requests.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<Snapshot, _>(&path).unwrap_err();
        assert!(err.is_store());
        let message = err.to_string();
        assert!(message.contains("requests.json"));
        assert!(message.contains("parse failed"));
    }

    #[test]
    fn test_failed_replace_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = temp_dir.path().join("requests.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = write_json_atomic(&path, &Snapshot::default()).unwrap_err();
        assert!(err.is_store());
        assert!(!temp_dir.path().join("requests.json.tmp").exists());
    }
}
