use crate::utils::error::AppError;
use chrono::Local;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the user store. `None` when the file does not exist yet; a
/// malformed or non-object document is fatal.
pub fn load_store(path: &Path) -> Result<Option<Map<String, Value>>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("failed to read {}: {}", path.display(), e)))?;

    let store: Map<String, Value> = serde_json::from_str(&raw)
        .map_err(|e| AppError::Parse(format!("invalid JSON in {}: {}", path.display(), e)))?;

    Ok(Some(store))
}

/// Backup name next to the primary: `<stem>_backup_<YYYYmmdd_HHMMSS>.json`.
fn backup_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("user_progress");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    path.with_file_name(format!("{}_backup_{}.json", stem, timestamp))
}

/// Persists the store: backup first, then the primary file, both with the
/// same serialized bytes. If the backup write fails the primary is never
/// touched; if the primary write fails the backup is the recovery point.
/// Returns the backup path.
pub fn write_with_backup(path: &Path, store: &Map<String, Value>) -> Result<PathBuf, AppError> {
    let serialized = serde_json::to_string_pretty(store)
        .map_err(|e| AppError::Serialize(format!("failed to serialize user store: {}", e)))?;

    let backup = backup_path(path);
    fs::write(&backup, &serialized)
        .map_err(|e| AppError::Io(format!("failed to write backup {}: {}", backup.display(), e)))?;
    log::debug!("💾 Backup written: {}", backup.display());

    fs::write(path, &serialized)
        .map_err(|e| AppError::Io(format!("failed to rewrite {}: {}", path.display(), e)))?;
    log::debug!("💾 Store rewritten: {}", path.display());

    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn store_with_one_user() -> Map<String, Value> {
        let mut store = Map::new();
        store.insert(
            "a@x".to_string(),
            json!({ "name": "A", "email": "a@x" }),
        );
        store
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");

        let loaded = load_store(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_json_fails_and_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");
        fs::write(&path, "{").unwrap();

        let result = load_store(&path);
        assert!(matches!(result, Err(AppError::Parse(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{");
    }

    #[test]
    fn test_load_non_object_document_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(load_store(&path), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_backup_byte_equals_primary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");

        let store = store_with_one_user();
        let backup = write_with_backup(&path, &store).unwrap();

        let primary_bytes = fs::read(&path).unwrap();
        let backup_bytes = fs::read(&backup).unwrap();
        assert_eq!(primary_bytes, backup_bytes);

        let reloaded = load_store(&path).unwrap().unwrap();
        assert_eq!(reloaded, store);
    }

    #[test]
    fn test_backup_name_pattern() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");

        let backup = write_with_backup(&path, &Map::new()).unwrap();

        let name = backup.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("user_progress_backup_"));
        assert!(name.ends_with(".json"));
        // YYYYmmdd_HHMMSS
        let timestamp = &name["user_progress_backup_".len()..name.len() - ".json".len()];
        assert_eq!(timestamp.len(), 15);
        assert_eq!(timestamp.as_bytes()[8], b'_');
        assert_eq!(backup.parent(), path.parent());
    }

    #[test]
    fn test_empty_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_progress.json");

        write_with_backup(&path, &Map::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        let reloaded = load_store(&path).unwrap().unwrap();
        assert!(reloaded.is_empty());
    }
}
