//! Directory-backed key-value store: one JSON file per key.
//!
//! Keys are percent-encoded into file names, so any non-empty key maps to a
//! single file directly inside the root.

use super::KeyValueStore;
use crate::core::{PickerError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const FILE_EXTENSION: &str = "json";

/// Everything but `[A-Za-z0-9_-]` is escaped, including `.` and `/`.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            PickerError::Storage(format!(
                "Failed to create store directory '{}': {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(PickerError::Storage("Storage key must not be empty".into()));
        }
        let name = utf8_percent_encode(key, KEY_ENCODE_SET);
        Ok(self.root.join(format!("{}.{}", name, FILE_EXTENSION)))
    }
}

fn key_from_stem(stem: &str) -> Option<String> {
    percent_decode_str(stem)
        .decode_utf8()
        .ok()
        .map(|key| key.into_owned())
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PickerError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Temp file lives next to the target so the rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(|e| {
            PickerError::Storage(format!(
                "Failed to create temp file in '{}': {}",
                self.root.display(),
                e
            ))
        })?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| PickerError::Storage(format!("Failed to write temp file: {}", e)))?;
        tmp.persist(&path).map_err(|e| {
            PickerError::Storage(format!(
                "Failed to rename temp file -> '{}': {}",
                path.display(),
                e.error
            ))
        })?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PickerError::Storage(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            PickerError::Storage(format!(
                "Failed to list '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PickerError::Storage(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(key_from_stem)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp_dir.path()).unwrap();
            store.set_item("pickerItems", r#"[{"id":"1","text":"Pizza"}]"#).unwrap();
        }

        let store = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(
            store.get_item("pickerItems").unwrap().as_deref(),
            Some(r#"[{"id":"1","text":"Pizza"}]"#)
        );
        assert!(temp_dir.path().join("pickerItems.json").exists());
    }

    #[test]
    fn test_remove_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.get_item("absent").unwrap(), None);
        store.remove_item("absent").unwrap();

        store.set_item("k", "1").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        store.set_item("b", "1").unwrap();
        store.set_item("a", "2").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_rejects_empty_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        assert!(matches!(store.set_item("", "1"), Err(PickerError::Storage(_))));
    }

    #[test]
    fn test_arbitrary_keys_stay_inside_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("store");
        let keys = ["../escape", "a/b", ".hidden", "my teams", "équipe 100%"];
        {
            let store = FileStore::open(&root).unwrap();
            for (n, key) in keys.iter().enumerate() {
                store.set_item(key, &n.to_string()).unwrap();
            }
        }

        let store = FileStore::open(&root).unwrap();
        for (n, key) in keys.iter().enumerate() {
            assert_eq!(store.get_item(key).unwrap(), Some(n.to_string()));
        }
        let mut expected: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        expected.sort();
        assert_eq!(store.keys().unwrap(), expected);

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
        assert!(root.join("my%20teams.json").exists());
        assert!(root.join("%2Ehidden.json").exists());
    }
}
