use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

use super::RecordStore;

const DEFAULT_DIR_NAME: &str = ".finances_core";
const STORE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed key-value store: each key becomes one JSON file under
/// the application data directory. Writes stage to a temporary sibling and
/// rename into place.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_data_dir);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), STORE_EXTENSION))
    }
}

impl RecordStore for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.finances_core`.
pub fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCES_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.get("@finances:transactions").unwrap().is_none());
    }

    #[test]
    fn set_then_get_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.set("@finances:transactions", "[]").expect("set");
        let value = storage.get("@finances:transactions").expect("get");
        assert_eq!(value.as_deref(), Some("[]"));
    }

    #[test]
    fn namespaced_keys_map_to_filename_slugs() {
        let (storage, _guard) = storage_with_temp_dir();
        let path = storage.path_for("@finances:transactions");
        assert!(path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name")
            .starts_with("_finances_transactions"));
    }

    #[test]
    fn remove_clears_the_key() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.set("@finances:transactions", "[]").expect("set");
        storage.remove("@finances:transactions").expect("remove");
        assert!(storage.get("@finances:transactions").unwrap().is_none());
    }

    #[test]
    fn overwrite_replaces_previous_value() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.set("k", "old").expect("set");
        storage.set("k", "new").expect("set again");
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("new"));
    }
}
