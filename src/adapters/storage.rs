use crate::domain::model::{Namespace, StoredRecord};
use crate::domain::ports::{ConfigProvider, RecordStore};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::validate_record_id;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const RECORD_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// One `<id>.json` file per record under `<root>/<namespace dir>/`.
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    root: PathBuf,
    carts_dir: String,
    games_dir: String,
}

impl FsRecordStore {
    /// Store rooted at `root` using the default `carts` and `games` directories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_dirs(root, Namespace::Carts.as_str(), Namespace::Games.as_str())
    }

    /// Same as [`FsRecordStore::new`] with custom namespace directory names.
    /// Directory names are joined onto `root` as given; callers validate them.
    pub fn with_dirs(
        root: impl Into<PathBuf>,
        carts_dir: impl Into<String>,
        games_dir: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            carts_dir: carts_dir.into(),
            games_dir: games_dir.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::with_dirs(config.data_root(), config.carts_dir(), config.games_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every record of `namespace`. It may not exist yet.
    pub fn namespace_dir(&self, namespace: Namespace) -> PathBuf {
        match namespace {
            Namespace::Carts => self.root.join(&self.carts_dir),
            Namespace::Games => self.root.join(&self.games_dir),
        }
    }

    fn record_path(&self, namespace: Namespace, id: &str) -> Result<PathBuf> {
        validate_record_id(id)?;
        Ok(self
            .namespace_dir(namespace)
            .join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    /// Hidden sibling of `path`; its extension keeps it out of `list_all`.
    fn temp_path(path: &Path, id: &str) -> PathBuf {
        path.with_file_name(format!(
            ".{}.{}.{}",
            id,
            Uuid::new_v4().simple(),
            TEMP_EXTENSION
        ))
    }

    fn not_found(namespace: Namespace, id: &str) -> CartError {
        CartError::NotFound {
            namespace: namespace.to_string(),
            id: id.to_string(),
        }
    }
}

impl RecordStore for FsRecordStore {
    async fn load(&self, namespace: Namespace, id: &str) -> Result<Value> {
        let path = self.record_path(namespace, id)?;
        tracing::debug!("Reading record {}", path.display());

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Self::not_found(namespace, id))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes to a temporary file in the same directory, then renames it over
    /// the record. Readers see either the old document or the new one.
    async fn save(&self, namespace: Namespace, id: &str, document: &Value) -> Result<()> {
        let path = self.record_path(namespace, id)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec(document)?;
        let temp = Self::temp_path(&path, id);
        tracing::debug!("Writing record {} ({} bytes)", path.display(), data.len());

        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            tracing::warn!("Could not move {} into place: {}", temp.display(), e);
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, namespace: Namespace, id: &str) -> Result<()> {
        let path = self.record_path(namespace, id)?;
        tracing::debug!("Deleting record {}", path.display());

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Self::not_found(namespace, id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Every `*.json` record in the namespace, sorted by id. Other files,
    /// including interrupted temporary writes, are ignored.
    async fn list_all(&self, namespace: Namespace) -> Result<Vec<StoredRecord>> {
        let dir = self.namespace_dir(namespace);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // A namespace nobody has written to yet holds no records.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let document = self.load(namespace, &id).await?;
            records.push(StoredRecord { id, document });
        }

        tracing::debug!("Listed {} {} records", records.len(), namespace);
        Ok(records)
    }

    async fn exists(&self, namespace: Namespace, id: &str) -> Result<bool> {
        let path = self.record_path(namespace, id)?;
        Ok(fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load_returns_same_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        let doc = json!({"id": "a1", "amountOfGames": 0, "games": [], "totalPrice": 0});

        store.save(Namespace::Carts, "a1", &doc).await.unwrap();

        assert!(temp_dir.path().join("carts").join("a1.json").exists());
        assert_eq!(store.load(Namespace::Carts, "a1").await.unwrap(), doc);
        assert!(store.exists(Namespace::Carts, "a1").await.unwrap());
        assert!(!store.exists(Namespace::Games, "a1").await.unwrap());
    }

    #[tokio::test]
    async fn test_load_missing_record_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());

        let err = store.load(Namespace::Carts, "nope").await.unwrap_err();
        assert!(matches!(err, CartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_document_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("games");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.json"), b"{not json").unwrap();
        let store = FsRecordStore::new(temp_dir.path());

        let err = store.load(Namespace::Games, "broken").await.unwrap_err();
        assert!(matches!(err, CartError::Serialization(_)));
        assert!(store.list_all(Namespace::Games).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_reports_missing_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        store.save(Namespace::Carts, "x", &json!({})).await.unwrap();

        store.delete(Namespace::Carts, "x").await.unwrap();
        let err = store.delete(Namespace::Carts, "x").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_all_is_sorted_and_skips_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        store.save(Namespace::Games, "b", &json!({"n": 2})).await.unwrap();
        store.save(Namespace::Games, "a", &json!({"n": 1})).await.unwrap();
        std::fs::write(temp_dir.path().join("games").join("README.txt"), b"hi").unwrap();

        let records = store.list_all(Namespace::Games).await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(records[0].document, json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_document_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        store.save(Namespace::Carts, "c1", &json!({"v": 1})).await.unwrap();
        store.save(Namespace::Carts, "c1", &json!({"v": 2})).await.unwrap();

        assert_eq!(store.load(Namespace::Carts, "c1").await.unwrap(), json!({"v": 2}));

        let names: Vec<String> = std::fs::read_dir(temp_dir.path().join("carts"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["c1.json".to_string()]);
    }

    #[tokio::test]
    async fn test_interrupted_write_leaves_record_intact() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        store.save(Namespace::Carts, "c1", &json!({"v": 1})).await.unwrap();
        // What a crash between write and rename leaves behind.
        std::fs::write(
            temp_dir.path().join("carts").join(".c1.0123abcd.tmp"),
            b"{\"v\": 2",
        )
        .unwrap();

        let records = store.list_all(Namespace::Carts).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].document, json!({"v": 1}));
    }

    #[tokio::test]
    async fn test_list_all_on_missing_namespace_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(temp_dir.path());
        assert!(store.list_all(Namespace::Carts).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_custom_directories_and_id_checks() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsRecordStore::with_dirs(temp_dir.path(), "baskets", "catalog");
        store.save(Namespace::Carts, "c", &json!({})).await.unwrap();
        assert!(temp_dir.path().join("baskets").join("c.json").exists());

        let err = store
            .save(Namespace::Carts, "../escape", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::Validation { .. }));
    }
}
