use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// One `<key>.json` file per slot inside a data directory.
/// Writes land in a temp file in the same directory and are renamed over the slot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        // Non-UTF-8 bytes are returned lossily so the caller's parse rejects them.
        match tokio::fs::read(self.slot_path(key)).await {
            Ok(bytes) => Ok(Some(match String::from_utf8(bytes) {
                Ok(raw) => raw,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        let path = self.slot_path(key);
        let value = value.to_owned();

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(value.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            debug!("Wrote slot file {}", path.display());
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Unavailable(format!("file write task failed: {e}")))??;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();
        assert_eq!(storage.get("resumeData").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).await.unwrap();
        storage.set("resumeData", r#"{"a":1}"#).await.unwrap();
        storage.set("resumeData", r#"{"a":2}"#).await.unwrap();

        assert_eq!(
            storage.get("resumeData").await.unwrap().as_deref(),
            Some(r#"{"a":2}"#)
        );
        assert!(dir.path().join("resumeData.json").exists());
    }

    #[tokio::test]
    async fn test_invalid_utf8_slot_is_replaced_by_default() {
        use crate::models::resume::ResumeRecord;
        use crate::store::{LoadOutcome, ResumeStore, STORAGE_KEY};
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let slot = dir.path().join(format!("{STORAGE_KEY}.json"));
        std::fs::write(&slot, [0xff, 0xfe, 0x00]).unwrap();

        let storage = FileStorage::open(dir.path()).await.unwrap();
        assert!(storage.get(STORAGE_KEY).await.unwrap().is_some());

        let store = ResumeStore::new(Arc::new(storage));
        let (record, outcome) = store.load().await;
        assert_eq!(outcome, LoadOutcome::RecoveredFromCorruption);
        assert_eq!(record, ResumeRecord::default_record());

        let rewritten: ResumeRecord =
            serde_json::from_str(&std::fs::read_to_string(&slot).unwrap()).unwrap();
        assert_eq!(rewritten, record);
        assert_eq!(store.load().await.1, LoadOutcome::Loaded);
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        FileStorage::open(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
