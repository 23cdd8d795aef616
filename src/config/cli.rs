use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 以本機目錄保存 session 檔案
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        match tokio::fs::remove_file(self.full_path(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("dir");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("session.json", b"{}").await.unwrap();

        assert_eq!(storage.read_file("session.json").await.unwrap(), b"{}");
        assert!(base.join("session.json").exists());
    }

    #[test]
    fn test_full_path_joins_base() {
        let storage = LocalStorage::new("/var/lib/signup".to_string());
        assert_eq!(
            storage.full_path("session.json"),
            Path::new("/var/lib/signup").join("session.json")
        );
        assert!(tokio_test::block_on(storage.read_file("missing-session.json")).is_err());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.remove_file("session.json").await.is_ok());
        assert!(storage.read_file("session.json").await.is_err());
    }
}
