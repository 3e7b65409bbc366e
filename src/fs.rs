//! Filesystem access needed after an import.

use std::future::Future;
use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    /// Removes a consumed source file.
    fn delete_file(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// The local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    async fn delete_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_file() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("import.csv");
        tokio::fs::write(&path, "title,type,value,category\n").await?;

        LocalFs.delete_file(&path).await?;
        assert!(!path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_file_fails() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let result = LocalFs.delete_file(&dir.path().join("missing.csv")).await;
        assert_eq!(result.map_err(|e| e.kind()), Err(io::ErrorKind::NotFound));
        Ok(())
    }
}
