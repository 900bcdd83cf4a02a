//! Local filesystem storage for downloaded decks.
//!
//! Files land directly in the destination folder. Each write goes to a
//! `.part` file first and is renamed into place, so an interrupted download
//! never leaves a truncated `.zip` behind under the final name.

use std::path::{Component, Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Destination folder for downloaded files.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given directory.
    ///
    /// The directory is not created; it must exist before the first write.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Full path for a file name, which must be a single path component.
    pub fn path(&self, file_name: &str) -> Result<PathBuf> {
        Ok(self.root_dir.join(safe_file_name(file_name)?))
    }

    /// Fail early if the destination folder is missing.
    pub async fn ensure_exists(&self) -> Result<()> {
        match tokio::fs::metadata(&self.root_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(AppError::config(format!(
                "destination {} is not a directory",
                self.root_dir.display()
            ))),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename), replacing any
    /// existing file of the same name. Path separators in `file_name` are
    /// replaced so the file always lands directly in the root folder.
    pub async fn write_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(file_name)?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".part");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = write_then_rename(&tmp, &path, bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {cleanup}", tmp.display());
            }
            return Err(e);
        }
        Ok(path)
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(tmp, path).await?;
    Ok(())
}

/// Replace path separators and reject names that would not be a plain
/// file inside the root folder.
fn safe_file_name(file_name: &str) -> Result<String> {
    let cleaned = file_name.replace(['/', '\\'], "-");
    let mut components = Path::new(&cleaned).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(cleaned),
        _ => Err(AppError::validation(format!(
            "'{file_name}' is not a usable file name"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let path = storage.write_bytes("deck.zip", b"hello").await.unwrap();
        assert_eq!(path, tmp.path().join("deck.zip"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");
        assert!(!tmp.path().join("deck.zip.part").exists());
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("deck.zip", b"old contents").await.unwrap();
        let path = storage.write_bytes("deck.zip", b"new").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_missing_folder_is_not_created() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missing"));

        assert!(storage.ensure_exists().await.is_err());
        assert!(storage.write_bytes("deck.zip", b"x").await.is_err());
        assert!(!tmp.path().join("missing").exists());
    }

    #[tokio::test]
    async fn test_separators_stay_inside_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("dest");
        tokio::fs::create_dir(&root).await.unwrap();
        let storage = LocalStorage::new(&root);

        let path = storage
            .write_bytes("../escaped - 06-2023.zip", b"x")
            .await
            .unwrap();
        assert_eq!(path, root.join("..-escaped - 06-2023.zip"));
        assert!(!tmp.path().join("escaped - 06-2023.zip").exists());

        let path = storage.write_bytes("Deck 1/2 - 06-2023.zip", b"y").await.unwrap();
        assert_eq!(path, root.join("Deck 1-2 - 06-2023.zip"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"y");
    }

    #[tokio::test]
    async fn test_rejects_dot_names() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        for name in ["", ".", ".."] {
            assert!(matches!(
                storage.write_bytes(name, b"x").await,
                Err(AppError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_part_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        // A directory under the target name makes the final rename fail
        tokio::fs::create_dir(tmp.path().join("deck.zip")).await.unwrap();
        tokio::fs::write(tmp.path().join("deck.zip").join("keep"), b"k")
            .await
            .unwrap();

        assert!(storage.write_bytes("deck.zip", b"x").await.is_err());
        assert!(!tmp.path().join("deck.zip.part").exists());
    }
}
