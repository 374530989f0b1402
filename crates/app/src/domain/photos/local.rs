//! Filesystem-backed photo storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::domain::photos::{PhotoStorage, PhotoStorageError};

#[derive(Debug, Clone)]
pub struct LocalPhotoStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalPhotoStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, PhotoStorageError> {
        let relative = Path::new(path);

        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        if path.is_empty() || !is_plain {
            return Err(PhotoStorageError::InvalidPath);
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl PhotoStorage for LocalPhotoStorage {
    async fn store(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        path: &str,
    ) -> Result<String, PhotoStorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(%path, %content_type, size = bytes.len(), "photo stored");

        Ok(format!("{}/{path}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scoutline-photos-{name}-{}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn writes_under_root_and_returns_public_url() -> TestResult {
        let root = scratch_dir("write");
        let storage = LocalPhotoStorage::new(&root, "https://cdn.scoutline.test/");

        let url = storage
            .store(vec![7, 7, 7], "image/png", "profiles/a/photo.png")
            .await?;

        assert_eq!(url, "https://cdn.scoutline.test/profiles/a/photo.png");
        assert_eq!(
            tokio::fs::read(root.join("profiles/a/photo.png")).await?,
            vec![7, 7, 7]
        );

        tokio::fs::remove_dir_all(root).await?;

        Ok(())
    }

    #[tokio::test]
    async fn refuses_paths_escaping_the_root() {
        let storage = LocalPhotoStorage::new(scratch_dir("escape"), "https://cdn.test");

        for path in ["../outside.png", "/etc/passwd", "", "profiles/../../x.png"] {
            let result = storage.store(vec![1], "image/png", path).await;

            assert!(
                matches!(result, Err(PhotoStorageError::InvalidPath)),
                "{path:?} should be refused"
            );
        }
    }
}
