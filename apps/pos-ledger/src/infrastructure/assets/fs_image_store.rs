//! Filesystem picture store (the `res/` directory).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::application::ports::{AssetError, ImageAssetPort, StoredImage, is_supported_image};
use crate::config::AssetsConfig;

// Numbered variants tried before giving up on a taken file name.
const MAX_NAME_ATTEMPTS: u32 = 1_000;

/// Keeps menu pictures in one directory, named after the uploaded file.
#[derive(Debug, Clone)]
pub struct FsImageAssetStore {
    dir: PathBuf,
    default_image: String,
}

impl FsImageAssetStore {
    /// Store pictures under `dir`, with `default_image` as the placeholder
    /// file name inside it.
    pub fn new(dir: impl Into<PathBuf>, default_image: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_image: default_image.into(),
        }
    }

    /// The asset directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create a new, empty file for `file_name`, or for `stem-N.ext` when
    /// that name is taken.
    async fn reserve(&self, file_name: &Path) -> Result<(File, PathBuf), AssetError> {
        let stem = file_name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = file_name
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut attempt = 0;
        loop {
            let candidate = if attempt == 0 {
                self.dir.join(file_name)
            } else {
                self.dir.join(format!("{stem}-{attempt}.{ext}"))
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((file, candidate)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists && attempt < MAX_NAME_ATTEMPTS => {
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl From<&AssetsConfig> for FsImageAssetStore {
    fn from(config: &AssetsConfig) -> Self {
        Self::new(config.dir.clone(), config.default_image.clone())
    }
}

#[async_trait]
impl ImageAssetPort for FsImageAssetStore {
    async fn import(&self, source: &Path) -> Result<StoredImage, AssetError> {
        if !is_supported_image(source) {
            return Err(AssetError::UnsupportedExtension {
                path: source.to_path_buf(),
            });
        }

        let metadata = tokio::fs::metadata(source).await?;
        let file_name = source
            .file_name()
            .filter(|_| metadata.is_file())
            .ok_or_else(|| AssetError::NotAFile {
                path: source.to_path_buf(),
            })?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let preferred = self.dir.join(file_name);
        if same_file(source, &preferred).await {
            debug!(path = %preferred.display(), "Image already in asset directory");
            return Ok(StoredImage {
                path: preferred.to_string_lossy().into_owned(),
                copied: false,
            });
        }

        let (mut target, destination) = self.reserve(Path::new(file_name)).await?;
        let written = async {
            let mut reader = File::open(source).await?;
            let bytes = tokio::io::copy(&mut reader, &mut target).await?;
            target.flush().await?;
            Ok::<_, std::io::Error>(bytes)
        }
        .await;
        let bytes = match written {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = tokio::fs::remove_file(&destination).await;
                return Err(e.into());
            }
        };

        if destination != preferred {
            warn!(
                requested = %preferred.display(),
                stored = %destination.display(),
                "Image name taken, stored under a new name"
            );
        }
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            bytes,
            "Image imported"
        );

        Ok(StoredImage {
            path: destination.to_string_lossy().into_owned(),
            copied: true,
        })
    }

    async fn default_image(&self) -> Result<String, AssetError> {
        let path = self.dir.join(&self.default_image);
        if tokio::fs::try_exists(&path).await? {
            Ok(path.to_string_lossy().into_owned())
        } else {
            Err(AssetError::MissingDefault { path })
        }
    }

    async fn discard(&self, image: &StoredImage) -> Result<(), AssetError> {
        let path = Path::new(&image.path);
        let inside = path.parent() == Some(self.dir.as_path());
        let placeholder = path.file_name() == Some(self.default_image.as_ref());
        if !image.copied || !inside || placeholder {
            return Ok(());
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Unused image removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn same_file(a: &Path, b: &Path) -> bool {
    match (
        tokio::fs::canonicalize(a).await,
        tokio::fs::canonicalize(b).await,
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
