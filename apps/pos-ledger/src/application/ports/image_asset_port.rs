//! Image Asset Port (Driven Port)
//!
//! Interface for storing menu item pictures next to the application.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// File extensions accepted as menu pictures, lowercase.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Returns true if `path` has one of the supported picture extensions.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Image asset error.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The file is not a supported picture.
    #[error("Unsupported image type: {}", path.display())]
    UnsupportedExtension {
        /// Offending file.
        path: PathBuf,
    },

    /// The source path does not name a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// The placeholder picture is missing from the asset directory.
    #[error("Default image ({}) is missing", path.display())]
    MissingDefault {
        /// Where it was expected.
        path: PathBuf,
    },

    /// Filesystem failure while copying.
    #[error("Failed to upload image: {0}")]
    Io(#[from] std::io::Error),
}

/// A picture as recorded on a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Path to record on the menu item.
    pub path: String,
    /// True if `import` created this file, false if the source already was
    /// the stored file.
    pub copied: bool,
}

/// Port for the picture store.
#[async_trait]
pub trait ImageAssetPort: Send + Sync {
    /// Copy a picture into the asset directory under its file name.
    ///
    /// Existing pictures are never overwritten: a name already taken by a
    /// different file gets a numbered variant instead.
    async fn import(&self, source: &Path) -> Result<StoredImage, AssetError>;

    /// Path of the placeholder picture used when none is uploaded.
    async fn default_image(&self) -> Result<String, AssetError>;

    /// Remove a picture that `import` copied but that ended up unused.
    async fn discard(&self, image: &StoredImage) -> Result<(), AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("coffee.png", true)]
    #[test_case("coffee.JPG", true)]
    #[test_case("coffee.jpeg", true)]
    #[test_case("coffee.bmp", true)]
    #[test_case("coffee.Gif", true)]
    #[test_case("coffee.webp", false)]
    #[test_case("coffee", false)]
    #[test_case("png", false)]
    fn supported_extensions(name: &str, expected: bool) {
        assert_eq!(is_supported_image(Path::new(name)), expected);
    }
}
