//! Menu picture directory.

use serde::{Deserialize, Serialize};

/// Asset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory uploaded pictures are copied into.
    #[serde(default = "default_dir")]
    pub dir: String,
    /// Placeholder file name inside `dir`, used when no picture is uploaded.
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            default_image: default_image(),
        }
    }
}

fn default_dir() -> String {
    "./res".to_string()
}

fn default_image() -> String {
    "no-image.png".to_string()
}
