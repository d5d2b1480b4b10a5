//! Application Ports (Driven)
//!
//! Interfaces the use cases need from the outside world beyond the domain
//! repositories.

mod image_asset_port;

pub use image_asset_port::{
    AssetError, ImageAssetPort, SUPPORTED_IMAGE_EXTENSIONS, StoredImage, is_supported_image,
};
