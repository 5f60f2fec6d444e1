use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::errors::AssetError;

/// The two same-layout panel images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAsset {
    Idle,
    Pressed,
}

impl PanelAsset {
    pub fn file_name(self) -> &'static str {
        match self {
            PanelAsset::Idle => "idle.png",
            PanelAsset::Pressed => "pressed.png",
        }
    }
}

pub fn image_path(asset_dir: &Path, asset: PanelAsset) -> PathBuf {
    asset_dir.join(asset.file_name())
}

pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    Ok(image::open(path)?.to_rgba8())
}

// Decode once at startup; any failure means "no image"
pub fn load_panel_image(asset_dir: &Path, asset: PanelAsset) -> Option<RgbaImage> {
    let path = image_path(asset_dir, asset);
    match load_image(&path) {
        Ok(img) => {
            log::info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
            Some(img)
        }
        Err(e) => {
            log::warn!("{e}; nothing will be drawn from {}", asset.file_name());
            None
        }
    }
}
