//! Asset loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or decoding a panel asset.
///
/// None of these are fatal: the loader turns each one into an absent image or
/// an inert region.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No file exists for the resource.
    #[error("asset not found: {}", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),

    /// The WAV container or its samples are malformed.
    #[error("failed to decode wav: {0}")]
    Wav(#[from] hound::Error),

    /// The image could not be decoded.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The file decoded but holds data we can't play.
    #[error("unsupported audio: {0}")]
    UnsupportedFormat(String),
}

impl AssetError {
    pub fn is_missing(&self) -> bool {
        matches!(self, AssetError::Missing(_))
    }
}
