use std::path::{Path, PathBuf};

use crate::errors::AssetError;
use crate::shared::RegionId;

const AUDIO_EXT: &str = "wav";

// <asset_dir>/loop1.wav, <asset_dir>/sound7.wav, ...
pub fn audio_path(asset_dir: &Path, id: RegionId) -> PathBuf {
    asset_dir.join(format!("{}.{}", id.resource_name(), AUDIO_EXT))
}

/// Prepare the player for one region. A missing file or a failed decode is
/// logged and leaves the region without a player; the other regions are
/// unaffected.
pub fn prepare_region<P, F>(asset_dir: &Path, id: RegionId, prepare: F) -> Option<P>
where
    F: FnOnce(&Path) -> Result<P, AssetError>,
{
    let path = audio_path(asset_dir, id);
    match prepare(&path) {
        Ok(player) => Some(player),
        Err(e) if e.is_missing() => {
            log::info!("{id}: no audio at {}, region is inert", path.display());
            None
        }
        Err(e) => {
            log::warn!("{id}: could not prepare {}: {e}", path.display());
            None
        }
    }
}
