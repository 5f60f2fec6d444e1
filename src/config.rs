// Optional per-panel settings, read once at startup from the asset directory
use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE: &str = "nineorten.json";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pad_speed: f32,      // playback speed of every pad, loops always play at 1.0
    pub loop_gain: f32,
    pub pad_gain: f32,
    pub debug_overlay: bool, // start with hit region outlines visible
    pub background: [u8; 3], // letterbox color
    pub tick_ms: u64,        // input poll / redraw interval
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pad_speed: 1.3,
            loop_gain: 0.8,
            pad_gain: 1.0,
            debug_overlay: false,
            background: [255, 255, 255],
            tick_ms: 16, // ~60fps
        }
    }
}

impl Settings {
    fn sanitized(self) -> Self {
        let defaults = Settings::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };
        Self {
            pad_speed: finite_or(self.pad_speed, defaults.pad_speed).clamp(0.25, 4.0),
            loop_gain: finite_or(self.loop_gain, defaults.loop_gain).clamp(0.0, 2.0),
            pad_gain: finite_or(self.pad_gain, defaults.pad_gain).clamp(0.0, 2.0),
            tick_ms: self.tick_ms.clamp(1, 250),
            ..self
        }
    }
}

// <asset_dir>/nineorten.json
pub fn config_file_path(asset_dir: &Path) -> PathBuf {
    asset_dir.join(CONFIG_FILE)
}

pub fn load_settings(asset_dir: &Path) -> Settings {
    let path = config_file_path(asset_dir);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            return Settings::default();
        }
    };
    match serde_json::from_str::<Settings>(&data) {
        Ok(settings) => settings.sanitized(),
        Err(e) => {
            log::warn!("ignoring malformed {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
        assert!((settings.pad_speed - 1.3).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            config_file_path(dir.path()),
            r#"{ "pad_speed": 1.0, "debug_overlay": true }"#,
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.pad_speed, 1.0);
        assert!(settings.debug_overlay);
        assert_eq!(settings.background, [255, 255, 255]);
        assert_eq!(settings.tick_ms, 16);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_file_path(dir.path()), "{ pad_speed: fast").unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            config_file_path(dir.path()),
            r#"{ "pad_speed": 40.0, "pad_gain": -1.0, "tick_ms": 0 }"#,
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.pad_speed, 4.0);
        assert_eq!(settings.pad_gain, 0.0);
        assert_eq!(settings.tick_ms, 1);
    }
}
