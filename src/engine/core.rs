use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::surface::Color;

/// Host-level settings, read from a RON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    /// Overrides the program's own canvas width.
    pub window_width: Option<u32>,
    /// Overrides the program's own canvas height.
    pub window_height: Option<u32>,
    /// Page color shown behind the canvas and used for a fresh canvas.
    pub background: Color,
    /// Initial state of the animation toggle.
    pub start_running: bool,
    /// Seed for programs that use randomness. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
    /// Keep the world aspect ratio when mapping it onto the canvas.
    pub preserve_aspect: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Easel".to_string(),
            window_width: None,
            window_height: None,
            background: Color::WHITE,
            start_running: false,
            seed: None,
            preserve_aspect: false,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = ron::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(target: "engine", path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Canvas size for a program that asks for `preferred` pixels.
    pub fn canvas_size(&self, preferred: (u32, u32)) -> (u32, u32) {
        (
            self.window_width.unwrap_or(preferred.0),
            self.window_height.unwrap_or(preferred.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig =
            ron::from_str(r#"(background: "black", window_width: Some(320))"#).unwrap();
        assert_eq!(config.background, Color::BLACK);
        assert_eq!(config.canvas_size((600, 600)), (320, 600));
        assert_eq!(config.app_name, "Easel");
        assert!(!config.start_running);
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(background: 12)").unwrap();
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.ron"));
    }

    #[test]
    fn load_reads_a_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easel.ron");
        fs::write(
            &path,
            r##"(
                app_name: "Lab",
                background: "#102030",
                start_running: true,
                seed: Some(42),
                preserve_aspect: true,
            )"##,
        )
        .unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.app_name, "Lab");
        assert_eq!(config.background, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(config.seed, Some(42));
        assert!(config.start_running && config.preserve_aspect);
    }
}
