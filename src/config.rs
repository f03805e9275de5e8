//! Optional config file loading. Search order: ./smbc-source.toml, then
//! $XDG_CONFIG_HOME/smbc-source/config.toml (or ~/.config/smbc-source/config.toml).

use crate::source::AltTextStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Alt-text canvas width in pixels.
    pub alt_text_width: Option<u32>,
    /// Alt-text canvas height in pixels.
    pub alt_text_height: Option<u32>,
    /// Background color as hex without `#`, e.g. "ffffff".
    pub alt_text_background: Option<String>,
    /// Text color as hex without `#`.
    pub alt_text_foreground: Option<String>,
    pub alt_text_font: Option<String>,
    pub alt_text_font_size: Option<u32>,
}

impl Config {
    /// Alt-text style with this config's keys applied over the defaults.
    pub fn alt_text_style(&self) -> AltTextStyle {
        let d = AltTextStyle::default();
        AltTextStyle {
            width: self.alt_text_width.unwrap_or(d.width),
            height: self.alt_text_height.unwrap_or(d.height),
            background: self.alt_text_background.clone().unwrap_or(d.background),
            foreground: self.alt_text_foreground.clone().unwrap_or(d.foreground),
            font: self.alt_text_font.clone().unwrap_or(d.font),
            font_size: self.alt_text_font_size.unwrap_or(d.font_size),
        }
    }
}

/// Search order: (1) ./smbc-source.toml, (2) $XDG_CONFIG_HOME/smbc-source/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("smbc-source.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("smbc-source").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            return load_config_from(path).map(Some);
        }
    }
    Ok(None)
}

/// Read and parse one config file.
pub fn load_config_from(path: &Path) -> Result<Config, String> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    toml::from_str(&s).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}
