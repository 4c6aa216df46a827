//! Library configuration.
//!
//! Settings come from an optional `config.toml` in the config directory,
//! merged over the stock defaults. Only the keys being changed need to be
//! present:
//!
//! ```toml
//! [source]
//! base_url = "http://nomad.local/"
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [source]
//! base_url = "http://localhost/"    # Server hosting the manifest
//! manifest_path = "/media.json"      # Root-relative manifest location
//! user_agent = "nomad-library/<version>"
//!
//! [render]
//! placeholder = "/placeholder.jpg"   # Fallback thumbnail
//! mode = "grid"                      # grid | list
//! page_title = "Library"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f4f4f4"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#2b6cb0"
//!
//! [colors.dark]
//! background = "#0d0d0d"
//! surface = "#1a1a1a"
//! text = "#eaeaea"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#63b3ed"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::ViewMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Library configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Where the manifest lives.
    pub source: SourceConfig,
    /// Page rendering settings.
    pub render: RenderConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl LibraryConfig {
    /// Validate values that would otherwise fail at render time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.source.base_url).is_err() {
            return Err(ConfigError::Validation(format!(
                "source.base_url is not a valid URL: {}",
                self.source.base_url
            )));
        }
        if !self.source.manifest_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "source.manifest_path must start with '/'".into(),
            ));
        }
        if !self.render.placeholder.starts_with('/') {
            return Err(ConfigError::Validation(
                "render.placeholder must start with '/'".into(),
            ));
        }
        if self.render.placeholder.contains(['\'', '"', '\\']) {
            return Err(ConfigError::Validation(
                "render.placeholder must not contain quotes or backslashes".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Server hosting the manifest.
    pub base_url: String,
    /// Root-relative path of the manifest on that server.
    pub manifest_path: String,
    /// `User-Agent` sent with manifest requests.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            manifest_path: "/media.json".to_string(),
            user_agent: concat!("nomad-library/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Root-relative image shown when a thumbnail fails to load.
    pub placeholder: String,
    /// Default layout when the command line does not pick one.
    pub mode: ViewMode,
    /// Prefix of the generated page's `<title>`.
    pub page_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "/placeholder.jpg".to_string(),
            mode: ViewMode::Grid,
            page_title: "Library".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Card and row background.
    pub surface: String,
    pub text: String,
    /// Subtitles, count label, and the search box border.
    pub text_muted: String,
    pub border: String,
    /// Focus ring and hovered card outline.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f4f4".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2b6cb0".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d0d0d".to_string(),
            surface: "#1a1a1a".to_string(),
            text: "#eaeaea".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#63b3ed".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a TOML table, the base layer for user overrides.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LibraryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Load, merge over stock defaults, and validate.
pub fn load_config(dir: &Path) -> Result<LibraryConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: LibraryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    concat!(
        r##"# Nomad Library Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Manifest source
# ---------------------------------------------------------------------------
[source]
# Server hosting the manifest. Ignored when --manifest points at a file.
base_url = "http://localhost/"

# Root-relative path of the manifest. A fresh ?v=<timestamp> is appended to
# every request so caches never serve a stale catalog.
manifest_path = "/media.json"

user_agent = "nomad-library/"##,
        env!("CARGO_PKG_VERSION"),
        r##""

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# Image shown when a thumbnail cannot be loaded. Must exist on the server.
placeholder = "/placeholder.jpg"

# Default layout: "grid" (cover cards) or "list" (rows with file names).
mode = "grid"

# Prefix of the generated page title.
page_title = "Library"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f4f4"       # Cards and rows
text = "#111111"
text_muted = "#666666"    # Subtitles, item count
border = "#e0e0e0"
accent = "#2b6cb0"        # Focus and hover outline

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d0d0d"
surface = "#1a1a1a"
text = "#eaeaea"
text_muted = "#999999"
border = "#333333"
accent = "#63b3ed"
"##
    )
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        [
            ("bg", &scheme.background),
            ("surface", &scheme.surface),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("accent", &scheme.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
