//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` that lives next
//! to the documents. Every key is optional: the user file is merged on top of
//! the stock defaults, so it only needs the values it changes.
//!
//! ## Config File Location
//!
//! ```text
//! docs/
//! ├── config.toml       # Optional, overrides stock defaults
//! ├── 001.md
//! └── 002.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Nikki"           # <title> of the generated page
//! lang = "ja"               # <html lang>
//! labels = "stem"           # "stem" = file stem verbatim, "title" = NNN- stripped
//!
//! [colors]
//! background = "#f5f5f5"
//! text = "#444444"
//! heading = "#333333"
//! muted = "#666666"         # Block quotes
//! code_background = "#e8e8e8"
//! dot = "#cccccc"
//! dot_active = "#333333"
//! dot_hover = "#666666"
//!
//! [typography]
//! font_family = "'Hiragino Mincho ProN', 'Yu Mincho', serif"
//! code_font_family = "'Courier New', monospace"
//!
//! [layout]
//! height = "80vh"           # Height of the vertical text columns
//! gap = "60px"              # Space between documents (pixels)
//!
//! [counter]
//! enabled = false
//! api_base = "https://api.counterapi.dev/v1"
//! access_key = ""
//! like_key = ""
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title, language and label style.
    pub site: SiteSection,
    /// Page colors.
    pub colors: ColorConfig,
    /// Font stacks.
    pub typography: TypographyConfig,
    /// Column height and document spacing.
    pub layout: LayoutConfig,
    /// Visit counter and like button.
    pub counter: CounterConfig,
}

impl SiteConfig {
    /// Validate config values are usable in the generated page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        if self.layout.gap_px().is_none() {
            return Err(ConfigError::Validation(format!(
                "layout.gap must be a pixel length like \"60px\", got \"{}\"",
                self.layout.gap
            )));
        }
        if self.counter.enabled {
            let base = &self.counter.api_base;
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::Validation(
                    "counter.api_base must be an http(s) URL".into(),
                ));
            }
            if self.counter.access_key.is_empty() || self.counter.like_key.is_empty() {
                return Err(ConfigError::Validation(
                    "counter.access_key and counter.like_key are required when the counter is enabled"
                        .into(),
                ));
            }
        }
        Ok(())
    }
}

/// How a document's label is derived from its file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// File stem verbatim: `001-rainy-day.md` → "001-rainy-day".
    #[default]
    Stem,
    /// Number prefix stripped, dashes → spaces: `001-rainy-day.md` → "rainy day".
    Title,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    pub lang: String,
    pub labels: LabelStyle,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Nikki".to_string(),
            lang: "ja".to_string(),
            labels: LabelStyle::Stem,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub text: String,
    /// Document labels and in-document headings.
    pub heading: String,
    /// Block quotes.
    pub muted: String,
    pub code_background: String,
    /// Paging dot, inactive.
    pub dot: String,
    pub dot_active: String,
    pub dot_hover: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f5f5f5".to_string(),
            text: "#444444".to_string(),
            heading: "#333333".to_string(),
            muted: "#666666".to_string(),
            code_background: "#e8e8e8".to_string(),
            dot: "#cccccc".to_string(),
            dot_active: "#333333".to_string(),
            dot_hover: "#666666".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    pub font_family: String,
    pub code_font_family: String,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            font_family: "'Hiragino Mincho ProN', 'Yu Mincho', serif".to_string(),
            code_font_family: "'Courier New', monospace".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of the text columns (CSS value).
    pub height: String,
    /// Horizontal space between documents. Must be in `px`: the paging
    /// script adds it to each document's width.
    pub gap: String,
}

impl LayoutConfig {
    /// The gap as a pixel count, or `None` if it isn't a `px` length.
    pub fn gap_px(&self) -> Option<u32> {
        self.gap.trim().strip_suffix("px")?.trim().parse().ok()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            height: "80vh".to_string(),
            gap: "60px".to_string(),
        }
    }
}

/// Visit counter and like button, backed by a hosted counting API.
///
/// The page calls `{api_base}/hit?key=…` to increment and read, and
/// `{api_base}/get?key=…` to read only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub enabled: bool,
    pub api_base: String,
    /// Counter key for page visits.
    pub access_key: String,
    /// Counter key for likes.
    pub like_key: String,
    /// Texts shown by the widgets.
    pub labels: CounterLabels,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://api.counterapi.dev/v1".to_string(),
            access_key: String::new(),
            like_key: String::new(),
            labels: CounterLabels::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterLabels {
    pub visits: String,
    pub like_button: String,
    pub likes: String,
    pub current_likes: String,
    pub thanks: String,
    /// Badge on the visit counter for a repdigit count.
    pub kiriban: String,
    /// Message under the like button for a repdigit count.
    pub zorome: String,
    pub error: String,
}

impl Default for CounterLabels {
    fn default() -> Self {
        Self {
            visits: "アクセス数".to_string(),
            like_button: "いいね".to_string(),
            likes: "いいね数".to_string(),
            current_likes: "現在のいいね数".to_string(),
            thanks: "ありがとう！".to_string(),
            kiriban: "キリ番！".to_string(),
            zorome: "ゾロ目だ！".to_string(),
            error: "エラー".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
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
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, falling back to
/// stock defaults for everything it doesn't set.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Nikki Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to your documents (e.g. docs/config.toml).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[site]
title = "Nikki"
lang = "ja"

# How each document's label is made from its file name:
#   "stem"  -> 001-rainy-day.md is labelled "001-rainy-day"
#   "title" -> 001-rainy-day.md is labelled "rainy day"
labels = "stem"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#f5f5f5"
text = "#444444"
heading = "#333333"
muted = "#666666"           # Block quotes
code_background = "#e8e8e8"
dot = "#cccccc"             # Paging dots
dot_active = "#333333"
dot_hover = "#666666"

# ---------------------------------------------------------------------------
# Typography
# ---------------------------------------------------------------------------
[typography]
font_family = "'Hiragino Mincho ProN', 'Yu Mincho', serif"
code_font_family = "'Courier New', monospace"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Height of the vertical text columns (CSS value).
height = "80vh"
# Space between documents. Must be in px.
gap = "60px"

# ---------------------------------------------------------------------------
# Visit counter and like button
# ---------------------------------------------------------------------------
# Uses a hosted counting API: GET {api_base}/hit?key=K increments and
# returns {"count": N}; GET {api_base}/get?key=K only reads.
[counter]
enabled = false
api_base = "https://api.counterapi.dev/v1"
access_key = ""
like_key = ""

[counter.labels]
visits = "アクセス数"
like_button = "いいね"
likes = "いいね数"
current_likes = "現在のいいね数"
thanks = "ありがとう！"
kiriban = "キリ番！"
zorome = "ゾロ目だ！"
error = "エラー"
"##
}

/// Generate CSS custom properties from config.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let colors = &config.colors;
    format!(
        r#":root {{
    --color-bg: {background};
    --color-text: {text};
    --color-heading: {heading};
    --color-muted: {muted};
    --color-code-bg: {code_background};
    --color-dot: {dot};
    --color-dot-active: {dot_active};
    --color-dot-hover: {dot_hover};
    --font-body: {font_family};
    --font-code: {code_font_family};
    --column-height: {height};
    --document-gap: {gap};
}}"#,
        background = colors.background,
        text = colors.text,
        heading = colors.heading,
        muted = colors.muted,
        code_background = colors.code_background,
        dot = colors.dot,
        dot_active = colors.dot_active,
        dot_hover = colors.dot_hover,
        font_family = config.typography.font_family,
        code_font_family = config.typography.code_font_family,
        height = config.layout.height,
        gap = config.layout.gap,
    )
}
