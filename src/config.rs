//! Landing page configuration.
//!
//! Handles loading, validating, and merging `landing.toml`. Stock defaults are
//! the base layer; the user's file is merged on top, so it only needs the keys
//! it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── landing.toml     # optional, overrides stock defaults
//! └── assets/          # images and other static files → dist/assets/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Retouch"
//! tagline = "Professional photo edits in seconds"
//! cta_label = "Try it free"
//! cta_href = "/editor"
//! footer = "© Retouch. All rights reserved."
//! # logo = "assets/logo.svg"
//!
//! [comparison]
//! before_image = "assets/before.jpg"
//! after_image = "assets/after.jpg"
//! # before_alt = "Before"
//! # after_alt = "After"
//! # class_name = "hero-compare"
//!
//! [lazy]
//! enabled = true                  # Defer sections below the hero
//! threshold = 0.1                 # Visible fraction that mounts a section
//! root_margin = "200px"           # Viewport margin, CSS margin syntax
//! placeholder_min_height = "320px"
//!
//! [images]
//! # fallback = "assets/placeholder.svg"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f5f5f7"
//! text = "#111111"
//! text_muted = "#5f6368"
//! accent = "#6c47ff"
//! border = "#e0e0e0"
//!
//! [colors.dark]
//! background = "#0b0b0f"
//! surface = "#17171d"
//! text = "#f2f2f2"
//! text_muted = "#a0a0a8"
//! accent = "#9b82ff"
//! border = "#2c2c34"
//!
//! [[steps]]                       # Replaces the built-in steps entirely
//! title = "Upload your photo"
//! description = "Markdown **allowed**."
//! # image = "assets/steps/upload.png"
//!
//! [[faq]]                         # Replaces the built-in FAQ entirely
//! question = "Is my original photo changed?"
//! answer = "Markdown **allowed**."
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::components::LazyOptions;
use crate::content::{self, FaqEntry, Step};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the source directory.
pub const CONFIG_FILENAME: &str = "landing.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Landing page configuration loaded from `landing.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    /// Page title, hero copy and footer.
    pub site: SiteConfig,
    /// Before/after comparison widget inputs.
    pub comparison: ComparisonConfig,
    /// Deferred mounting of sections below the hero.
    pub lazy: LazyConfig,
    /// Image component settings.
    pub images: ImagesConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// "How it works" steps, in order.
    pub steps: Vec<Step>,
    /// FAQ entries, in order.
    pub faq: Vec<FaqEntry>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            comparison: ComparisonConfig::default(),
            lazy: LazyConfig::default(),
            images: ImagesConfig::default(),
            colors: ColorConfig::default(),
            steps: content::default_steps(),
            faq: content::default_faq(),
        }
    }
}

impl LandingConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.comparison.before_image.trim().is_empty()
            || self.comparison.after_image.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "comparison.before_image and comparison.after_image are required".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.lazy.threshold) {
            return Err(ConfigError::Validation(
                "lazy.threshold must be between 0 and 1".into(),
            ));
        }
        if !is_valid_root_margin(&self.lazy.root_margin) {
            return Err(ConfigError::Validation(format!(
                "lazy.root_margin must be 1-4 lengths in px or %, got {:?}",
                self.lazy.root_margin
            )));
        }
        if let Some(pos) = self.faq.iter().position(|f| f.question.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "faq entry {} has an empty question",
                pos + 1
            )));
        }
        if let Some(pos) = self.steps.iter().position(|s| s.title.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "step {} has an empty title",
                pos + 1
            )));
        }
        Ok(())
    }
}

/// Page-level copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Product name, used as page title and hero heading.
    pub title: String,
    /// One-line pitch under the heading.
    pub tagline: String,
    /// Call-to-action button text.
    pub cta_label: String,
    /// Call-to-action target.
    pub cta_href: String,
    /// Footer text.
    pub footer: String,
    /// Logo image shown in the header, `assets/…` or a URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Retouch".to_string(),
            tagline: "Professional photo edits in seconds".to_string(),
            cta_label: "Try it free".to_string(),
            cta_href: "/editor".to_string(),
            footer: "© Retouch. All rights reserved.".to_string(),
            logo: None,
        }
    }
}

/// Comparison widget inputs, before asset resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    pub before_image: String,
    pub after_image: String,
    /// Left label and alt text. Defaults to "Before".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_alt: Option<String>,
    /// Right label and alt text. Defaults to "After".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_alt: Option<String>,
    /// Extra container classes; the widget sizes to its container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            before_image: "assets/before.jpg".to_string(),
            after_image: "assets/after.jpg".to_string(),
            before_alt: None,
            after_alt: None,
            class_name: None,
        }
    }
}

/// Deferred section mounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyConfig {
    /// When false every section is rendered eagerly.
    pub enabled: bool,
    /// Fraction of a section (0–1) that must be visible before it mounts.
    pub threshold: f64,
    /// Margin around the viewport, CSS margin syntax (`"200px"`, `"0px 0px 10%"`).
    pub root_margin: String,
    /// Placeholder height while a section is pending (CSS length).
    pub placeholder_min_height: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        let options = LazyOptions::default();
        Self {
            enabled: true,
            threshold: options.threshold,
            root_margin: options.root_margin,
            placeholder_min_height: options.placeholder_min_height,
        }
    }
}

impl LazyConfig {
    pub fn options(&self) -> LazyOptions {
        LazyOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
            placeholder_min_height: self.placeholder_min_height.clone(),
        }
    }
}

/// Image component settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Image shown when a page image fails to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
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

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Cards, FAQ items, step tiles.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    /// Buttons, step numbers, slider handle ring.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5f7".to_string(),
            text: "#111111".to_string(),
            text_muted: "#5f6368".to_string(),
            accent: "#6c47ff".to_string(),
            border: "#e0e0e0".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0b0f".to_string(),
            surface: "#17171d".to_string(),
            text: "#f2f2f2".to_string(),
            text_muted: "#a0a0a8".to_string(),
            accent: "#9b82ff".to_string(),
            border: "#2c2c34".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Check a CSS `rootMargin` value: one to four lengths, each in `px` or `%`.
pub fn is_valid_root_margin(margin: &str) -> bool {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 4 {
        return false;
    }
    parts.iter().all(|part| {
        let number = part
            .strip_suffix("px")
            .or_else(|| part.strip_suffix('%'))
            .unwrap_or(part);
        // A bare zero is the only unitless length CSS allows.
        if number.len() == part.len() {
            return *part == "0";
        }
        number.parse::<f64>().is_ok_and(f64::is_finite)
    })
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LandingConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so an
///   overlay `[[faq]]` list replaces the stock list rather than extending it.
/// - Keys in base that are not in overlay are preserved.
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

/// Load `landing.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it is not valid
/// TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
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
) -> Result<LandingConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LandingConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `landing.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<LandingConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `landing.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Retouch Landing Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Image references starting with "assets/" point into the assets/ directory
# next to this file and are fingerprinted on build. Anything else (absolute
# URLs, "/…" paths) is used as-is.

# ---------------------------------------------------------------------------
# Page copy
# ---------------------------------------------------------------------------
[site]
title = "Retouch"
tagline = "Professional photo edits in seconds"
cta_label = "Try it free"
cta_href = "/editor"
footer = "© Retouch. All rights reserved."
# Header logo.
# logo = "assets/logo.svg"

# ---------------------------------------------------------------------------
# Before/after comparison slider
# ---------------------------------------------------------------------------
[comparison]
before_image = "assets/before.jpg"
after_image = "assets/after.jpg"
# Labels (also used as alt text). Default to "Before" and "After".
# before_alt = "Original"
# after_alt = "Retouched"
# Extra classes on the widget container. The widget has no intrinsic size
# and fills whatever box these classes give it.
# class_name = "hero-compare"

# ---------------------------------------------------------------------------
# Deferred sections
# ---------------------------------------------------------------------------
[lazy]
# Render sections below the hero as placeholders until they scroll into view.
enabled = true
# Fraction of a section (0-1) that must be visible before it mounts.
threshold = 0.1
# Margin around the viewport, CSS margin syntax: 1-4 lengths in px or %.
root_margin = "200px"
# Height reserved for a section while it is pending.
placeholder_min_height = "320px"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Shown in place of any page image that fails to load.
# fallback = "assets/placeholder.svg"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5f7"       # Cards, FAQ items, step tiles
text = "#111111"
text_muted = "#5f6368"
accent = "#6c47ff"        # Buttons, step numbers, slider handle
border = "#e0e0e0"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0b0f"
surface = "#17171d"
text = "#f2f2f2"
text_muted = "#a0a0a8"
accent = "#9b82ff"
border = "#2c2c34"

# ---------------------------------------------------------------------------
# "How it works" steps and FAQ
# ---------------------------------------------------------------------------
# Omit to use the built-in lists. Defining any entry replaces the whole list.
# Descriptions and answers are Markdown.
#
# [[steps]]
# title = "Upload your photo"
# description = "Drag a JPEG, PNG or WebP into the editor."
# image = "assets/steps/upload.png"
#
# [[faq]]
# question = "Is my original photo changed?"
# answer = "No. Edits are applied to a **copy**."
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-accent: {light_accent};
    --color-border: {light_border};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-accent: {dark_accent};
        --color-border: {dark_border};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_border = colors.light.border,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_border = colors.dark.border,
    )
}
