//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Gwil Cosplay"       # Prefix of every page title
//!
//! [[site.nav]]
//! label = "Home"
//! href = "index.html"
//!
//! [markup]
//! img_tag = "multi"           # "multi" (1-2 images) or "single"
//!
//! [lightbox]
//! enabled = true
//! fixed_header = true
//!
//! [home]
//! agenda = "instructions/schedule_info.txt"
//! feedbacks = "instructions/feedbacks.txt"
//! latest_posts = 6
//!
//! [processing]
//! max_processes = 4           # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want. Arrays such as
//! `site.nav` replace the default list as a whole.
//!
//! Unknown keys are rejected to catch typos early.

use crate::markup::ImgTagMode;
use crate::types::NavLink;
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

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name and navigation.
    pub site: SiteSection,
    /// BIAScript translation settings.
    pub markup: MarkupConfig,
    /// Image overlay settings.
    pub lightbox: LightboxConfig,
    /// Homepage widget sources.
    pub home: HomeConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if let Some(link) = self.site.nav.iter().find(|link| link.href.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "site.nav entry '{}' has an empty href",
                link.label
            )));
        }
        if self.home.latest_posts == 0 {
            return Err(ConfigError::Validation(
                "home.latest_posts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown before the page title: `"{name} - {title}"`.
    pub name: String,
    /// Navigation links, in display order.
    pub nav: Vec<NavLink>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Gwil Cosplay".to_string(),
            nav: vec![
                NavLink::new("Home", "index.html"),
                NavLink::new("Portfolio", "portfolio.html"),
                NavLink::new("Blog", "blog.html"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    /// How `<img>` tags read their content.
    pub img_tag: ImgTagMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Render the overlay and let content images open it.
    pub enabled: bool,
    /// The page header is fixed and needs scrollbar compensation too.
    pub fixed_header: bool,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fixed_header: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Agenda status text, relative to the content root.
    pub agenda: String,
    /// Feedbacks file, relative to the content root.
    pub feedbacks: String,
    /// Number of post cards in the "latest posts" grid.
    pub latest_posts: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            agenda: "instructions/schedule_info.txt".to_string(),
            feedbacks: "instructions/feedbacks.txt".to_string(),
            latest_posts: 6,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel rendering workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map_or(cores, |n| n.clamp(1, cores))
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
/// - Non-table values in overlay, arrays included, replace base values entirely.
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
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge user values over stock defaults, reject unknown keys, validate.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# BIAScript site configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Page titles read "<name> - <page title>".
name = "Gwil Cosplay"

# Navigation links, in order. The link matching the current page is marked
# with the `active-link` class. Listing any entry replaces the whole list.
[[site.nav]]
label = "Home"
href = "index.html"

[[site.nav]]
label = "Portfolio"
href = "portfolio.html"

[[site.nav]]
label = "Blog"
href = "blog.html"

# ---------------------------------------------------------------------------
# Markup
# ---------------------------------------------------------------------------
[markup]
# How <img> tags read their content:
#   "multi"  - one or two comma-separated images (two render side by side)
#   "single" - the whole content is one filename
img_tag = "multi"

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Clicking a content image opens it in a full-screen overlay.
enabled = true
# The site header is position: fixed and needs scrollbar compensation.
fixed_header = true

# ---------------------------------------------------------------------------
# Homepage
# ---------------------------------------------------------------------------
[home]
# Agenda status text shown in the banner (paths relative to the content root).
agenda = "instructions/schedule_info.txt"
# Testimonials: blocks of "quote" and "author" lines, separated by blank lines.
feedbacks = "instructions/feedbacks.txt"
# How many recent posts the homepage shows.
latest_posts = 6

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
