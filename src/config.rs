//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; every key is optional and overrides the stock default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Satoshi Nakamoto Institute"
//! data_dir = "data"          # Content-API exports, relative to the content root
//! locales_dir = "locales"    # Fluent translations (<locale>/*.ftl), relative to the content root
//!
//! [locales]
//! enabled = ["en", "ar", "de", ...]   # Locales to generate (default: all)
//!
//! [colors.light]
//! background = "#fdfcf8"
//! text = "#1c1917"
//! text_muted = "#78716c"    # Dates, breadcrumbs, language switcher
//! border = "#e7e5e4"
//! link = "#b45309"
//! link_hover = "#78350f"
//!
//! [colors.dark]
//! background = "#1c1917"
//! text = "#f5f5f4"
//! text_muted = "#a8a29e"
//! border = "#44403c"
//! link = "#fbbf24"
//! link_hover = "#fde68a"
//!
//! [processing]
//! max_processes = 4         # Max parallel locale renders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name shown in the header and page titles.
    pub site_title: String,
    /// Directory of content-API JSON exports, relative to the content root.
    pub data_dir: String,
    /// Directory of `<locale>/*.ftl` translations, relative to the content root.
    pub locales_dir: String,
    /// Which locales to generate.
    pub locales: LocalesConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Satoshi Nakamoto Institute".to_string(),
            data_dir: "data".to_string(),
            locales_dir: "locales".to_string(),
            locales: LocalesConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        let enabled = &self.locales.enabled;
        if enabled.is_empty() {
            return Err(ConfigError::Validation(
                "locales.enabled must not be empty".into(),
            ));
        }
        if !enabled.contains(&Locale::DEFAULT) {
            return Err(ConfigError::Validation(format!(
                "locales.enabled must include the default locale \"{}\"",
                Locale::DEFAULT
            )));
        }
        for (i, locale) in enabled.iter().enumerate() {
            if enabled[..i].contains(locale) {
                return Err(ConfigError::Validation(format!(
                    "locales.enabled lists \"{locale}\" more than once"
                )));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Data directory resolved against the content root.
    pub fn data_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.data_dir)
    }

    /// Translation directory resolved against the content root.
    pub fn locales_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.locales_dir)
    }
}

/// Locale selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalesConfig {
    /// Locales to generate, in language-switcher order. Must include the
    /// default locale.
    pub enabled: Vec<Locale>,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            enabled: Locale::ALL.to_vec(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of locales rendered at once.
    /// When absent or null, defaults to the number of CPU cores.
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
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
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
    pub text: String,
    /// Secondary text: dates, breadcrumbs, language switcher.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdfcf8".to_string(),
            text: "#1c1917".to_string(),
            text_muted: "#78716c".to_string(),
            border: "#e7e5e4".to_string(),
            link: "#b45309".to_string(),
            link_hover: "#78350f".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1c1917".to_string(),
            text: "#f5f5f4".to_string(),
            text_muted: "#a8a29e".to_string(),
            border: "#44403c".to_string(),
            link: "#fbbf24".to_string(),
            link_hover: "#fde68a".to_string(),
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

/// Overlay the user's `config.toml` onto the serialized defaults.
///
/// Tables combine key by key; any other user value (including
/// `locales.enabled`) replaces the default outright.
fn overlay_defaults(defaults: toml::Value, user: toml::Value) -> toml::Value {
    let (toml::Value::Table(mut table), toml::Value::Table(user_table)) = (defaults, &user) else {
        return user;
    };
    for (key, value) in user_table {
        let combined = match table.remove(key) {
            Some(default) => overlay_defaults(default, value.clone()),
            None => value.clone(),
        };
        table.insert(key.clone(), combined);
    }
    toml::Value::Table(table)
}

/// Load `config.toml` from the content root and validate it.
///
/// A missing file yields the defaults. A partial table such as
/// `[colors.dark]` keeps the dark defaults for the keys it leaves out.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let mut merged = toml::Value::try_from(SiteConfig::default())?;
    match fs::read_to_string(&path) {
        Ok(text) => merged = overlay_defaults(merged, toml::from_str(&text)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
        }
        Err(e) => return Err(e.into()),
    }
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site name shown in the header and in every page title.
site_title = "Satoshi Nakamoto Institute"

# Content-API JSON exports (library/, mempool/, satoshi/), relative to the
# content root.
data_dir = "data"

# Fluent translations (<locale>/*.ftl), relative to the content root.
# English is built in; files here add languages or reword English.
locales_dir = "locales"

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[locales]
# Locales to generate, in language-switcher order.
# Must include the default locale "en".
enabled = ["en", "ar", "de", "es", "fa", "fi", "fr", "he", "hi", "it", "ja", "ko", "pt", "ru", "tr", "zh"]

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdfcf8"
text = "#1c1917"
text_muted = "#78716c"    # Dates, breadcrumbs, language switcher
border = "#e7e5e4"
link = "#b45309"
link_hover = "#78350f"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#1c1917"
text = "#f5f5f4"
text_muted = "#a8a29e"
border = "#44403c"
link = "#fbbf24"
link_hover = "#fde68a"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum number of locales rendered in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        [
            ("bg", &scheme.background),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("link", &scheme.link),
            ("link-hover", &scheme.link_hover),
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
