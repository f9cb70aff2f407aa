//! Configuration management for mdpress
//!
//! Handles loading and validating the converter configuration. Settings are
//! persisted as JSON under the user configuration directory and can be
//! overridden wholesale by a preset or a file given on the command line.

use crate::error::{ConfigError, ConfigResult};
use crate::highlight::{HighlightOptions, DEFAULT_MAX_FRAGMENT_BYTES};
use crate::pdf::PdfEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application directory name under the platform config directory
pub const APP_NAME: &str = "mdpress";

/// Configuration file name
pub const CONFIG_FILE: &str = "config.json";

/// Maximum input file size to convert (in bytes) - 10MB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Converter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page layout
    pub page: PageConfig,

    /// Body text sizes and spacing
    pub typography: TypographyConfig,

    /// Code block box
    pub code: CodeConfig,

    /// Highlight colours
    pub colors: ColorConfig,

    /// Output options
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the user config directory, or defaults.
    ///
    /// A missing file is not an error. A file that exists but cannot be read
    /// or parsed is.
    pub fn load() -> ConfigResult<Self> {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(err) => {
                log::warn!("{err}, using default configuration");
                return Ok(Self::default());
            }
        };
        if !path.exists() {
            log::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Configuration for a named preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::default(),
            Preset::Compact => Self {
                page: PageConfig {
                    page_size: PageSize::A4,
                    margin_cm: 1.0,
                },
                typography: TypographyConfig {
                    base_font_size: 9.0,
                    code_font_size: 7.0,
                    paragraph_spacing: 5,
                },
                code: CodeConfig {
                    padding_vertical: 10,
                    padding_horizontal: 10,
                    margin_top: 10,
                    margin_bottom: 10,
                    ..CodeConfig::default()
                },
                colors: ColorConfig {
                    keyword: "#0000ff".to_string(),
                    number: "#098658".to_string(),
                    ..ColorConfig::default()
                },
                output: OutputConfig::default(),
            },
        }
    }

    /// Replace layout, typography and colours with a preset's values.
    ///
    /// Output options and the code `wrap`/size-cap settings are kept.
    pub fn apply_preset(&mut self, preset: Preset) {
        let base = Self::preset(preset);
        self.page = base.page;
        self.typography = base.typography;
        self.code = CodeConfig {
            wrap: self.code.wrap,
            max_fragment_bytes: self.code.max_fragment_bytes,
            ..base.code
        };
        self.colors = base.colors;
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> ConfigResult<()> {
        check_range("typography.base_font_size", self.typography.base_font_size, 7.0, 14.0)?;
        check_range("typography.code_font_size", self.typography.code_font_size, 6.0, 12.0)?;
        check_range("page.margin_cm", self.page.margin_cm, 0.5, 4.0)?;
        check_range(
            "typography.paragraph_spacing",
            f64::from(self.typography.paragraph_spacing),
            4.0,
            20.0,
        )?;
        for (key, value) in [
            ("code.padding_vertical", self.code.padding_vertical),
            ("code.padding_horizontal", self.code.padding_horizontal),
            ("code.margin_top", self.code.margin_top),
            ("code.margin_bottom", self.code.margin_bottom),
        ] {
            check_range(key, f64::from(value), 8.0, 40.0)?;
        }
        if self.code.max_fragment_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "code.max_fragment_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        check_color("code.background", &self.code.background)?;
        for (name, value) in self.colors.entries() {
            check_color(&format!("colors.{name}"), value)?;
        }
        Ok(())
    }

    /// Highlighter options derived from the code section
    pub fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            escape_html: true,
            max_fragment_bytes: self.code.max_fragment_bytes,
        }
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Get the default configuration file path
    pub fn config_path() -> ConfigResult<PathBuf> {
        Self::config_dir().map(|p| p.join(CONFIG_FILE))
    }
}

fn check_range(key: &str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("{value} is outside {min}..={max}"),
        })
    }
}

fn check_color(key: &str, value: &str) -> ConfigResult<()> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("{value:?} is not a #rrggbb colour"),
        })
    }
}

/// Page layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub page_size: PageSize,

    /// Margin on every side, in centimetres
    pub margin_cm: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_cm: 1.5,
        }
    }
}

/// Body typography configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    /// Body font size in points; headings scale from it
    pub base_font_size: f64,

    /// Code font size in points
    pub code_font_size: f64,

    /// Space below paragraphs in pixels
    pub paragraph_spacing: u32,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            base_font_size: 12.0,
            code_font_size: 11.0,
            paragraph_spacing: 8,
        }
    }
}

/// Code block configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Box background colour
    pub background: String,

    pub padding_vertical: u32,
    pub padding_horizontal: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,

    /// Wrap long code lines instead of letting them overflow
    pub wrap: bool,

    /// Fragments larger than this are not highlighted
    pub max_fragment_bytes: usize,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            background: "#f5f5f5".to_string(),
            padding_vertical: 15,
            padding_horizontal: 12,
            margin_top: 15,
            margin_bottom: 15,
            wrap: true,
            max_fragment_bytes: DEFAULT_MAX_FRAGMENT_BYTES,
        }
    }
}

/// Highlight colours, one per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub keyword: String,
    pub string: String,
    pub comment: String,
    pub number: String,
    pub function: String,
    pub decorator: String,
}

impl ColorConfig {
    /// (name, value) for every colour
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("keyword", self.keyword.as_str()),
            ("string", self.string.as_str()),
            ("comment", self.comment.as_str()),
            ("number", self.number.as_str()),
            ("function", self.function.as_str()),
            ("decorator", self.decorator.as_str()),
        ]
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            keyword: "#00BFFF".to_string(),
            string: "#ff8c00".to_string(),
            comment: "#006400".to_string(),
            number: "#FF00FF".to_string(),
            function: "#795e26".to_string(),
            decorator: "#808080".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// External HTML to PDF renderer
    pub pdf_engine: PdfEngine,

    /// Remove emoji before rendering; many PDF fonts lack the glyphs
    pub strip_emoji: bool,
}

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    A3,
}

impl PageSize {
    /// Name as used by CSS `@page` and the PDF engines
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::A3 => "A3",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Comfortable reading sizes
    #[default]
    Default,
    /// Smaller type and tighter spacing to fit more per page
    Compact,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "compact" => Ok(Preset::Compact),
            _ => Err(ConfigError::UnknownName {
                kind: "preset",
                value: s.to_string(),
            }),
        }
    }
}
