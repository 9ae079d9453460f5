//! Site-wide avatar defaults.
//!
//! Loads an optional `gravatar.toml`; keys it leaves out keep their defaults. A site
//! usually wants the same size, rating, and fallback for every avatar; the
//! config seeds a builder through [`GravatarImage::from_config`], and
//! individual calls override what they need.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! size = 80                          # Square dimension in pixels (1-2048)
//! rating = "g"                       # g | pg | r | x
//! default_image = "default"          # default | 404 | mm | identicon | monsterid | wavatar | retro
//! # default_image_url = "https://example.com/avatar.png"
//! encode_default_image_url = false   # Percent-encode default_image_url
//! force_default_image = false
//! force_secure_request = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! [`GravatarImage::from_config`]: crate::GravatarImage::from_config

use crate::options::{DefaultImage, Rating};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILENAME: &str = "gravatar.toml";

/// Size used when the config file does not set one (Gravatar's own default).
pub const DEFAULT_SIZE: u32 = 80;

/// Largest size Gravatar will serve.
pub const MAX_SIZE: u32 = 2048;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    /// Square dimension in pixels.
    pub size: u32,
    /// Maximum content rating.
    pub rating: Rating,
    /// Built-in fallback when no avatar is registered.
    pub default_image: DefaultImage,
    /// Custom fallback image; overrides `default_image`.
    pub default_image_url: Option<String>,
    /// Percent-encode `default_image_url` before it goes into the query.
    pub encode_default_image_url: bool,
    pub force_default_image: bool,
    pub force_secure_request: bool,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            rating: Rating::G,
            default_image: DefaultImage::Default,
            default_image_url: None,
            encode_default_image_url: false,
            force_default_image: false,
            force_secure_request: false,
        }
    }
}

impl AvatarConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(ConfigError::Validation(format!(
                "size must be 1-{MAX_SIZE}"
            )));
        }
        if self.encode_default_image_url
            && self.default_image_url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::Validation(
                "encode_default_image_url requires default_image_url".into(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate the contents of a `gravatar.toml`.
///
/// Missing keys take their defaults; unknown keys are an error.
pub fn parse_config(content: &str) -> Result<AvatarConfig, ConfigError> {
    let config: AvatarConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `gravatar.toml` from `dir`, or the defaults when there is none.
pub fn load_config(dir: &Path) -> Result<AvatarConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(AvatarConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// A fully-commented stock `gravatar.toml`. Used by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gravatar image defaults
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Square image size in pixels (1-2048).
size = 80

# Highest content rating to show: "g", "pg", "r" or "x".
# A rating includes everything below it.
rating = "g"

# Built-in image shown when no avatar is registered for an address:
#   "default"    Gravatar logo
#   "404"        no image, respond with HTTP 404
#   "mm"         mystery-man silhouette
#   "identicon"  geometric pattern
#   "monsterid"  generated monster
#   "wavatar"    generated face
#   "retro"      8-bit pixel face
default_image = "default"

# Your own fallback image. Takes precedence over default_image.
# default_image_url = "https://example.com/avatar.png"

# Percent-encode default_image_url before placing it in the query string.
encode_default_image_url = false

# Always show the fallback image, even if an avatar exists.
force_default_image = false

# Always use https://secure.gravatar.com, even on plain-HTTP pages.
force_secure_request = false
"##
}
