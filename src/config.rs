//! Generator and preview configuration, loaded from JSON with baked-in fallbacks.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::{Validate, ValidationError};

use crate::{
    color::{Color, convert::is_valid_hex, create_color_from_hex},
    error::ColorError,
    generator::DEFAULT_MAX_ATTEMPTS,
};

/// Default location on disk where the preview tool looks for its JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/palette-preview.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CHROMA_DECK_CONFIG_PATH";
/// Where preview assets land unless configured otherwise.
const DEFAULT_OUTPUT_DIR: &str = "target/palette-preview";

/// Settings for a [`crate::generator::PaletteGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    /// Hue draws per color before distinctness is given up.
    pub max_attempts: usize,
    /// Fixed seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime configuration of the preview tool.
pub struct PreviewConfig {
    /// Generator settings.
    pub generator: GeneratorConfig,
    /// Hex colors to lock into the generated palette.
    pub pinned: Vec<String>,
    /// Extra color whose full tone ladder is rendered.
    pub tone_base: Option<String>,
    /// Directory receiving the HTML and JSON output.
    pub output_dir: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            pinned: Vec::new(),
            tone_base: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl PreviewConfig {
    /// Load from the default path (or the env override), falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load from `path`; unreadable, malformed, or invalid files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                return Self::default();
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                return Self::default();
            }
        };

        let raw = match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                return Self::default();
            }
        };

        if let Err(err) = raw.validate() {
            warn!(
                path = %path.display(),
                error = %err,
                "config failed validation; falling back to defaults"
            );
            return Self::default();
        }

        let config: Self = raw.into();
        info!(
            path = %path.display(),
            pinned = config.pinned.len(),
            seed = ?config.generator.seed,
            "loaded preview config"
        );
        config
    }

    /// Pinned hex values as locked colors, in configured order.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidColorValue`] for a malformed pin.
    pub fn pinned_colors(&self) -> Result<Vec<Color>, ColorError> {
        self.pinned
            .iter()
            .map(|hex| create_color_from_hex(hex, true))
            .collect()
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, max = 1000))]
    max_attempts: usize,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    #[validate(length(max = 5), custom(function = "validate_pins"))]
    pinned: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_hex"))]
    tone_base: Option<String>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl From<RawConfig> for PreviewConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            generator: GeneratorConfig {
                max_attempts: value.max_attempts,
                seed: value.seed,
            },
            pinned: value.pinned,
            tone_base: value.tone_base,
            output_dir: value
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }
}

/// Validates that a value is `#RRGGBB` or `RRGGBB`.
fn validate_hex(value: &str) -> Result<(), ValidationError> {
    if is_valid_hex(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("hex_format");
    err.message = Some(format!("expected #RRGGBB, got {value:?}").into());
    Err(err)
}

fn validate_pins(pins: &[String]) -> Result<(), ValidationError> {
    pins.iter().try_for_each(|pin| validate_hex(pin))
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
