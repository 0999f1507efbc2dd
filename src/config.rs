//! Configuration for pixelhide.
//!
//! Stored in `~/.pixelhide/config.toml`. Every key is optional:
//!
//! ```toml
//! codec = "huffman"
//! caesar_shift = 7
//! margin_bytes = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::{CodecKind, CodecOptions, DEFAULT_SHIFT};
use crate::error::{Result, StegoError};
use crate::stego::{BitEmbedder, DEFAULT_MARGIN_BYTES};

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// User defaults for codec selection and embedding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Codec used when none is given on the command line.
    pub codec: CodecKind,

    /// Caesar shift, reduced mod 256.
    pub caesar_shift: i64,

    /// Spare bytes required beyond the encoded message.
    pub margin_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            codec: CodecKind::default(),
            caesar_shift: DEFAULT_SHIFT,
            margin_bytes: DEFAULT_MARGIN_BYTES,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads the configuration from `path`.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Path to the default configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join(CONFIG_FILE))
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            shift: self.caesar_shift,
        }
    }

    pub fn embedder(&self) -> BitEmbedder {
        BitEmbedder::new(self.margin_bytes)
    }
}

/// Get the pixelhide configuration directory (`~/.pixelhide`).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".pixelhide"))
        .ok_or_else(|| {
            StegoError::Config("Unable to determine home directory".to_string())
        })
}
