use serde::Deserialize;

/// Error loading a codec configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Limits applied while decoding untrusted buffers.
///
/// Any length prefix above these limits is rejected before allocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum element count accepted for a length-prefixed array.
    pub max_array_len: usize,
    /// Maximum byte length accepted for a length-prefixed string.
    pub max_string_len: usize,
}

impl CodecConfig {
    pub const DEFAULT_MAX_ARRAY_LEN: usize = 16 * 1024 * 1024;
    pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

    /// Parses a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_array_len: Self::DEFAULT_MAX_ARRAY_LEN,
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
        }
    }
}
