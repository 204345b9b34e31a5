//! # Configuration Management
//!
//! Centralized configuration for the packet wire format.
//!
//! The codec depends on three collaborator inputs: the reserved server
//! identity, the canned message strings the server sends, and the maximum
//! frame size accepted on decode. All of them live here together with the
//! logging settings.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`
//!
//! ## Security Considerations
//! - The default maximum frame size (16 MB) bounds the allocation a single
//!   declared length can trigger

use crate::core::text;
use crate::error::{constants, ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Size of the fixed frame header in bytes
pub const HEADER_SIZE: usize = 18;

/// Max allowed frame size, header included (16 MB)
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Largest frame the 32-bit length field can describe
pub const ABSOLUTE_MAX_FRAME_SIZE: usize = HEADER_SIZE + i32::MAX as usize;

/// Identity the server stamps as source on every packet it originates
pub const SERVER_SOURCE_ID: i32 = 1;

/// Magic bytes value meaning no session token has been issued yet
pub const NO_MAGIC_BYTES: i32 = 0;

/// Announcement sent with a freshly generated client id
pub const GENERATED_ID_MESSAGE: &str = "Client id generated by server";

/// Notice sent back when the requested destination is not connected
pub const DESTINATION_NOT_FOUND_MESSAGE: &str = "Destination id is not present on server";

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProtocolConfig {
    /// Frame codec configuration
    #[serde(default)]
    pub codec: CodecConfig,

    /// Server identity and canned messages
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProtocolConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("PACKET_WIRE_MAX_FRAME_SIZE") {
            config.codec.max_frame_size = size.parse::<usize>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid PACKET_WIRE_MAX_FRAME_SIZE: {e}"))
            })?;
        }

        if let Ok(id) = std::env::var("PACKET_WIRE_SERVER_SOURCE_ID") {
            config.identity.server_source_id = id.parse::<i32>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid PACKET_WIRE_SERVER_SOURCE_ID: {e}"))
            })?;
        }

        if let Ok(level) = std::env::var("PACKET_WIRE_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                ProtocolError::ConfigError(format!("Invalid PACKET_WIRE_LOG_LEVEL: {level}"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.codec.validate());
        errors.extend(self.identity.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Frame codec configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Largest frame (header plus payload) accepted on decode
    pub max_frame_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl CodecConfig {
    /// Validate codec configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_frame_size < HEADER_SIZE {
            errors.push(format!(
                "Max frame size {} is smaller than the {HEADER_SIZE}-byte header",
                self.max_frame_size
            ));
        } else if self.max_frame_size < 1024 {
            errors.push("Max frame size too small (minimum: 1 KB)".to_string());
        } else if self.max_frame_size > ABSOLUTE_MAX_FRAME_SIZE {
            errors.push(format!(
                "Max frame size {} exceeds what the 32-bit length field can describe",
                self.max_frame_size
            ));
        } else if self.max_frame_size > 100 * 1024 * 1024 {
            errors.push(format!(
                "Max frame size too large: {} bytes (maximum recommended: 100 MB)",
                self.max_frame_size
            ));
        }

        errors
    }
}

/// Server identity and the canned messages the server originates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Reserved id used as source on every server-originated packet
    pub server_source_id: i32,

    /// Message sent along with a generated client id
    pub generated_id_message: String,

    /// Message sent when a destination id has no connected client
    pub destination_not_found_message: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            server_source_id: SERVER_SOURCE_ID,
            generated_id_message: String::from(GENERATED_ID_MESSAGE),
            destination_not_found_message: String::from(DESTINATION_NOT_FOUND_MESSAGE),
        }
    }
}

impl IdentityConfig {
    /// Validate identity configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, message) in [
            ("generated_id_message", &self.generated_id_message),
            (
                "destination_not_found_message",
                &self.destination_not_found_message,
            ),
        ] {
            if message.is_empty() {
                errors.push(format!("{}: {name}", constants::ERR_EMPTY_CANNED_MESSAGE));
            } else if let Err(e) = text::encoded_len(message) {
                errors.push(format!("{name} cannot be sent on the wire: {e}"));
            }
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("packet-wire"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        level.as_str().to_ascii_lowercase().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
