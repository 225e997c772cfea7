//! Configuration module for the ESST domain layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Backend API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the REST backend (pages, project configuration)
    #[serde(default)]
    pub base_url: String,
}

/// Analytics aggregation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Seconds between full dashboard recomputes
    #[serde(default)]
    pub refresh_secs: u64,
    /// Seconds between realtime-estimate refreshes
    #[serde(default)]
    pub realtime_secs: u64,
    /// Capacity of the tracked-event ring buffer
    #[serde(default)]
    pub max_events: usize,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Get the `$ESST` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/esst`
    /// - macOS: `~/Library/Application Support/esst`
    /// - Windows: `%APPDATA%\esst`
    #[must_use]
    pub fn get_esst_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("esst")
    }

    /// Merge missing fields from defaults into this config
    /// Returns true if any fields were added
    fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // String fields count as missing when empty
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.api.base_url.is_empty() && !defaults.api.base_url.is_empty() {
            self.api.base_url.clone_from(&defaults.api.base_url);
            changed = true;
        }

        // Numeric fields count as missing when zero
        if self.analytics.refresh_secs == 0 && defaults.analytics.refresh_secs != 0 {
            self.analytics.refresh_secs = defaults.analytics.refresh_secs;
            changed = true;
        }
        if self.analytics.realtime_secs == 0 && defaults.analytics.realtime_secs != 0 {
            self.analytics.realtime_secs = defaults.analytics.realtime_secs;
            changed = true;
        }
        if self.analytics.max_events == 0 && defaults.analytics.max_events != 0 {
            self.analytics.max_events = defaults.analytics.max_events;
            changed = true;
        }

        changed
    }

    /// Get the user config file path
    ///
    /// return config.toml for release
    ///        dconfig.toml for debug
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_esst_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ESST` variable in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$ESST") {
            let esst_dir = Self::get_esst_dir();
            value.replace("$ESST", esst_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in config values
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.api.base_url = Self::expand_variables(&config.api.base_url);

        Ok(config)
    }

    /// Initialize config from defaults (TOML string)
    ///
    /// # Panics
    /// Panics if the compiled-in defaults TOML cannot be parsed
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load config from user config file, creating it from defaults on first run
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }

            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save config to user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be saved
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "base_url" => Some(self.api.base_url.clone()),
            "refresh_secs" => Some(self.analytics.refresh_secs.to_string()),
            "realtime_secs" => Some(self.analytics.realtime_secs.to_string()),
            "max_events" => Some(self.analytics.max_events.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "base_url" => self.api.base_url = value.to_string(),
            "refresh_secs" => {
                self.analytics.refresh_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid integer value for 'refresh_secs': '{value}'"))?;
            }
            "realtime_secs" => {
                self.analytics.realtime_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid integer value for 'realtime_secs': '{value}'"))?;
            }
            "max_events" => {
                self.analytics.max_events = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid integer value for 'max_events': '{value}'"))?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "base_url" => self.api.base_url.clone_from(&defaults.api.base_url),
            "refresh_secs" => self.analytics.refresh_secs = defaults.analytics.refresh_secs,
            "realtime_secs" => self.analytics.realtime_secs = defaults.analytics.realtime_secs,
            "max_events" => self.analytics.max_events = defaults.analytics.max_events,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// # Errors
    /// Returns an error if the config file cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[api]")?;
        writeln!(f, "  base_url = \"{}\"", self.api.base_url)?;

        writeln!(f, "\n[analytics]")?;
        writeln!(f, "  refresh_secs = {}", self.analytics.refresh_secs)?;
        writeln!(f, "  realtime_secs = {}", self.analytics.realtime_secs)?;
        writeln!(f, "  max_events = {}", self.analytics.max_events)?;

        Ok(())
    }
}
