//! Configuration File Loading
//!
//! Handles loading and saving configuration files from various locations
//! with support for multiple formats and fallback to defaults.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "MYTERM_CONFIG";

/// Configuration file loader
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths for configuration files, without extension
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats, in preference order
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Load configuration with custom options
    ///
    /// An explicit file named by `MYTERM_CONFIG` wins over the search paths.
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<Config> {
        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(explicit);
            let config = self.load_from_path(&path)?;
            if options.validate {
                config.validate()?;
            }
            return Ok(config);
        }

        if let Some((path, config)) = self.find_and_load_config()? {
            debug!("Loaded configuration from {}", path.display());
            self.current_path = Some(path);
            if options.validate {
                config.validate()?;
            }
            return Ok(config);
        }

        if options.create_default {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load a specific file, choosing the format from its extension
    pub fn load_from_path(&mut self, path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }
        let config = self.load_config_file(path, ConfigFormat::from_path(path))?;
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the current path or default location
    pub fn save(&self, config: &Config) -> Result<PathBuf> {
        let path = self
            .current_path
            .clone()
            .unwrap_or_else(Self::get_default_config_path);
        self.save_to_path(config, &path)?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => config.to_toml()?,
        };

        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = path.with_extension(format.extension());

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            // Keep searching; a broken file should not block startup
                            warn!(
                                "Failed to load config from {}: {}",
                                config_path.display(),
                                e
                            );
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match format {
            ConfigFormat::Toml => Config::from_toml(&content),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("myterm").join("config"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".myterm").join("config"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".myterm"));
        }

        paths
    }

    /// Get the default configuration path
    pub fn get_default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("myterm")
            .join("config.toml")
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Replace the search paths with a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
