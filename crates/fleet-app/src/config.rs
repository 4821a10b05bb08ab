//! Configuration management for fleet-efficiency
//!
//! Config stored at: ~/.config/fleet-efficiency/config.json

use std::path::{Path, PathBuf};

use fleet_domain::service::ParseMode;
use fleet_infra::emailjs::{EmailJsSettings, DEFAULT_ENDPOINT};
use fleet_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// EmailJS service id
    #[serde(default = "default_service_id")]
    pub email_service_id: String,

    /// EmailJS template id
    #[serde(default = "default_template_id")]
    pub email_template_id: String,

    /// EmailJS public key
    #[serde(default)]
    pub email_public_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub email_endpoint: String,

    /// Where exports and charts are written (current directory if unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Reject malformed numbers instead of carrying NaN
    #[serde(default)]
    pub strict_numbers: bool,
}

fn default_service_id() -> String {
    "service_j83qwat".to_string()
}

fn default_template_id() -> String {
    "template_rrx9y3r".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email_service_id: default_service_id(),
            email_template_id: default_template_id(),
            email_public_key: None,
            email_endpoint: default_endpoint(),
            output_dir: None,
            output_format: default_output_format(),
            strict_numbers: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("fleet-efficiency");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_numbers {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn email_settings(&self) -> EmailJsSettings {
        EmailJsSettings {
            endpoint: self.email_endpoint.clone(),
            service_id: self.email_service_id.clone(),
            template_id: self.email_template_id.clone(),
            public_key: self.email_public_key.clone(),
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fleet Efficiency Configuration")?;
        writeln!(f, "==============================")?;
        writeln!(f)?;
        writeln!(f, "Email service:   {}", self.email_service_id)?;
        writeln!(f, "Email template:  {}", self.email_template_id)?;
        writeln!(
            f,
            "Public key:      {}",
            if self.email_public_key.is_some() { "(set)" } else { "(not set)" }
        )?;
        writeln!(f, "Email endpoint:  {}", self.email_endpoint)?;
        writeln!(f, "Output dir:      {}", self.output_dir().display())?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Strict numbers:  {}", self.strict_numbers)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
