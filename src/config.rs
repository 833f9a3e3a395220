//! Configuration management for the genea CLI
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneaConfig {
    #[serde(default)]
    pub snapshot: SnapshotSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow::anyhow!("Unsupported format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Settings taken from `GENEA_*` environment variables; unset stays `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub snapshot_path: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            snapshot_path: lookup("GENEA_SNAPSHOT_PATH").map(PathBuf::from),
            output_format: lookup("GENEA_OUTPUT_FORMAT")
                .map(|format| format.parse())
                .transpose()?,
            log_level: lookup("GENEA_LOG_LEVEL"),
        })
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl GeneaConfig {
    /// Load configuration from file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: GeneaConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Load configuration overrides from environment variables
    pub fn load_from_env() -> Result<EnvOverrides> {
        EnvOverrides::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides; every variable that is set wins
    pub fn apply_overrides(&mut self, overrides: EnvOverrides) {
        if let Some(path) = overrides.snapshot_path {
            self.snapshot.path = Some(path);
        }
        if let Some(format) = overrides.output_format {
            self.output.format = format;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge_with(&mut self, other: GeneaConfig) {
        if other.snapshot.path.is_some() {
            self.snapshot.path = other.snapshot.path;
        }
        if other.output.format != OutputFormat::default() {
            self.output.format = other.output.format;
        }
        if other.logging.level != LoggingSettings::default().level {
            self.logging.level = other.logging.level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            ));
        }

        if let Some(path) = &self.snapshot.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("Snapshot path must not be empty"));
            }
        }

        Ok(())
    }
}
