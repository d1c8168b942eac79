use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnosis::{DiagnosisThresholds, ProblemDiagnoser};
use crate::error::VertRsError;
use crate::jump::JumpAnalyzer;
use crate::logging::LogConfig;
use crate::models::ProfileDefaults;
use crate::progress::{ProgressModel, ProgressProjector};
use crate::strength::StrengthAssessor;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// Analytics tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Parameters shared by every analytics component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fallbacks for missing profile fields
    pub profile_defaults: ProfileDefaults,

    /// Problem diagnosis thresholds
    pub diagnosis: DiagnosisThresholds,

    /// Jump-progress projection model
    pub progress: ProgressModel,
}

impl AnalysisConfig {
    pub fn jump_analyzer(&self) -> JumpAnalyzer {
        JumpAnalyzer::with_defaults(self.profile_defaults.clone())
    }

    pub fn strength_assessor(&self) -> StrengthAssessor {
        StrengthAssessor::with_defaults(self.profile_defaults.clone())
    }

    pub fn diagnoser(&self) -> ProblemDiagnoser {
        ProblemDiagnoser::with_thresholds(self.diagnosis.clone())
    }

    pub fn progress_projector(&self) -> ProgressProjector {
        ProgressProjector::with_config(self.progress.clone(), self.profile_defaults.clone())
    }
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();

        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            analysis: AnalysisConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vertrs")
            .join("config.toml")
    }

    /// Load configuration, using defaults only when the file does not exist
    pub fn load_or_default(path: Option<&Path>) -> crate::error::Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
            .map_err(|err| VertRsError::Configuration(format!("{:#}", err)))
    }
}
