// src/config.rs
//
// Reader settings, loadable from a TOML file. Every section has defaults so an empty or
// missing file behaves like the stock configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_ANALYSIS_SCRIPT, DEFAULT_FALLBACK_MODEL, DEFAULT_HTR_SEGMENTS, DEFAULT_PYTHON_EXECUTABLE};
use crate::data_input::htr_data::ColumnSelection;
use crate::error::{IngestError, Result};
use crate::model_registry::ModelId;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub htr: HtrSettings,
    pub model: ModelSettings,
    pub analysis: AnalysisSettings,
}

/// Which HTR segments and columns to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtrSettings {
    /// Raw block labels, e.g. `R.Thigh`.
    pub segments: Vec<String>,
    pub rotation: bool,
    pub translation: bool,
}

impl Default for HtrSettings {
    fn default() -> Self {
        Self {
            segments: DEFAULT_HTR_SEGMENTS.iter().map(|s| s.to_string()).collect(),
            rotation: true,
            translation: false,
        }
    }
}

impl HtrSettings {
    pub fn selection(&self) -> Result<ColumnSelection> {
        ColumnSelection::new(self.rotation, self.translation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model used when detection fails.
    pub fallback: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_MODEL.to_string(),
        }
    }
}

impl ModelSettings {
    pub fn fallback_model(&self) -> Result<ModelId> {
        ModelId::from_name(&self.fallback)
            .ok_or_else(|| IngestError::Config(format!("unknown fallback model '{}'", self.fallback)))
    }
}

/// External analysis process invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub python: String,
    pub script: PathBuf,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON_EXECUTABLE.to_string(),
            script: PathBuf::from(DEFAULT_ANALYSIS_SCRIPT),
        }
    }
}

impl IngestConfig {
    /// Load and validate settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| IngestError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Settings from `path` when given, stock settings otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.htr.rotation && !self.htr.translation {
            return Err(IngestError::Config(
                "htr: at least one of rotation or translation must be true".to_string(),
            ));
        }
        if self.htr.segments.is_empty() {
            return Err(IngestError::Config("htr: segment list is empty".to_string()));
        }
        self.model.fallback_model()?;
        if self.analysis.python.trim().is_empty() {
            return Err(IngestError::Config("analysis: python executable is empty".to_string()));
        }
        Ok(())
    }
}


// src/config.rs
