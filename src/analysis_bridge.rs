// src/analysis_bridge.rs
//
// Boundary with the external gait-analysis process. The process receives the session paths
// and the resolved model as one JSON argument and prints one JSON object on stdout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use crate::config::AnalysisSettings;
use crate::error::{IngestError, Result};

/// Argument passed to the analysis process. Wire keys are the ones the script reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "htr")]
    pub htr_path: PathBuf,
    #[serde(rename = "trc")]
    pub trc_path: PathBuf,
    #[serde(rename = "modele")]
    pub model_name: String,
}

/// Analysis output. Known top-level sections are exposed as raw JSON; anything else the
/// process adds is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub htr_file: Option<String>,
    #[serde(default)]
    pub trc_file: Option<String>,
    #[serde(default, rename = "modele")]
    pub model_name: Option<String>,
    #[serde(default)]
    pub axis: Option<Value>,
    #[serde(default)]
    pub heelstrike: Option<Value>,
    #[serde(default)]
    pub toeoff: Option<Value>,
    #[serde(default, rename = "mean_cycles_L")]
    pub mean_cycles_left: Option<Value>,
    #[serde(default, rename = "mean_cycles_R")]
    pub mean_cycles_right: Option<Value>,
    #[serde(default, rename = "std_cycles_L")]
    pub std_cycles_left: Option<Value>,
    #[serde(default, rename = "std_cycles_R")]
    pub std_cycles_right: Option<Value>,
    #[serde(default, rename = "PST_L")]
    pub spatiotemporal_left: Option<Value>,
    #[serde(default, rename = "PST_R")]
    pub spatiotemporal_right: Option<Value>,
    #[serde(default, rename = "PST_global")]
    pub spatiotemporal_global: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Runs `<python> <script> <request json>` and decodes its stdout.
///
/// A non-zero exit, an empty stdout and a stdout that is not a JSON object are reported
/// as three different errors.
pub fn run_analysis(settings: &AnalysisSettings, request: &AnalysisRequest) -> Result<AnalysisResult> {
    let argument = serde_json::to_string(request)?;
    info!(
        "Running analysis: {} {} (model '{}')",
        settings.python,
        settings.script.display(),
        request.model_name
    );

    let output = Command::new(&settings.python)
        .arg(&settings.script)
        .arg(&argument)
        .output()?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        debug!("[analysis] {}", line);
    }

    if !output.status.success() {
        return Err(IngestError::AnalysisFailed {
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    decode_analysis_output(&String::from_utf8_lossy(&output.stdout))
}

/// Decodes the stdout of a successful analysis run.
pub fn decode_analysis_output(stdout: &str) -> Result<AnalysisResult> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(IngestError::AnalysisEmptyOutput);
    }
    serde_json::from_str(trimmed).map_err(|e| {
        debug!("Raw analysis output: {}", trimmed);
        IngestError::AnalysisInvalidJson(e.to_string())
    })
}


// src/analysis_bridge.rs
