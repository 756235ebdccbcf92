// src/session.rs
//
// Loads one trial directory end to end: file discovery, model resolution, TRC parsing,
// marker mapping and HTR parsing. Each load owns its inputs and outputs, so independent
// trials can be loaded in parallel.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis_bridge::AnalysisRequest;
use crate::config::IngestConfig;
use crate::correction::apply_correction;
use crate::data_input::htr_data::HtrData;
use crate::data_input::htr_parser::parse_htr_file;
use crate::data_input::session_files::{detect_model, find_session_files, resolve_model};
use crate::data_input::trc_data::TrcData;
use crate::data_input::trc_parser::parse_trc_file;
use crate::error::Result;
use crate::marker_mapper::{marker_set, MarkerSet};
use crate::model_registry::ModelId;

/// Everything parsed for one trial.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub dir: PathBuf,
    pub htr_path: PathBuf,
    pub trc_path: PathBuf,
    pub model: ModelId,
    /// False when the model came from the fallback setting.
    pub model_detected: bool,
    pub trc: TrcData,
    pub markers: MarkerSet,
    pub segments: HtrData,
}

impl LoadedSession {
    /// HTR segments with the model's sign correction applied.
    pub fn corrected_segments(&self) -> HtrData {
        apply_correction(&self.segments, self.model.model())
    }

    pub fn analysis_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            htr_path: self.htr_path.clone(),
            trc_path: self.trc_path.clone(),
            model_name: self.model.name().to_string(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            dir: self.dir.clone(),
            model: self.model,
            model_detected: self.model_detected,
            header_width: self.trc.header.len(),
            trc_frames: self.trc.frame_count(),
            populated_markers: self.markers.populated().map(|(label, _)| label.to_string()).collect(),
            empty_markers: self.markers.empty_markers().iter().map(|label| label.to_string()).collect(),
            segments: self
                .segments
                .segments
                .iter()
                .map(|(name, series)| (name.to_string(), series.len()))
                .collect(),
        }
    }
}

/// Printable overview of a loaded trial.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub dir: PathBuf,
    pub model: ModelId,
    pub model_detected: bool,
    pub header_width: usize,
    pub trc_frames: usize,
    pub populated_markers: Vec<String>,
    pub empty_markers: Vec<String>,
    pub segments: Vec<(String, usize)>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session: {}", self.dir.display())?;
        writeln!(
            f,
            "  Model: {}{}",
            self.model,
            if self.model_detected { "" } else { " (undetected, defaulted)" }
        )?;
        writeln!(f, "  TRC: {} columns, {} frames", self.header_width, self.trc_frames)?;
        writeln!(f, "  Markers populated ({}): {}", self.populated_markers.len(), self.populated_markers.join(", "))?;
        if !self.empty_markers.is_empty() {
            writeln!(f, "  Markers empty ({}): {}", self.empty_markers.len(), self.empty_markers.join(", "))?;
        }
        if self.populated_markers.is_empty() {
            writeln!(f, "  Warning: parse produced no usable markers")?;
        }
        write!(f, "  HTR segments ({}):", self.segments.len())?;
        for (name, frames) in &self.segments {
            write!(f, " {}={}", name, frames)?;
        }
        Ok(())
    }
}

/// Loads one trial directory.
///
/// `model_override` skips detection. HTR settings (segments, rotation/translation) come from
/// `config`; a selection with neither rotation nor translation fails before any file is read.
pub fn load_session(dir: &Path, config: &IngestConfig, model_override: Option<ModelId>) -> Result<LoadedSession> {
    let selection = config.htr.selection()?;
    let fallback = config.model.fallback_model()?;

    let files = find_session_files(dir)?;
    let (htr_path, trc_path) = files.require_both()?;

    let detected = match model_override {
        Some(_) => None,
        None => detect_model(trc_path),
    };
    let model = resolve_model(model_override, detected, fallback);
    let model_detected = model_override.is_some() || detected.is_some();

    let trc = parse_trc_file(trc_path)?;
    let markers = marker_set(model.name(), &trc);

    let segments = parse_htr_file(htr_path, config.htr.segments.as_slice(), selection.rotation(), selection.translation())?;
    if segments.is_empty() {
        warn!("No HTR segment matched {:?} in {}", config.htr.segments, htr_path.display());
    }

    info!(
        "Loaded {}: {} frames, {} marker(s) populated, {} segment(s)",
        dir.display(),
        trc.frame_count(),
        markers.populated().count(),
        segments.len()
    );

    Ok(LoadedSession {
        dir: dir.to_path_buf(),
        htr_path: htr_path.to_path_buf(),
        trc_path: trc_path.to_path_buf(),
        model,
        model_detected,
        trc,
        markers,
        segments,
    })
}

/// Loads two trials concurrently, e.g. for a side-by-side comparison.
/// A failure in one load does not affect the other.
pub fn load_sessions_parallel(
    first: &Path,
    second: &Path,
    config: &IngestConfig,
    model_override: Option<ModelId>,
) -> (Result<LoadedSession>, Result<LoadedSession>) {
    rayon::join(
        || load_session(first, config, model_override),
        || load_session(second, config, model_override),
    )
}

// src/session.rs
