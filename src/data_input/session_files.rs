// src/data_input/session_files.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{HTR_EXTENSION, TRC_EXTENSION};
use crate::data_input::read_lossy;
use crate::error::{IngestError, Result};
use crate::model_registry::ModelId;

/// HTR and TRC files found in one trial directory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionFiles {
    pub dir: PathBuf,
    pub htr: Option<PathBuf>,
    pub trc: Option<PathBuf>,
}

impl SessionFiles {
    /// Both paths, or a "no analyzable file found" error naming what is missing.
    pub fn require_both(&self) -> Result<(&Path, &Path)> {
        match (&self.htr, &self.trc) {
            (Some(htr), Some(trc)) => Ok((htr.as_path(), trc.as_path())),
            _ => Err(IngestError::NoSessionFiles {
                dir: self.dir.clone(),
                htr_found: self.htr.is_some(),
                trc_found: self.trc.is_some(),
            }),
        }
    }
}

/// Lists a trial directory and picks the first `.htr` and `.trc` file by name.
/// Extensions match case-insensitively.
pub fn find_session_files(dir: &Path) -> Result<SessionFiles> {
    let mut names: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    names.sort();

    let first_with = |extension: &str| {
        names
            .iter()
            .find(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .cloned()
    };

    let files = SessionFiles {
        dir: dir.to_path_buf(),
        htr: first_with(HTR_EXTENSION),
        trc: first_with(TRC_EXTENSION),
    };
    info!(
        "Session {}: htr={:?} trc={:?}",
        dir.display(),
        files.htr.as_ref().map(|p| p.display().to_string()),
        files.trc.as_ref().map(|p| p.display().to_string())
    );
    Ok(files)
}

/// Guesses the marker model from the TRC content.
///
/// Files labeling columns up to `X23`/`X24` come from the CGM 2.3 placement; otherwise
/// `X8`/`X9` point to the Helen Hayes placement. Unreadable files count as undetected.
pub fn detect_model(trc_path: &Path) -> Option<ModelId> {
    match read_lossy(trc_path) {
        Ok(content) => detect_model_from_content(&content),
        Err(e) => {
            warn!("Could not read {} for model detection: {}", trc_path.display(), e);
            None
        }
    }
}

pub fn detect_model_from_content(content: &str) -> Option<ModelId> {
    if content.contains("X23") || content.contains("X24") {
        Some(ModelId::Cgm23)
    } else if content.contains("X8") || content.contains("X9") {
        Some(ModelId::ElenHayes)
    } else {
        None
    }
}

/// Picks the model to use: explicit override, then detection, then the fallback.
pub fn resolve_model(override_model: Option<ModelId>, detected: Option<ModelId>, fallback: ModelId) -> ModelId {
    if let Some(model) = override_model {
        debug!("Model '{}' forced by caller", model);
        return model;
    }
    match detected {
        Some(model) => {
            info!("Detected model '{}'", model);
            model
        }
        None => {
            warn!("Model undetected, defaulted to '{}'", fallback);
            fallback
        }
    }
}


// src/data_input/session_files.rs
