// src/data_input/mod.rs

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::Result;

pub mod htr_data;
pub mod htr_parser;
pub mod session_files;
pub mod trc_data;
pub mod trc_parser;

/// Reads a capture file as text, replacing bytes that are not valid UTF-8.
pub(crate) fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8_lossy(&bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!("{} is not valid UTF-8; invalid bytes replaced", path.display());
            text
        }
    })
}


// src/data_input/mod.rs
