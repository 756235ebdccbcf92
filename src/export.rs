// src/export.rs

use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::axis_names::{axis_name, AXIS_COUNT};
use crate::data_input::htr_data::HtrData;
use crate::error::Result;
use crate::marker_mapper::MarkerSet;

/// Writes the populated markers as one CSV row per frame.
///
/// Columns are `Frame` then `<marker>_X,<marker>_Y,<marker>_Z`. Absent coordinates are
/// written as empty cells; empty markers are left out.
pub fn write_marker_set_csv(output_path: &Path, markers: &MarkerSet) -> Result<()> {
    let file = File::create(output_path)?;
    let frames = write_marker_set(file, markers)?;
    info!("Wrote {} marker frame(s) to {}", frames, output_path.display());
    Ok(())
}

/// Same as `write_marker_set_csv` over any writer. Returns the number of frames written.
pub fn write_marker_set<W: Write>(writer: W, markers: &MarkerSet) -> Result<usize> {
    let mut wtr = Writer::from_writer(writer);
    let populated: Vec<_> = markers.populated().collect();

    let mut header = vec!["Frame".to_string()];
    for (label, _) in &populated {
        header.extend((0..AXIS_COUNT).map(|axis| format!("{}_{}", label, axis_name(axis))));
    }
    wtr.write_record(&header)?;

    let frames = populated.iter().map(|(_, t)| t.len()).max().unwrap_or(0);
    for frame in 0..frames {
        let mut record = vec![frame.to_string()];
        for (_, trajectory) in &populated {
            let sample = trajectory.get(frame);
            for axis in 0..AXIS_COUNT {
                record.push(sample.and_then(|s| s.axis(axis)).map(|v| v.to_string()).unwrap_or_default());
            }
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(frames)
}

/// Writes the HTR segments as one CSV row per frame.
///
/// Columns are `Frame` then `<segment>_<column>` for every selected column. NaN cells are
/// written as `NaN`; a segment shorter than the longest one leaves its trailing cells empty.
pub fn write_segments_csv(output_path: &Path, htr: &HtrData) -> Result<()> {
    let file = File::create(output_path)?;
    let frames = write_segments(file, htr)?;
    info!("Wrote {} segment frame(s) to {}", frames, output_path.display());
    Ok(())
}

pub fn write_segments<W: Write>(writer: W, htr: &HtrData) -> Result<usize> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec!["Frame".to_string()];
    for (name, series) in &htr.segments {
        header.extend(series.columns().iter().map(|column| format!("{}_{}", name, column)));
    }
    wtr.write_record(&header)?;

    let frames = htr.max_frames();
    for frame in 0..frames {
        let mut record = vec![frame.to_string()];
        for series in htr.segments.values() {
            match series.records().get(frame) {
                Some(rec) => record.extend(rec.values().iter().map(|v| v.to_string())),
                None => record.extend(std::iter::repeat(String::new()).take(series.columns().len())),
            }
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(frames)
}


// src/export.rs
