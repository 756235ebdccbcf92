// src/data_input/htr_parser.rs

use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{HTR_BLOCK_CLOSE, HTR_BLOCK_OPEN, HTR_PREAMBLE_BLOCKS};
use crate::data_input::read_lossy;
use crate::data_input::htr_data::{ColumnSelection, HtrData, SegmentName, SegmentRecord, SegmentSeries};
use crate::error::Result;
use crate::types::SegmentMap;

/// Reads an HTR file and extracts the selected columns for the requested segments.
///
/// `rotation` keeps `Rx Ry Rz`, `translation` keeps `Tx Ty Tz`; with both set all six
/// columns are kept. Requesting neither fails with a configuration error before the file
/// is opened.
pub fn parse_htr_file<S: AsRef<str>>(
    input_file_path: &Path,
    segments: &[S],
    rotation: bool,
    translation: bool,
) -> Result<HtrData> {
    let selection = ColumnSelection::new(rotation, translation)?;
    let content = read_lossy(input_file_path)?;
    info!("Reading HTR file {}", input_file_path.display());
    Ok(parse_htr_str(&content, segments, selection))
}

/// Parses HTR content already loaded in memory.
///
/// The content is split on `[` section openers and only sections whose text contains one
/// of the requested segment names are kept. The first two kept sections are document
/// preamble (hierarchy and base-position tables) and are always dropped. In each remaining
/// section the first non-blank line after the label is the column header and every
/// following non-blank line is a frame.
pub fn parse_htr_str<S: AsRef<str>>(content: &str, segments: &[S], selection: ColumnSelection) -> HtrData {
    let columns = selection.columns();
    let mut parsed: SegmentMap = SegmentMap::new();

    let blocks = content
        .split(HTR_BLOCK_OPEN)
        .filter(|block| segments.iter().any(|segment| block.contains(segment.as_ref())))
        .skip(HTR_PREAMBLE_BLOCKS);

    for block in blocks {
        let label = block.split(HTR_BLOCK_CLOSE).next().unwrap_or_default();
        let name = SegmentName::from_block_label(label);

        let lines: Vec<&str> = block
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < 2 {
            debug!("Skipping HTR block '{}': no header or no data", name);
            continue;
        }

        let header: Vec<&str> = lines[0].split_whitespace().collect();
        let column_indices: Vec<Option<usize>> = columns
            .iter()
            .map(|column| header.iter().position(|h| *h == column.label()))
            .collect();

        if column_indices.iter().any(Option::is_none) {
            let missing: Vec<&str> = columns
                .iter()
                .zip(&column_indices)
                .filter(|(_, idx)| idx.is_none())
                .map(|(column, _)| column.label())
                .collect();
            warn!("Missing columns {:?} in HTR block '{}', block skipped", missing, name);
            continue;
        }
        let column_indices: Vec<usize> = column_indices.into_iter().flatten().collect();

        let records: Vec<SegmentRecord> = lines[1..]
            .iter()
            .map(|line| {
                let cells: Vec<&str> = line.split_whitespace().collect();
                let values = column_indices
                    .iter()
                    .map(|&idx| cells.get(idx).map_or(f64::NAN, |cell| parse_htr_cell(cell)))
                    .collect();
                SegmentRecord::new(columns, values)
            })
            .collect();

        let nan_frames = records.iter().filter(|record| record.has_nan()).count();
        if nan_frames > 0 {
            debug!("HTR block '{}': {} frame(s) carry NaN cells", name, nan_frames);
        }
        debug!("HTR block '{}': {} frames", name, records.len());

        if parsed.insert(name.clone(), SegmentSeries::new(columns, records)).is_some() {
            debug!("HTR block '{}' appears more than once, keeping the last one", name);
        }
    }

    info!("Parsed {} HTR segment(s)", parsed.len());
    HtrData {
        selection,
        segments: parsed,
    }
}

// Unparseable cells stay visible downstream as NaN.
fn parse_htr_cell(cell: &str) -> f64 {
    cell.parse::<f64>().unwrap_or(f64::NAN)
}


// src/data_input/htr_parser.rs
