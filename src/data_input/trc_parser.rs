// src/data_input/trc_parser.rs

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{TRC_DUPLICATE_SEPARATOR, TRC_LABEL_LINE_INDEX, TRC_METADATA_COLUMNS, TRC_PROTOCOL_WIDTH};
use crate::data_input::read_lossy;
use crate::data_input::trc_data::{TrcData, TrcHeader, TrcRow};
use crate::error::{IngestError, Result};

/// Parses a TRC marker-trajectory file into a disambiguated header and its rows.
///
/// The whole file is read before parsing. Blank lines are dropped first; the 5th remaining
/// line holds the axis labels (`X1 Y1 Z1 X2 ...`) and every following line is one frame.
pub fn parse_trc_file(input_file_path: &Path) -> Result<TrcData> {
    let content = read_lossy(input_file_path)?;
    info!("Reading TRC file {}", input_file_path.display());
    parse_trc_content(&content, input_file_path)
}

/// Parses TRC content already loaded in memory.
pub fn parse_trc_str(content: &str) -> Result<TrcData> {
    parse_trc_content(content, Path::new("<memory>"))
}

fn parse_trc_content(content: &str, source: &Path) -> Result<TrcData> {
    let lines: Vec<&str> = content
        .split(|c: char| c == '\n' || c == '\r')
        .filter(|line| !line.trim().is_empty())
        .collect();

    let label_line = lines.get(TRC_LABEL_LINE_INDEX).ok_or_else(|| IngestError::MalformedTrc {
        path: source.to_path_buf(),
        reason: format!(
            "expected the axis label line at non-blank line {}, file has {} non-blank line(s)",
            TRC_LABEL_LINE_INDEX + 1,
            lines.len()
        ),
    })?;

    let raw_labels: Vec<&str> = label_line.split_whitespace().collect();
    debug!("Raw TRC labels ({}): {:?}", raw_labels.len(), raw_labels);

    let header = build_header(&raw_labels);
    info!(
        "TRC header: {} column(s) ({} raw label(s), protocol width {})",
        header.len(),
        raw_labels.len(),
        TRC_PROTOCOL_WIDTH
    );

    let rows: Vec<TrcRow> = lines[TRC_LABEL_LINE_INDEX + 1..]
        .iter()
        .map(|line| parse_trc_row(line, header.len()))
        .collect();

    let short_rows = count_short_rows(&lines[TRC_LABEL_LINE_INDEX + 1..], header.len());
    if short_rows > 0 {
        debug!("{} TRC row(s) have fewer cells than the header", short_rows);
    }
    info!("Finished reading {} TRC data rows.", rows.len());

    Ok(TrcData { header, rows })
}

/// Builds the full header: metadata columns, then the disambiguated axis labels,
/// cut to the protocol width. A shorter header is kept as is.
pub fn build_header<S: AsRef<str>>(raw_labels: &[S]) -> TrcHeader {
    let assembled: Vec<&str> = TRC_METADATA_COLUMNS
        .iter()
        .copied()
        .chain(raw_labels.iter().map(AsRef::as_ref))
        .collect();

    let mut columns = disambiguate_labels(&assembled);
    if columns.len() > TRC_PROTOCOL_WIDTH {
        debug!(
            "Dropping {} TRC column(s) beyond the protocol width",
            columns.len() - TRC_PROTOCOL_WIDTH
        );
        columns.truncate(TRC_PROTOCOL_WIDTH);
    }
    TrcHeader::new(columns)
}

/// Makes repeated labels unique in first-seen order.
///
/// The first occurrence keeps its name; later occurrences get `.1`, `.2`, ... A suffix that
/// would collide with a name already in the list is skipped, so an already unique list
/// comes back unchanged.
pub fn disambiguate_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut repeats: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(labels.len());

    for label in labels {
        let label = label.as_ref();
        let name = if taken.contains(label) {
            let count = repeats.entry(label).or_insert(0);
            loop {
                *count += 1;
                let candidate = format!("{}{}{}", label, TRC_DUPLICATE_SEPARATOR, count);
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            label.to_string()
        };
        taken.insert(name.clone());
        unique.push(name);
    }
    unique
}

// Zips a data line against the header width; missing trailing cells stay absent.
fn parse_trc_row(line: &str, width: usize) -> TrcRow {
    let mut cells = line.split_whitespace();
    let values = (0..width).map(|_| cells.next().and_then(parse_trc_cell)).collect();
    TrcRow::new(values)
}

fn count_short_rows(lines: &[&str], width: usize) -> usize {
    lines
        .iter()
        .filter(|line| line.split_whitespace().count() < width)
        .count()
}

// Non-finite values (`NaN`, `inf`) count as absent.
fn parse_trc_cell(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}


// src/data_input/trc_parser.rs
