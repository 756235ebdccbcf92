// src/constants.rs

// --- TRC (tabular marker trajectory) layout ---

// Fixed metadata columns prepended to every TRC header.
pub const TRC_METADATA_COLUMNS: [&str; 3] = ["Frame", "Time", "Timestamp"];

// Marker-axis columns carried by the supported capture-card layout.
pub const TRC_MARKER_AXIS_COLUMNS: usize = 101;

// Total header width after truncation (3 metadata + 101 marker axes).
pub const TRC_PROTOCOL_WIDTH: usize = TRC_METADATA_COLUMNS.len() + TRC_MARKER_AXIS_COLUMNS;

// Index of the raw axis-label line among the non-blank lines of a TRC file (5th line).
pub const TRC_LABEL_LINE_INDEX: usize = 4;

// Separator used when numbering repeated TRC labels ("X1", "X1.1", "X1.2", ...).
pub const TRC_DUPLICATE_SEPARATOR: char = '.';

// --- HTR (hierarchical translation/rotation) layout ---

// Character opening every HTR section label, e.g. "[R.Thigh]".
pub const HTR_BLOCK_OPEN: char = '[';
pub const HTR_BLOCK_CLOSE: char = ']';

// Number of leading matching sections that are document preamble, never segment data.
pub const HTR_PREAMBLE_BLOCKS: usize = 2;

// Lower-limb segments read when the caller does not name any.
pub const DEFAULT_HTR_SEGMENTS: [&str; 6] = ["R.Thigh", "L.Thigh", "R.Shank", "L.Shank", "L.Foot", "R.Foot"];

// --- Session discovery and model resolution ---

pub const HTR_EXTENSION: &str = "htr";
pub const TRC_EXTENSION: &str = "trc";

// Model used when content sniffing cannot tell which marker placement was recorded.
pub const DEFAULT_FALLBACK_MODEL: &str = "cgm23";

// --- External analysis process ---

pub const DEFAULT_ANALYSIS_SCRIPT: &str = "analyse.py";

#[cfg(target_os = "windows")]
pub const DEFAULT_PYTHON_EXECUTABLE: &str = "python";
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PYTHON_EXECUTABLE: &str = "python3";

// --- Export ---

pub const MARKERS_CSV_FILE_NAME: &str = "markers.csv";
pub const SEGMENTS_CSV_FILE_NAME: &str = "segments.csv";

// src/constants.rs
