// src/data_input/htr_data.rs

use ndarray::Array2;
use std::fmt;

use crate::error::{IngestError, Result};
use crate::types::SegmentMap;

/// The six per-frame columns an HTR segment block can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HtrColumn {
    Tx,
    Ty,
    Tz,
    Rx,
    Ry,
    Rz,
}

const TRANSLATION_AND_ROTATION: [HtrColumn; 6] = [
    HtrColumn::Tx,
    HtrColumn::Ty,
    HtrColumn::Tz,
    HtrColumn::Rx,
    HtrColumn::Ry,
    HtrColumn::Rz,
];
const ROTATION_ONLY: [HtrColumn; 3] = [HtrColumn::Rx, HtrColumn::Ry, HtrColumn::Rz];
const TRANSLATION_ONLY: [HtrColumn; 3] = [HtrColumn::Tx, HtrColumn::Ty, HtrColumn::Tz];

impl HtrColumn {
    /// Column label as written in the block header line.
    pub fn label(self) -> &'static str {
        match self {
            HtrColumn::Tx => "Tx",
            HtrColumn::Ty => "Ty",
            HtrColumn::Tz => "Tz",
            HtrColumn::Rx => "Rx",
            HtrColumn::Ry => "Ry",
            HtrColumn::Rz => "Rz",
        }
    }

    /// Spatial axis of the column (0=X, 1=Y, 2=Z).
    pub fn axis_index(self) -> usize {
        match self {
            HtrColumn::Tx | HtrColumn::Rx => 0,
            HtrColumn::Ty | HtrColumn::Ry => 1,
            HtrColumn::Tz | HtrColumn::Rz => 2,
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, HtrColumn::Rx | HtrColumn::Ry | HtrColumn::Rz)
    }
}

impl fmt::Display for HtrColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which HTR columns to keep, from the `(rotation, translation)` flag pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    rotation: bool,
    translation: bool,
}

impl ColumnSelection {
    /// Fails with a configuration error when neither rotation nor translation is requested.
    pub fn new(rotation: bool, translation: bool) -> Result<Self> {
        if !rotation && !translation {
            return Err(IngestError::Configuration(
                "at least one of rotation or translation must be selected".to_string(),
            ));
        }
        Ok(Self { rotation, translation })
    }

    /// Selected columns in record order (translations before rotations).
    pub fn columns(&self) -> &'static [HtrColumn] {
        match (self.rotation, self.translation) {
            (true, true) => &TRANSLATION_AND_ROTATION,
            (true, false) => &ROTATION_ONLY,
            // new() rejects (false, false)
            _ => &TRANSLATION_ONLY,
        }
    }

    pub fn rotation(&self) -> bool {
        self.rotation
    }

    pub fn translation(&self) -> bool {
        self.translation
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            rotation: true,
            translation: false,
        }
    }
}

/// Body segment key. Block labels such as `R.Thigh` normalize to `R_Thigh`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentName {
    RThigh,
    LThigh,
    RShank,
    LShank,
    LFoot,
    RFoot,
    /// Any other block label, already normalized.
    Other(String),
}

impl SegmentName {
    /// The six lower-limb segments read by default.
    pub fn lower_limb() -> [SegmentName; 6] {
        [
            SegmentName::RThigh,
            SegmentName::LThigh,
            SegmentName::RShank,
            SegmentName::LShank,
            SegmentName::LFoot,
            SegmentName::RFoot,
        ]
    }

    /// Builds the key from a raw block label: trimmed, dots replaced by underscores.
    pub fn from_block_label(label: &str) -> Self {
        Self::from_normalized(&label.trim().replace('.', "_"))
    }

    /// Looks up an already normalized name (`R_Thigh`).
    pub fn from_normalized(name: &str) -> Self {
        match name {
            "R_Thigh" => SegmentName::RThigh,
            "L_Thigh" => SegmentName::LThigh,
            "R_Shank" => SegmentName::RShank,
            "L_Shank" => SegmentName::LShank,
            "L_Foot" => SegmentName::LFoot,
            "R_Foot" => SegmentName::RFoot,
            other => SegmentName::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SegmentName::RThigh => "R_Thigh",
            SegmentName::LThigh => "L_Thigh",
            SegmentName::RShank => "R_Shank",
            SegmentName::LShank => "L_Shank",
            SegmentName::LFoot => "L_Foot",
            SegmentName::RFoot => "R_Foot",
            SegmentName::Other(name) => name,
        }
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame of one segment: the selected columns in selection order.
/// Cells that failed to parse hold `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    columns: &'static [HtrColumn],
    values: Vec<f64>,
}

impl SegmentRecord {
    pub(crate) fn new(columns: &'static [HtrColumn], values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Value of a column, `None` only when the column was not selected.
    pub fn get(&self, column: HtrColumn) -> Option<f64> {
        self.columns
            .iter()
            .position(|&c| c == column)
            .and_then(|i| self.values.get(i).copied())
    }

    pub fn columns(&self) -> &'static [HtrColumn] {
        self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn has_nan(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }
}

/// All frames of one segment, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSeries {
    columns: &'static [HtrColumn],
    records: Vec<SegmentRecord>,
}

impl SegmentSeries {
    pub(crate) fn new(columns: &'static [HtrColumn], records: Vec<SegmentRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &'static [HtrColumn] {
        self.columns
    }

    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Frame × column matrix of the series.
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.records.len(), self.columns.len()), |(frame, col)| {
            self.records[frame].values[col]
        })
    }

    /// Rebuilds a series from a frame × column matrix laid out like `to_array`.
    /// Returns `None` when the matrix width does not match `columns`.
    pub(crate) fn from_array(columns: &'static [HtrColumn], array: &Array2<f64>) -> Option<Self> {
        if array.ncols() != columns.len() {
            return None;
        }
        let records = array
            .rows()
            .into_iter()
            .map(|row| SegmentRecord::new(columns, row.to_vec()))
            .collect();
        Some(Self { columns, records })
    }
}

/// Result of reading an HTR file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtrData {
    pub selection: ColumnSelection,
    pub segments: SegmentMap,
}

impl HtrData {
    pub fn get(&self, segment: &SegmentName) -> Option<&SegmentSeries> {
        self.segments.get(segment)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Longest series length, used to size frame-aligned exports.
    pub fn max_frames(&self) -> usize {
        self.segments.values().map(SegmentSeries::len).max().unwrap_or(0)
    }
}


// src/data_input/htr_data.rs
