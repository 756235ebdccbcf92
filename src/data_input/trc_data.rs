// src/data_input/trc_data.rs

use std::collections::HashMap;

use crate::constants::TRC_METADATA_COLUMNS;

/// Metadata columns leading every TRC header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataColumn {
    Frame,
    Time,
    Timestamp,
}

impl MetadataColumn {
    pub fn name(self) -> &'static str {
        match self {
            MetadataColumn::Frame => TRC_METADATA_COLUMNS[0],
            MetadataColumn::Time => TRC_METADATA_COLUMNS[1],
            MetadataColumn::Timestamp => TRC_METADATA_COLUMNS[2],
        }
    }
}

/// Ordered, unique TRC column names with a name → position index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrcHeader {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TrcHeader {
    /// Expects names that are already unique; a repeated name resolves to its first position.
    pub fn new(columns: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            positions.entry(name.clone()).or_insert(idx);
        }
        Self { columns, positions }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One TRC frame: a cell per header column.
/// `None` means the cell was missing or not a number (marker not visible on this frame).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrcRow {
    values: Vec<Option<f64>>,
}

impl TrcRow {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at a header position. Outer `None`: no such column.
    pub fn at(&self, position: usize) -> Option<Option<f64>> {
        self.values.get(position).copied()
    }

    /// Cell of a named column. Outer `None`: the header has no such column.
    pub fn get(&self, header: &TrcHeader, column: &str) -> Option<Option<f64>> {
        header.position(column).and_then(|idx| self.at(idx))
    }
}

/// Parsed TRC file. Row order is file order and defines the frame index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrcData {
    pub header: TrcHeader,
    pub rows: Vec<TrcRow>,
}

impl TrcData {
    pub fn frame_count(&self) -> usize {
        self.rows.len()
    }

    /// Metadata value of a row (frame number, time or timestamp).
    pub fn metadata(&self, row: &TrcRow, column: MetadataColumn) -> Option<f64> {
        row.get(&self.header, column.name()).flatten()
    }

    /// Whole column in row order, `None` when the header has no such column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.header.position(name)?;
        Some(self.rows.iter().map(|row| row.at(idx).flatten()).collect())
    }
}


// src/data_input/trc_data.rs
