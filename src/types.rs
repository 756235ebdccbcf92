// src/types.rs
// Type aliases shared by the readers, the marker mapper and the exporters

use crate::axis_names::AXIS_COUNT;
use crate::data_input::htr_data::{SegmentName, SegmentSeries};
use crate::marker_mapper::MarkerSample;
use std::collections::BTreeMap;

// Marker column triples and sign-correction vectors are indexed by axis, so the
// registry tables below only make sense for three spatial axes.
const _: () = assert!(AXIS_COUNT == 3, "AXIS_COUNT must be 3 (X, Y, Z)");

// X, Y, Z column names of one marker in the TRC header.
pub type ColumnTriple = [&'static str; AXIS_COUNT];

// Per-segment sign correction, one factor per axis.
pub type SignVector = [f64; AXIS_COUNT];

// One marker's samples, one entry per TRC row.
pub type Trajectory = Vec<MarkerSample>;

// Parsed HTR segments keyed by normalized segment name.
pub type SegmentMap = BTreeMap<SegmentName, SegmentSeries>;

// src/types.rs
