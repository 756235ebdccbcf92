// src/marker_mapper.rs

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::data_input::trc_data::{TrcData, TrcRow};
use crate::model_registry::{lookup_model, BiomechanicalModel, MarkerLabel};
use crate::types::Trajectory;

/// Position of one marker on one frame. A coordinate is `None` when the TRC cell was absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarkerSample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl MarkerSample {
    /// Coordinate by axis index (0=X, 1=Y, 2=Z).
    pub fn axis(&self, index: usize) -> Option<f64> {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }
}

/// Named marker trajectories of one session under one model.
///
/// Every marker of the model has an entry; a marker whose columns were not all found in the
/// TRC header maps to an empty trajectory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerSet {
    trajectories: BTreeMap<MarkerLabel, Trajectory>,
}

impl MarkerSet {
    pub fn get(&self, label: &MarkerLabel) -> Option<&[MarkerSample]> {
        self.trajectories.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MarkerLabel, &Trajectory)> {
        self.trajectories.iter()
    }

    /// Number of markers with an entry, populated or not.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn populated(&self) -> impl Iterator<Item = (&MarkerLabel, &Trajectory)> {
        self.trajectories.iter().filter(|(_, t)| !t.is_empty())
    }

    pub fn empty_markers(&self) -> Vec<&MarkerLabel> {
        self.trajectories
            .iter()
            .filter(|(_, t)| t.is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    /// False when no marker could be resolved at all.
    pub fn has_usable_markers(&self) -> bool {
        self.populated().next().is_some()
    }
}

/// Builds the marker set for a model given by registry key.
///
/// An unknown model yields an empty set; the caller decides whether to retry with a
/// fallback model.
pub fn marker_set(model_name: &str, trc: &TrcData) -> MarkerSet {
    match lookup_model(model_name) {
        Some(model) => map_markers(model, trc),
        None => {
            warn!("Unknown model '{}', no markers mapped", model_name);
            MarkerSet::default()
        }
    }
}

/// Resolves every marker of `model` against the TRC header by exact column name.
pub fn map_markers(model: &BiomechanicalModel, trc: &TrcData) -> MarkerSet {
    info!(
        "Mapping {} marker(s) of model '{}' over {} TRC column(s)",
        model.markers.len(),
        model.name(),
        trc.header.len()
    );

    let mut trajectories: BTreeMap<MarkerLabel, Trajectory> = BTreeMap::new();
    for marker in model.markers {
        let [col_x, col_y, col_z] = marker.columns;
        let positions = (
            trc.header.position(col_x),
            trc.header.position(col_y),
            trc.header.position(col_z),
        );

        let trajectory: Trajectory = match positions {
            (Some(ix), Some(iy), Some(iz)) => {
                debug!("Marker '{}': columns {:?} at {:?}", marker.label, marker.columns, (ix, iy, iz));
                trc.rows.iter().map(|row| sample_at(row, ix, iy, iz)).collect()
            }
            _ => {
                warn!(
                    "Columns {:?} not found for marker '{}', marker left empty",
                    marker.columns, marker.label
                );
                debug!("Similar TRC columns: {:?}", similar_columns(trc, &marker.columns));
                Vec::new()
            }
        };
        trajectories.insert(marker.label.clone(), trajectory);
    }

    let set = MarkerSet { trajectories };
    if !set.has_usable_markers() {
        warn!("Parse produced no usable markers for model '{}'", model.name());
    }
    set
}

fn sample_at(row: &TrcRow, ix: usize, iy: usize, iz: usize) -> MarkerSample {
    MarkerSample {
        x: row.at(ix).flatten(),
        y: row.at(iy).flatten(),
        z: row.at(iz).flatten(),
    }
}

// Header columns sharing the letter prefix of any expected column (diagnostics only).
fn similar_columns<'a>(trc: &'a TrcData, expected: &[&str]) -> Vec<&'a str> {
    let prefixes: Vec<String> = expected
        .iter()
        .map(|column| column.chars().filter(|c| !c.is_ascii_digit()).collect::<String>())
        .map(|prefix| prefix.trim_end_matches('.').to_string())
        .collect();
    trc.header
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|column| prefixes.iter().any(|prefix| !prefix.is_empty() && column.starts_with(prefix.as_str())))
        .take(12)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::trc_parser::build_header;
    use crate::model_registry::ModelId;

    fn trc_with(labels: &[&str], rows: Vec<Vec<Option<f64>>>) -> TrcData {
        TrcData {
            header: build_header(labels),
            rows: rows.into_iter().map(TrcRow::new).collect(),
        }
    }

    #[test]
    fn test_unknown_model_gives_empty_set() {
        let trc = trc_with(&["X8", "Y8", "Z8"], vec![vec![Some(1.0); 6]]);
        let set = marker_set("unknown", &trc);
        assert!(set.is_empty());
        assert!(!set.has_usable_markers());
    }

    #[test]
    fn test_marker_resolved_and_absence_propagates() {
        let trc = trc_with(
            &["X8", "Y8", "Z8"],
            vec![
                vec![Some(1.0), Some(0.0), Some(0.0), Some(10.0), Some(11.0), Some(12.0)],
                vec![Some(2.0), Some(0.01), Some(0.01), Some(13.0), None, Some(15.0)],
            ],
        );
        let set = map_markers(ModelId::ElenHayes.model(), &trc);
        assert_eq!(set.len(), 7);
        let heel = set.get(&MarkerLabel::Rheel).unwrap();
        assert_eq!(heel.len(), 2);
        assert_eq!(heel[0], MarkerSample { x: Some(10.0), y: Some(11.0), z: Some(12.0) });
        assert_eq!(heel[1].y, None);
        assert!(!heel[1].is_complete());
        assert_eq!(set.empty_markers().len(), 6);
    }

    #[test]
    fn test_sample_axis_index() {
        let sample = MarkerSample { x: Some(1.0), y: None, z: Some(3.0) };
        assert_eq!(sample.axis(0), Some(1.0));
        assert_eq!(sample.axis(1), None);
        assert_eq!(sample.axis(2), Some(3.0));
        assert_eq!(sample.axis(3), None);
    }

    #[test]
    fn test_similar_columns_diagnostic() {
        let trc = trc_with(&["X1", "Y1", "Z1", "A1"], vec![]);
        let similar = similar_columns(&trc, &["X8", "Y8", "Z8"]);
        assert_eq!(similar, ["X1", "Y1", "Z1"]);
    }
}

// src/marker_mapper.rs
