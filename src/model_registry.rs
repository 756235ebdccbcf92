// src/model_registry.rs
//
// Marker-placement models known to the reader.
// Each model maps anatomical markers to the X/Y/Z columns of the TRC header and carries the
// per-segment sign factors that bring the rig's axis convention in line with the analysis one.
// The tables are fixed at build time and never change at runtime.

use std::fmt;

use crate::data_input::htr_data::SegmentName;
use crate::types::{ColumnTriple, SignVector};

/// Identifier of a registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelId {
    Cgm23,
    ElenHayes,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Cgm23, ModelId::ElenHayes];

    /// Registry key, as passed by callers and sent to the analysis process.
    pub fn name(self) -> &'static str {
        match self {
            ModelId::Cgm23 => "cgm23",
            ModelId::ElenHayes => "elenhayes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ModelId::ALL.into_iter().find(|id| id.name() == name)
    }

    pub fn model(self) -> &'static BiomechanicalModel {
        match self {
            ModelId::Cgm23 => &CGM23,
            ModelId::ElenHayes => &ELEN_HAYES,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anatomical marker label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerLabel {
    Rheel,
    Rtoe,
    Lheel,
    Ltoe,
    Pelvis,
    RankleJC,
    LankleJC,
    /// Label outside the built-in set.
    Other(String),
}

impl MarkerLabel {
    pub fn as_str(&self) -> &str {
        match self {
            MarkerLabel::Rheel => "Rheel",
            MarkerLabel::Rtoe => "Rtoe",
            MarkerLabel::Lheel => "Lheel",
            MarkerLabel::Ltoe => "Ltoe",
            MarkerLabel::Pelvis => "pelvis",
            MarkerLabel::RankleJC => "RankleJC",
            MarkerLabel::LankleJC => "LankleJC",
            MarkerLabel::Other(label) => label,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Rheel" => MarkerLabel::Rheel,
            "Rtoe" => MarkerLabel::Rtoe,
            "Lheel" => MarkerLabel::Lheel,
            "Ltoe" => MarkerLabel::Ltoe,
            "pelvis" => MarkerLabel::Pelvis,
            "RankleJC" => MarkerLabel::RankleJC,
            "LankleJC" => MarkerLabel::LankleJC,
            other => MarkerLabel::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MarkerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// X/Y/Z header columns of one marker, in post-disambiguation names.
#[derive(Debug)]
pub struct MarkerColumns {
    pub label: MarkerLabel,
    pub columns: ColumnTriple,
}

/// Sign factors applied to one segment's X/Y/Z components.
#[derive(Debug)]
pub struct SegmentCorrection {
    pub segment: SegmentName,
    pub factor: SignVector,
}

/// A named marker-placement convention.
#[derive(Debug)]
pub struct BiomechanicalModel {
    pub id: ModelId,
    pub markers: &'static [MarkerColumns],
    pub corrections: &'static [SegmentCorrection],
}

impl BiomechanicalModel {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn marker_columns(&self, label: &MarkerLabel) -> Option<ColumnTriple> {
        self.markers.iter().find(|m| &m.label == label).map(|m| m.columns)
    }

    pub fn correction_factor(&self, segment: &SegmentName) -> Option<SignVector> {
        self.corrections
            .iter()
            .find(|c| &c.segment == segment)
            .map(|c| c.factor)
    }

    pub fn marker_labels(&self) -> impl Iterator<Item = &MarkerLabel> {
        self.markers.iter().map(|m| &m.label)
    }
}

/// Looks a model up by registry key (`"cgm23"`, `"elenhayes"`).
pub fn lookup_model(name: &str) -> Option<&'static BiomechanicalModel> {
    ModelId::from_name(name).map(ModelId::model)
}

/// All registered models.
pub fn registered_models() -> [&'static BiomechanicalModel; 2] {
    [&CGM23, &ELEN_HAYES]
}

static CGM23_MARKERS: [MarkerColumns; 7] = [
    MarkerColumns { label: MarkerLabel::Rheel, columns: ["X23", "Y23", "Z23"] },
    MarkerColumns { label: MarkerLabel::Rtoe, columns: ["X24", "Y24", "Z24"] },
    MarkerColumns { label: MarkerLabel::Lheel, columns: ["X13", "Y13", "Z13"] },
    MarkerColumns { label: MarkerLabel::Ltoe, columns: ["X14", "Y14", "Z14"] },
    MarkerColumns { label: MarkerLabel::Pelvis, columns: ["X3.1", "Y3.1", "Z3.1"] },
    MarkerColumns { label: MarkerLabel::RankleJC, columns: ["X8.1", "Y8.1", "Z8.1"] },
    MarkerColumns { label: MarkerLabel::LankleJC, columns: ["X9.1", "Y9.1", "Z9.1"] },
];

static CGM23_CORRECTIONS: [SegmentCorrection; 6] = [
    SegmentCorrection { segment: SegmentName::RThigh, factor: [-1.0, -1.0, 1.0] },
    SegmentCorrection { segment: SegmentName::LThigh, factor: [-1.0, 1.0, -1.0] },
    SegmentCorrection { segment: SegmentName::RShank, factor: [1.0, -1.0, 1.0] },
    SegmentCorrection { segment: SegmentName::LShank, factor: [1.0, 1.0, -1.0] },
    SegmentCorrection { segment: SegmentName::RFoot, factor: [-1.0, -1.0, -1.0] },
    SegmentCorrection { segment: SegmentName::LFoot, factor: [-1.0, 1.0, 1.0] },
];

static ELEN_HAYES_MARKERS: [MarkerColumns; 7] = [
    MarkerColumns { label: MarkerLabel::Rheel, columns: ["X8", "Y8", "Z8"] },
    MarkerColumns { label: MarkerLabel::Rtoe, columns: ["X9", "Y9", "Z9"] },
    MarkerColumns { label: MarkerLabel::Lheel, columns: ["X14", "Y14", "Z14"] },
    MarkerColumns { label: MarkerLabel::Ltoe, columns: ["X15", "Y15", "Z15"] },
    MarkerColumns { label: MarkerLabel::Pelvis, columns: ["X2.1", "Y2.1", "Z2.1"] },
    MarkerColumns { label: MarkerLabel::RankleJC, columns: ["X7.1", "Y7.1", "Z7.1"] },
    MarkerColumns { label: MarkerLabel::LankleJC, columns: ["X8.1", "Y8.1", "Z8.1"] },
];

static ELEN_HAYES_CORRECTIONS: [SegmentCorrection; 6] = [
    SegmentCorrection { segment: SegmentName::RThigh, factor: [-1.0, -1.0, 1.0] },
    SegmentCorrection { segment: SegmentName::LThigh, factor: [-1.0, 1.0, 1.0] },
    SegmentCorrection { segment: SegmentName::RShank, factor: [1.0, -1.0, 1.0] },
    SegmentCorrection { segment: SegmentName::LShank, factor: [1.0, 1.0, -1.0] },
    SegmentCorrection { segment: SegmentName::RFoot, factor: [-1.0, -1.0, -1.0] },
    SegmentCorrection { segment: SegmentName::LFoot, factor: [-1.0, 1.0, 1.0] },
];

static CGM23: BiomechanicalModel = BiomechanicalModel {
    id: ModelId::Cgm23,
    markers: &CGM23_MARKERS,
    corrections: &CGM23_CORRECTIONS,
};

static ELEN_HAYES: BiomechanicalModel = BiomechanicalModel {
    id: ModelId::ElenHayes,
    markers: &ELEN_HAYES_MARKERS,
    corrections: &ELEN_HAYES_CORRECTIONS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup_model("cgm23").map(|m| m.id), Some(ModelId::Cgm23));
        assert_eq!(lookup_model("elenhayes").map(|m| m.id), Some(ModelId::ElenHayes));
        assert!(lookup_model("plug-in-gait").is_none());
        assert!(lookup_model("CGM23").is_none());
    }

    #[test]
    fn test_every_model_is_complete() {
        for model in registered_models() {
            let labels: HashSet<&MarkerLabel> = model.marker_labels().collect();
            assert_eq!(labels.len(), 7, "{} has duplicate markers", model.name());
            for segment in SegmentName::lower_limb() {
                let factor = model.correction_factor(&segment).unwrap();
                assert!(factor.iter().all(|f| f.abs() == 1.0));
            }
        }
    }

    #[test]
    fn test_marker_columns() {
        let model = ModelId::ElenHayes.model();
        assert_eq!(model.marker_columns(&MarkerLabel::Rheel), Some(["X8", "Y8", "Z8"]));
        assert_eq!(model.marker_columns(&MarkerLabel::Pelvis), Some(["X2.1", "Y2.1", "Z2.1"]));
        assert_eq!(model.marker_columns(&MarkerLabel::Other("Rknee".to_string())), None);
    }

    #[test]
    fn test_marker_label_round_trip_names() {
        assert_eq!(MarkerLabel::from_name("pelvis"), MarkerLabel::Pelvis);
        assert_eq!(MarkerLabel::Pelvis.to_string(), "pelvis");
        assert_eq!(MarkerLabel::from_name("Rknee"), MarkerLabel::Other("Rknee".to_string()));
    }

    #[test]
    fn test_correction_differs_between_models() {
        assert_eq!(ModelId::Cgm23.model().correction_factor(&SegmentName::LThigh), Some([-1.0, 1.0, -1.0]));
        assert_eq!(ModelId::ElenHayes.model().correction_factor(&SegmentName::LThigh), Some([-1.0, 1.0, 1.0]));
    }
}

// src/model_registry.rs
