// src/correction.rs

use ndarray::Array1;
use tracing::{debug, warn};

use crate::data_input::htr_data::{HtrData, SegmentSeries};
use crate::model_registry::BiomechanicalModel;
use crate::types::{SegmentMap, SignVector};

/// Applies the model's per-segment sign factors to every selected HTR column.
///
/// `Tx`/`Rx` take the X factor, `Ty`/`Ry` the Y factor and `Tz`/`Rz` the Z factor.
/// Segments the model has no factor for are returned unchanged. NaN cells stay NaN.
pub fn apply_correction(htr: &HtrData, model: &BiomechanicalModel) -> HtrData {
    let segments: SegmentMap = htr
        .segments
        .iter()
        .map(|(name, series)| {
            let corrected = match model.correction_factor(name) {
                Some(factor) => {
                    debug!("Correcting '{}' with {:?} ({})", name, factor, model.name());
                    correct_series(series, &factor)
                }
                None => {
                    warn!("No correction factor for segment '{}' in model '{}'", name, model.name());
                    series.clone()
                }
            };
            (name.clone(), corrected)
        })
        .collect();

    HtrData {
        selection: htr.selection,
        segments,
    }
}

/// Multiplies each column of the series by the factor of its axis.
pub fn correct_series(series: &SegmentSeries, factor: &SignVector) -> SegmentSeries {
    let columns = series.columns();
    let column_factors: Array1<f64> = columns.iter().map(|c| factor[c.axis_index()]).collect();
    let corrected = &series.to_array() * &column_factors;
    SegmentSeries::from_array(columns, &corrected).unwrap_or_else(|| series.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::htr_data::{ColumnSelection, HtrColumn, SegmentName};
    use crate::data_input::htr_parser::parse_htr_str;
    use crate::model_registry::ModelId;

    fn htr_content() -> String {
        [
            "[SegmentNames&Hierarchy]",
            "R.Thigh GLOBAL",
            "Trunk GLOBAL",
            "[BasePosition]",
            "R.Thigh 0 0 0",
            "Trunk 0 0 0",
            "[R.Thigh]",
            "#Fr Tx Ty Tz Rx Ry Rz",
            "1 1 2 3 10 20 30",
            "2 1 2 3 bad 20 30",
            "[Trunk]",
            "#Fr Tx Ty Tz Rx Ry Rz",
            "1 1 2 3 10 20 30",
        ]
        .join("\n")
    }

    #[test]
    fn test_signs_follow_axes() {
        let htr = parse_htr_str(&htr_content(), &["R.Thigh", "Trunk"], ColumnSelection::new(true, true).unwrap());
        let corrected = apply_correction(&htr, ModelId::Cgm23.model());

        // cgm23 R_Thigh: [-1, -1, 1]
        let thigh = corrected.get(&SegmentName::RThigh).unwrap();
        assert_eq!(thigh.records()[0].values(), &[-1.0, -2.0, 3.0, -10.0, -20.0, 30.0]);
        assert!(thigh.records()[1].get(HtrColumn::Rx).unwrap().is_nan());
        assert_eq!(thigh.records()[1].get(HtrColumn::Ry), Some(-20.0));
    }

    #[test]
    fn test_segment_without_factor_is_unchanged() {
        let htr = parse_htr_str(&htr_content(), &["R.Thigh", "Trunk"], ColumnSelection::default());
        let corrected = apply_correction(&htr, ModelId::ElenHayes.model());
        let trunk = SegmentName::Other("Trunk".to_string());
        assert_eq!(corrected.get(&trunk), htr.get(&trunk));
        assert_eq!(corrected.len(), htr.len());
    }
}

// src/correction.rs
