// tests/marker_set_test.rs

use htr_trc_ingest::{marker_set, parse_trc_str, MarkerLabel, ModelId, TrcData};

/// TRC text whose label line is `labels`, with `frames` rows of increasing values.
fn trc_from_labels(labels: &[String], frames: usize) -> TrcData {
    let mut lines = vec![
        "PathFileType\t4\t(X/Y/Z)\ttrial.trc".to_string(),
        "DataRate\tCameraRate\tNumFrames".to_string(),
        format!("100\t100\t{}", frames),
        "Frame#\tTime".to_string(),
        labels.join("\t"),
    ];
    for frame in 0..frames {
        let mut cells = vec![(frame + 1).to_string(), format!("{:.2}", frame as f64 / 100.0), "0".to_string()];
        cells.extend((0..labels.len()).map(|i| (i + frame * 1000).to_string()));
        lines.push(cells.join("\t"));
    }
    parse_trc_str(&lines.join("\n")).unwrap()
}

fn labels_for(markers: std::ops::RangeInclusive<usize>, skip: &str) -> Vec<String> {
    markers
        .flat_map(|i| ["X", "Y", "Z"].map(|axis| format!("{}{}", axis, i)))
        .filter(|label| label != skip)
        .collect()
}

#[test]
fn test_missing_column_empties_only_that_marker() {
    // Two marker blocks as exported by the rig, both lacking X8
    let mut labels = labels_for(1..=15, "X8");
    labels.extend(labels_for(1..=9, "X8"));
    let trc = trc_from_labels(&labels, 5);

    let set = marker_set("elenhayes", &trc);
    assert_eq!(set.len(), 7);
    assert_eq!(set.get(&MarkerLabel::Rheel).map(<[_]>::len), Some(0));
    // X8.1 cannot exist without a second X8
    assert_eq!(set.get(&MarkerLabel::LankleJC).map(<[_]>::len), Some(0));

    for label in [
        MarkerLabel::Rtoe,
        MarkerLabel::Lheel,
        MarkerLabel::Ltoe,
        MarkerLabel::Pelvis,
        MarkerLabel::RankleJC,
    ] {
        let trajectory = set.get(&label).unwrap();
        assert_eq!(trajectory.len(), trc.frame_count(), "{}", label);
        assert!(trajectory.iter().all(|s| s.is_complete()), "{}", label);
    }
}

#[test]
fn test_values_come_from_disambiguated_columns() {
    let mut labels = labels_for(1..=24, "");
    labels.extend(labels_for(1..=9, ""));
    let trc = trc_from_labels(&labels, 3);

    let set = marker_set(ModelId::Cgm23.name(), &trc);
    assert!(set.iter().all(|(_, t)| t.len() == 3));

    // pelvis -> X3.1, the 3rd marker of the second block
    let pelvis = set.get(&MarkerLabel::Pelvis).unwrap();
    let x_pos = trc.header.position("X3.1").unwrap();
    assert_eq!(pelvis[2].x, trc.rows[2].at(x_pos).flatten());
    assert_eq!(pelvis[2].x, Some(((x_pos - 3) + 2000) as f64));
}

#[test]
fn test_unknown_model_yields_nothing() {
    let trc = trc_from_labels(&labels_for(1..=24, ""), 2);
    let set = marker_set("plug-in-gait", &trc);
    assert!(set.is_empty());
    assert!(set.get(&MarkerLabel::Rheel).is_none());
}

#[test]
fn test_no_rows_gives_empty_but_present_markers() {
    let trc = trc_from_labels(&labels_for(1..=24, ""), 0);
    let set = marker_set("cgm23", &trc);
    assert_eq!(set.len(), 7);
    assert_eq!(set.get(&MarkerLabel::Rheel).map(<[_]>::len), Some(0));
    assert!(!set.has_usable_markers());
}
