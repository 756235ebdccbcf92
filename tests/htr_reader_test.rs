// tests/htr_reader_test.rs

use std::fs;
use tempfile::TempDir;

use htr_trc_ingest::constants::DEFAULT_HTR_SEGMENTS;
use htr_trc_ingest::{parse_htr_file, HtrColumn, IngestError, SegmentName};

fn segment_block(label: &str, frames: usize) -> String {
    let mut lines = vec![format!("[{}]", label), "#Fr\tTx\tTy\tTz\tRx\tRy\tRz\tSF".to_string()];
    for frame in 1..=frames {
        let f = frame as f64;
        lines.push(format!("{}\t{}\t{}\t{}\t{}\t{}\t{}\t1.0", frame, f, f * 2.0, f * 3.0, f * 10.0, f * 20.0, f * 30.0));
    }
    lines.join("\n")
}

fn preamble(segments: &[&str]) -> String {
    let mut lines = vec![
        "#Created by NOKOV".to_string(),
        "[Header]".to_string(),
        "FileType\thtr".to_string(),
        "[SegmentNames&Hierarchy]".to_string(),
    ];
    lines.extend(segments.iter().map(|s| format!("{}\tGLOBAL", s)));
    lines.push("[BasePosition]".to_string());
    lines.extend(segments.iter().map(|s| format!("{}\t0.0\t0.0\t0.0\t0.0\t0.0\t0.0\t1.0", s)));
    lines.join("\n")
}

fn write_htr(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("trial.htr");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_repeated_segment_blocks_give_one_entry() {
    let content = [
        preamble(&["R.Thigh"]),
        segment_block("R.Thigh", 4),
        segment_block("R.Thigh", 4),
        segment_block("R.Thigh", 4),
        "[EndOfFile]".to_string(),
    ]
    .join("\n");
    let dir = TempDir::new().unwrap();
    let path = write_htr(&dir, &content);

    let htr = parse_htr_file(&path, &["R.Thigh"], true, false).unwrap();
    assert_eq!(htr.len(), 1);
    let thigh = htr.get(&SegmentName::RThigh).unwrap();
    assert_eq!(thigh.len(), 4);
    assert_eq!(thigh.columns(), &[HtrColumn::Rx, HtrColumn::Ry, HtrColumn::Rz]);
    assert_eq!(thigh.records()[3].values(), &[40.0, 80.0, 120.0]);
}

#[test]
fn test_last_duplicate_block_wins() {
    let content = [
        preamble(&["R.Thigh"]),
        segment_block("R.Thigh", 2),
        segment_block("R.Thigh", 5),
    ]
    .join("\n");
    let dir = TempDir::new().unwrap();
    let htr = parse_htr_file(&write_htr(&dir, &content), &["R.Thigh"], true, false).unwrap();
    assert_eq!(htr.get(&SegmentName::RThigh).unwrap().len(), 5);
}

#[test]
fn test_no_columns_selected_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let path = write_htr(&dir, &[preamble(&["R.Thigh"]), segment_block("R.Thigh", 3)].join("\n"));
    match parse_htr_file(&path, &["R.Thigh"], false, false) {
        Err(IngestError::Configuration(_)) => {}
        other => panic!("expected a configuration error, got {:?}", other),
    }

    // Checked before the file is touched
    let missing = dir.path().join("missing.htr");
    assert!(matches!(
        parse_htr_file(&missing, &["R.Thigh"], false, false),
        Err(IngestError::Configuration(_))
    ));
}

#[test]
fn test_default_lower_limb_segments() {
    let mut parts = vec![preamble(&DEFAULT_HTR_SEGMENTS)];
    parts.extend(DEFAULT_HTR_SEGMENTS.iter().map(|s| segment_block(s, 3)));
    parts.push(segment_block("Pelvis", 3));
    let dir = TempDir::new().unwrap();
    let path = write_htr(&dir, &parts.join("\n"));

    let htr = parse_htr_file(&path, &DEFAULT_HTR_SEGMENTS, false, true).unwrap();
    assert_eq!(htr.len(), 6);
    for segment in SegmentName::lower_limb() {
        let series = htr.get(&segment).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.records()[0].get(HtrColumn::Ty), Some(2.0));
        assert_eq!(series.records()[0].get(HtrColumn::Rx), None);
    }
    assert!(htr.get(&SegmentName::Other("Pelvis".to_string())).is_none());
}

#[test]
fn test_substring_match_on_decorated_labels() {
    let content = [
        preamble(&["Subject1:R.Thigh"]),
        segment_block("Subject1:R.Thigh", 2),
    ]
    .join("\n");
    let dir = TempDir::new().unwrap();
    let htr = parse_htr_file(&write_htr(&dir, &content), &["R.Thigh"], true, true).unwrap();
    let series = htr.get(&SegmentName::Other("Subject1:R_Thigh".to_string())).unwrap();
    assert_eq!(series.records()[1].values(), &[2.0, 4.0, 6.0, 20.0, 40.0, 60.0]);
}

#[test]
fn test_nan_cells_are_kept() {
    let block = segment_block("L.Foot", 2).replace("2\t2\t4\t6\t20\t40\t60\t1.0", "2\t2\t4\t6\t-\t40\t60\t1.0");
    let content = [preamble(&["L.Foot"]), block].join("\n");
    let dir = TempDir::new().unwrap();
    let htr = parse_htr_file(&write_htr(&dir, &content), &["L.Foot"], true, false).unwrap();
    let record = &htr.get(&SegmentName::LFoot).unwrap().records()[1];
    assert!(record.get(HtrColumn::Rx).unwrap().is_nan());
    assert_eq!(record.get(HtrColumn::Ry), Some(40.0));
}

#[test]
fn test_invalid_utf8_in_header_comment_still_parses() {
    let dir = TempDir::new().unwrap();
    let text = [preamble(&["R.Thigh"]), segment_block("R.Thigh", 3)].join("\n");
    let split = text.find("FileType").unwrap();
    let mut bytes = text[..split].as_bytes().to_vec();
    bytes.extend_from_slice(b"#Angles in \xB0\n");
    bytes.extend_from_slice(text[split..].as_bytes());
    let path = dir.path().join("trial.htr");
    fs::write(&path, bytes).unwrap();

    let htr = parse_htr_file(&path, &["R.Thigh"], true, false).unwrap();
    let series = htr.get(&SegmentName::RThigh).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.records()[2].get(HtrColumn::Rz), Some(90.0));
}

