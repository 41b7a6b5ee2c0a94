//! 命名チェックの統合テスト
//!
//! 一時フォルダにmappingsと収録フォルダを作って突き合わせる

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use voicekit::checker::{self, AnalysisRequest};
use voicekit::error::VoiceKitError;
use voicekit::report;
use voicekit_common::{
    CategoryCombination, CategoryKey, CategoryStatus, LayoutMode, MappingKind,
};

const NAME_FILES: [&str; 7] = [
    "1-SYL", "2-SYL_001", "2-SYL_002", "2-SYL_003", "2-SYL_004", "3-SYL", "4-SYL",
];

/// 全マッピングファイルを作る（名前は1-SYLだけ中身あり）
fn write_mappings(dir: &Path) {
    for stem in NAME_FILES {
        fs::write(dir.join(format!("{}.txt", stem)), "").unwrap();
    }
    fs::write(dir.join("1-SYL.txt"), "one\ntwo\nthree\nREMOVE_old\n\n").unwrap();

    for n in 1..=4 {
        fs::write(dir.join(format!("{}_NUM_ORD.txt", n)), "first\nsecond\n").unwrap();
        fs::write(dir.join(format!("{}_NUM_CAR.txt", n)), "").unwrap();
    }
    fs::write(dir.join("1_NUM_CAR.txt"), "uno\ndos\ntres\n").unwrap();
}

fn syllable(count: u8) -> CategoryKey {
    CategoryKey::Syllable { count, part: None }
}

#[test]
fn test_flat_check_reports_missing() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    fs::write(takes.path().join("001_one.wav"), b"").unwrap();
    fs::write(takes.path().join("002_two.wav"), b"").unwrap();

    let request = AnalysisRequest {
        folder: takes.path().to_path_buf(),
        kinds: vec![MappingKind::Names],
        layout: LayoutMode::Flat,
    };
    let report = checker::run_check(&request, mappings.path()).unwrap();

    let first = report
        .categories
        .iter()
        .find(|c| c.category == syllable(1))
        .unwrap();
    assert_eq!(first.status, CategoryStatus::Missing(vec!["three".into()]));
    assert_eq!(first.matched, 2);

    let text = report::render_reconciliation(&report);
    assert!(text.contains("Analysis for reference: 1-SYL\n  Missing files:\n    three\n"));
    assert!(text.contains("Analysis for reference: 3-SYL\n  All files listed are present.\n"));
}

#[test]
fn test_check_is_idempotent() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    fs::write(takes.path().join("003_two.wav"), b"").unwrap();

    let request = AnalysisRequest {
        folder: takes.path().to_path_buf(),
        kinds: vec![MappingKind::Names, MappingKind::Cardinal],
        layout: LayoutMode::Flat,
    };
    let first = checker::run_check(&request, mappings.path()).unwrap();
    let second = checker::run_check(&request, mappings.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_subfolder_check_missing_subfolder() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    let sub = takes.path().join("1-SYL");
    fs::create_dir(&sub).unwrap();
    for name in ["001_one.wav", "002_two.wav", "003_three.wav"] {
        fs::write(sub.join(name), b"").unwrap();
    }

    let request = AnalysisRequest {
        folder: takes.path().to_path_buf(),
        kinds: vec![MappingKind::Names, MappingKind::Ordinal],
        layout: LayoutMode::Subfolders,
    };
    let report = checker::run_check(&request, mappings.path()).unwrap();

    let one = report.categories.iter().find(|c| c.category == syllable(1)).unwrap();
    assert_eq!(one.status, CategoryStatus::AllPresent);

    let numerals = report
        .categories
        .iter()
        .find(|c| c.category == CategoryKey::Numeral { count: 2 })
        .unwrap();
    assert_eq!(numerals.status, CategoryStatus::MissingSubfolder);

    let text = report::render_reconciliation(&report);
    assert!(text.contains("Analysis for subfolder: 1-SYL\n  All files listed are present.\n"));
    assert!(text.contains("Missing subfolder for: 2-SYL_NUM"));
}

#[test]
fn test_missing_mapping_file_aborts_before_scan() {
    let mappings = tempdir().unwrap();
    fs::write(mappings.path().join("1-SYL.txt"), "one\n").unwrap();

    let request = AnalysisRequest {
        folder: Path::new("/nonexistent/voicekit/takes").to_path_buf(),
        kinds: vec![MappingKind::Names],
        layout: LayoutMode::Flat,
    };
    let err = checker::run_check(&request, mappings.path()).unwrap_err();
    assert!(matches!(err, VoiceKitError::Common(_)));
}

#[test]
fn test_missing_target_folder() {
    let mappings = tempdir().unwrap();
    write_mappings(mappings.path());

    let request = AnalysisRequest {
        folder: mappings.path().join("no-such-folder"),
        kinds: vec![MappingKind::Names],
        layout: LayoutMode::Flat,
    };
    let err = checker::run_check(&request, mappings.path()).unwrap_err();
    assert!(matches!(err, VoiceKitError::FolderNotFound(_)));
}

#[test]
fn test_auto_picks_names_with_cardinal() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    for name in ["001_one.wav", "002_two.wav", "003_uno.wav", "004_dos.wav", "005_tres.wav"] {
        fs::write(takes.path().join(name), b"").unwrap();
    }

    let analysis = checker::run_auto(takes.path(), mappings.path()).unwrap();
    let best = analysis.selection.best.as_ref().unwrap();

    assert_eq!(best.combination, CategoryCombination::NamesCardinal);
    assert_eq!(best.layout, LayoutMode::Flat);
    assert_eq!(best.matches, 5);
    assert_eq!(analysis.selection.scores.len(), 5);

    let report = analysis.report.unwrap();
    assert_eq!(report.layout, LayoutMode::Flat);
    assert_eq!(report.total_matched(), 5);
}

#[test]
fn test_auto_uses_subfolders_when_present() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    let sub = takes.path().join("1-SYL_NUM");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("001_first.wav"), b"").unwrap();
    fs::write(sub.join("002_second.wav"), b"").unwrap();

    let analysis = checker::run_auto(takes.path(), mappings.path()).unwrap();
    let best = analysis.selection.best.unwrap();

    assert_eq!(best.combination, CategoryCombination::Ordinal);
    assert_eq!(best.layout, LayoutMode::Subfolders);
    assert_eq!(best.matches, 2);
}

#[test]
fn test_auto_no_suitable_mapping() {
    let mappings = tempdir().unwrap();
    let takes = tempdir().unwrap();
    write_mappings(mappings.path());
    fs::write(takes.path().join("001_unrelated.wav"), b"").unwrap();

    let analysis = checker::run_auto(takes.path(), mappings.path()).unwrap();
    assert!(analysis.selection.best.is_none());
    assert!(analysis.report.is_none());
}
