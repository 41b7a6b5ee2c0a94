//! 補正表によるファイル名の一括修正
//!
//! 補正表はCSV（`csv`）またはスプレッドシート（`calamine`）から読み込む。
//! 列名は `Present Titles` / `Correct Titles`。

use crate::error::{Result, VoiceKitError};
use crate::scanner;
use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use voicekit_common::CorrectionTable;

pub const PRESENT_COLUMN: &str = "Present Titles";
pub const CORRECT_COLUMN: &str = "Correct Titles";

/// 名前修正の対象拡張子（大文字小文字を区別する）
const RENAME_EXTENSIONS: &[&str] = &[".wav", ".mp3", ".flac"];

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 1ファイル分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: String, to: String },
    Failed { file: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct RenameSummary {
    pub outcomes: Vec<RenameOutcome>,
}

impl RenameSummary {
    pub fn renamed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RenameOutcome::Renamed { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.renamed_count()
    }
}

/// 補正表を読み込む（拡張子でCSV/スプレッドシートを判定）
pub fn load_correction_table(path: &Path, sheet: Option<&str>) -> Result<CorrectionTable> {
    if !path.is_file() {
        return Err(VoiceKitError::FileNotFound(path.display().to_string()));
    }

    let is_spreadsheet = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false);

    let table = if is_spreadsheet {
        load_spreadsheet(path, sheet)?
    } else {
        load_csv(path)?
    };

    tracing::debug!("loaded {} corrections from {}", table.len(), path.display());
    Ok(table)
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| VoiceKitError::CorrectionTable(format!("column '{}' not found", name)))
}

fn load_csv(path: &Path) -> Result<CorrectionTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let present_idx = column_index(&headers, PRESENT_COLUMN)?;
    let correct_idx = column_index(&headers, CORRECT_COLUMN)?;

    let mut table = CorrectionTable::default();
    for record in reader.records() {
        let record = record?;
        let present = record.get(present_idx).unwrap_or_default();
        let correct = record.get(correct_idx).unwrap_or_default();
        table.insert(present, correct);
    }

    Ok(table)
}

fn load_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<CorrectionTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| VoiceKitError::CorrectionTable(format!("could not open {}: {}", path.display(), e)))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| VoiceKitError::CorrectionTable(format!("sheet '{}': {}", name, e)))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| VoiceKitError::CorrectionTable("workbook has no sheets".into()))?
            .map_err(|e| VoiceKitError::CorrectionTable(e.to_string()))?,
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let present_idx = column_index(&headers, PRESENT_COLUMN)?;
    let correct_idx = column_index(&headers, CORRECT_COLUMN)?;

    let mut table = CorrectionTable::default();
    for row in rows {
        let present = row.get(present_idx).map(|c| c.to_string()).unwrap_or_default();
        let correct = row.get(correct_idx).map(|c| c.to_string()).unwrap_or_default();
        table.insert(&present, &correct);
    }

    Ok(table)
}

fn is_rename_candidate(file_name: &str) -> bool {
    RENAME_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// フォルダ内の音声ファイルを補正表に従って名前変更する
///
/// 1件の失敗で全体は止めず、既に行った変更も戻さない。既存ファイルは上書きしない。
pub fn rename_files(folder: &Path, table: &CorrectionTable, dry_run: bool) -> Result<RenameSummary> {
    let mut summary = RenameSummary::default();

    for file in scanner::list_files(folder)? {
        if !is_rename_candidate(&file.file_name) {
            continue;
        }

        let Some(new_name) = table.corrected_file_name(&file.file_name) else {
            continue;
        };
        if new_name == file.file_name {
            continue;
        }

        let new_path = folder.join(&new_name);
        let result = if new_path.exists() {
            Err(VoiceKitError::TargetExists(new_name.clone()))
        } else if dry_run {
            Ok(())
        } else {
            std::fs::rename(&file.path, &new_path).map_err(VoiceKitError::from)
        };

        match result {
            Ok(()) => {
                tracing::info!("renamed {} -> {}", file.file_name, new_name);
                summary.outcomes.push(RenameOutcome::Renamed {
                    from: file.file_name,
                    to: new_name,
                });
            }
            Err(e) => {
                tracing::warn!("rename failed for {}: {}", file.file_name, e);
                summary.outcomes.push(RenameOutcome::Failed {
                    file: file.file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_csv_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(
            &path,
            "Correct Titles,Present Titles,Notes\n_newname,_oldname,typo\n_Zoe,_zoe ,case\n",
        )
        .unwrap();

        let table = load_correction_table(&path, None).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].present, "_oldname");
        assert_eq!(table.entries()[1].present, "_zoe");
    }

    #[test]
    fn test_missing_column_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "Present,Correct\n_a,_b\n").unwrap();

        let err = load_correction_table(&path, None).unwrap_err();
        assert!(matches!(err, VoiceKitError::CorrectionTable(_)));
    }

    #[test]
    fn test_missing_table_file() {
        let err = load_correction_table(Path::new("/nonexistent/table.csv"), None).unwrap_err();
        assert!(matches!(err, VoiceKitError::FileNotFound(_)));
    }

    #[test]
    fn test_rename_candidate_extensions() {
        assert!(is_rename_candidate("004_x.wav"));
        assert!(is_rename_candidate("004_x.flac"));
        assert!(!is_rename_candidate("004_x.WAV"));
        assert!(!is_rename_candidate("004_x.ogg"));
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("004_oldname.wav"), b"").unwrap();
        let table: CorrectionTable = [("_oldname", "_newname")].into_iter().collect();

        let summary = rename_files(dir.path(), &table, true).unwrap();
        assert_eq!(summary.renamed_count(), 1);
        assert!(dir.path().join("004_oldname.wav").exists());
        assert!(!dir.path().join("004_newname.wav").exists());
    }

    #[test]
    fn test_existing_target_not_overwritten() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("004_oldname.wav"), b"old").unwrap();
        fs::write(dir.path().join("004_newname.wav"), b"keep").unwrap();
        let table: CorrectionTable = [("_oldname", "_newname")].into_iter().collect();

        let summary = rename_files(dir.path(), &table, false).unwrap();
        assert_eq!(summary.renamed_count(), 0);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(fs::read(dir.path().join("004_newname.wav")).unwrap(), b"keep");
    }
}
