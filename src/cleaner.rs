//! パターン一致ファイルの一括削除
//!
//! 削除は1件ずつ独立。途中で失敗しても残りは続行し、削除済みのものは戻さない。

use crate::error::{Result, VoiceKitError};
use crate::scanner::{self, FileEntry};
use std::path::Path;
use voicekit_common::DeletionPatterns;

/// 削除対象1件
#[derive(Debug, Clone)]
pub struct DeletionCandidate {
    pub entry: FileEntry,
    pub pattern: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeletionSummary {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// パターンファイルを読み込む（空なら変更前にエラー）
pub fn load_patterns(path: &Path) -> Result<DeletionPatterns> {
    if !path.is_file() {
        return Err(VoiceKitError::FileNotFound(path.display().to_string()));
    }

    let patterns = DeletionPatterns::from_text(&std::fs::read_to_string(path)?);
    if patterns.is_empty() {
        return Err(VoiceKitError::EmptyPatternList(path.display().to_string()));
    }

    Ok(patterns)
}

/// 削除対象を列挙（まだ削除しない）
pub fn find_candidates(folder: &Path, patterns: &DeletionPatterns) -> Result<Vec<DeletionCandidate>> {
    Ok(scanner::list_files(folder)?
        .into_iter()
        .filter_map(|entry| {
            let pattern = patterns.matching_pattern(&entry.file_name)?.to_string();
            Some(DeletionCandidate { entry, pattern })
        })
        .collect())
}

/// 対象を削除する
pub fn delete_candidates(candidates: &[DeletionCandidate]) -> DeletionSummary {
    let mut summary = DeletionSummary::default();

    for candidate in candidates {
        let name = candidate.entry.file_name.clone();
        match std::fs::remove_file(&candidate.entry.path) {
            Ok(()) => {
                tracing::info!("deleted {} (pattern '{}')", name, candidate.pattern);
                summary.deleted.push(name);
            }
            Err(e) => {
                tracing::warn!("error deleting {}: {}", name, e);
                summary.failed.push((name, e.to_string()));
            }
        }
    }

    summary
}
