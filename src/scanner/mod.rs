//! 対象フォルダのスキャン
//!
//! 毎回ファイルシステムを読み直す（キャッシュしない）。直下のみ対象で再帰しない。

use crate::error::{Result, VoiceKitError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use voicekit_common::{LayoutMode, ObservedSet, SubfolderContents, TargetInventory};
use walkdir::WalkDir;

/// フォルダ直下のエントリ
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_name: String,
}

/// フォルダの存在確認（一覧は作らない）
pub fn ensure_folder(folder: &Path) -> Result<()> {
    if !folder.is_dir() {
        return Err(VoiceKitError::FolderNotFound(folder.display().to_string()));
    }
    Ok(())
}

/// 直下のエントリを名前順で列挙（読み取りエラーはそのまま返す）
fn direct_children(folder: &Path) -> Result<Vec<FileEntry>> {
    let mut children = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（再帰しない）
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        children.push(FileEntry {
            path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().to_string(),
        });
    }

    Ok(children)
}

/// 直下の通常ファイル一覧（ファイル名順）
pub fn list_files(folder: &Path) -> Result<Vec<FileEntry>> {
    ensure_folder(folder)?;
    Ok(direct_children(folder)?
        .into_iter()
        .filter(|entry| entry.path.is_file())
        .collect())
}

/// 直下のサブフォルダ一覧（ファイル名順）
pub fn list_subdirectories(folder: &Path) -> Result<Vec<FileEntry>> {
    ensure_folder(folder)?;
    Ok(direct_children(folder)?
        .into_iter()
        .filter(|entry| entry.path.is_dir())
        .collect())
}

/// サブフォルダの有無からレイアウトを判定
pub fn detect_layout(folder: &Path) -> Result<LayoutMode> {
    Ok(LayoutMode::infer(!list_subdirectories(folder)?.is_empty()))
}

/// フォルダ直下のファイルから観測セットを作る
pub fn scan_observed(folder: &Path) -> Result<ObservedSet> {
    let files = list_files(folder)?;
    Ok(ObservedSet::from_file_names(files.iter().map(|f| f.file_name.as_str())))
}

/// サブフォルダごとの観測セット（キーは前後空白を除いたフォルダ名）
pub fn scan_subfolders(folder: &Path) -> Result<BTreeMap<String, SubfolderContents>> {
    let mut folders = BTreeMap::new();

    for dir in list_subdirectories(folder)? {
        let contents = match scan_observed(&dir.path) {
            Ok(observed) => SubfolderContents::Files(observed),
            Err(e) => {
                tracing::warn!("could not read subfolder {}: {}", dir.path.display(), e);
                SubfolderContents::Unreadable(e.to_string())
            }
        };
        folders.insert(dir.file_name.trim().to_string(), contents);
    }

    Ok(folders)
}

/// 指定レイアウトで対象フォルダをスキャン
pub fn scan_target(folder: &Path, layout: LayoutMode) -> Result<TargetInventory> {
    let inventory = match layout {
        LayoutMode::Flat => TargetInventory::Flat(scan_observed(folder)?),
        LayoutMode::Subfolders => TargetInventory::Subfolders(scan_subfolders(folder)?),
    };
    tracing::debug!("scanned {} as {}", folder.display(), layout);
    Ok(inventory)
}
