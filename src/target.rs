//! 対象フォルダ・マッピング種別の選択
//!
//! 引数で渡されなければ対話式で入力させる。入力値は前後の空白・引用符を除き、
//! `.` / `..` を字句的に畳んでから使う。

use crate::error::{Result, VoiceKitError};
use dialoguer::{Confirm, Input, MultiSelect};
use std::path::{Component, Path, PathBuf};
use voicekit_common::MappingKind;

/// 前後の空白・引用符を除く
fn trim_target_input(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// 入力されたパス文字列を正規化する
pub fn sanitize_target_path(raw: &str) -> PathBuf {
    normalize_path(Path::new(trim_target_input(raw)))
}

/// 字句的な正規化（ファイルシステムには触れない）
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.iter().collect()
}

/// 対象フォルダを決定する（未指定なら入力を求める）
pub fn resolve_target(folder: Option<&Path>, prompt: &str) -> Result<PathBuf> {
    let raw = match folder {
        Some(path) => path.to_string_lossy().to_string(),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| VoiceKitError::Interactive(e.to_string()))?,
    };

    // 空入力を `.` に正規化させない
    if trim_target_input(&raw).is_empty() {
        return Err(VoiceKitError::NoFolderSelected);
    }

    let path = sanitize_target_path(&raw);
    if !path.is_dir() {
        return Err(VoiceKitError::FolderNotFound(path.display().to_string()));
    }

    Ok(path)
}

/// マッピング種別を決定する（未指定なら複数選択させる）
pub fn resolve_mapping_kinds(kinds: &[MappingKind]) -> Result<Vec<MappingKind>> {
    if !kinds.is_empty() {
        return Ok(dedup_kinds(kinds));
    }

    let labels: Vec<&str> = MappingKind::ALL.iter().map(|k| k.label()).collect();
    let chosen = MultiSelect::new()
        .with_prompt("Select mapping types (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()
        .map_err(|e| VoiceKitError::Interactive(e.to_string()))?;

    Ok(chosen.into_iter().map(|i| MappingKind::ALL[i]).collect())
}

/// 重複を除く（指定順は保持）
fn dedup_kinds(kinds: &[MappingKind]) -> Vec<MappingKind> {
    let mut unique = Vec::new();
    for kind in kinds {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    unique
}

/// はい/いいえの確認（既定は「いいえ」）
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| VoiceKitError::Interactive(e.to_string()))
}
