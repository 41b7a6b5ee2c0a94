//! 参照リスト（マッピングファイル）の読み込み
//!
//! 要求された種別のファイルが1つでも欠けていれば全体を失敗とし、部分的な参照セットは返さない。

use crate::category::{CategoryKey, MappingKind};
use crate::error::{Error, Result};
use crate::naming::reference_base;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// 削除対象を示す行マーカー
pub const REMOVE_SENTINEL: &str = "REMOVE";

/// カテゴリ1件分の期待名リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceList {
    entries: Vec<String>,
}

impl ReferenceList {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// マッピングファイル本文の行を追加（空行・REMOVE行は除外）
    pub fn extend_from_text(&mut self, content: &str) {
        self.entries.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.contains(REMOVE_SENTINEL))
                .map(str::to_string),
        );
    }

    /// 元の行（ファイル順）
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 比較用に正規化・重複除去したセット
    pub fn name_set(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| reference_base(e)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// カテゴリキー → 参照リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    lists: BTreeMap<CategoryKey, ReferenceList>,
}

impl ReferenceSet {
    pub fn insert_text(&mut self, key: CategoryKey, content: &str) {
        self.lists.entry(key).or_default().extend_from_text(content);
    }

    pub fn get(&self, key: &CategoryKey) -> Option<&ReferenceList> {
        self.lists.get(key)
    }

    /// キー順に走査
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryKey, &ReferenceList)> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl FromIterator<(CategoryKey, Vec<String>)> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = (CategoryKey, Vec<String>)>>(iter: I) -> Self {
        let mut set = ReferenceSet::default();
        for (key, entries) in iter {
            set.lists.entry(key).or_default().entries.extend(entries);
        }
        set
    }
}

/// mappingsディレクトリから参照セットを読み込む
pub fn load_references(mapping_dir: &Path, kinds: &[MappingKind]) -> Result<ReferenceSet> {
    if kinds.is_empty() {
        return Err(Error::NoMappingSelected);
    }

    if !mapping_dir.is_dir() {
        return Err(Error::MappingDirNotFound(mapping_dir.display().to_string()));
    }

    let mut references = ReferenceSet::default();

    for kind in kinds {
        for file in kind.mapping_files() {
            let path = mapping_dir.join(file.file_name());
            if !path.is_file() {
                return Err(Error::MappingFileMissing { file: file.file_name() });
            }

            let content = std::fs::read_to_string(&path)?;
            references.insert_text(file.category_key(), &content);
        }
    }

    Ok(references)
}
