//! 対象フォルダの実ファイル一覧（正規化済みベース名）

use crate::category::CategoryKey;
use crate::error::Error;
use crate::naming::observed_base;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 解析モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// フォルダ直下にすべてのファイルがある
    Flat,
    /// カテゴリごとのサブフォルダ
    #[default]
    Subfolders,
}

impl LayoutMode {
    /// サブフォルダの有無から判定する
    pub fn infer(has_subdirectories: bool) -> Self {
        if has_subdirectories {
            LayoutMode::Subfolders
        } else {
            LayoutMode::Flat
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Flat => write!(f, "Single Folder"),
            LayoutMode::Subfolders => write!(f, "Subfolders"),
        }
    }
}

impl std::str::FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "single" | "root" => Ok(LayoutMode::Flat),
            "subfolders" | "subfolder" | "sub" => Ok(LayoutMode::Subfolders),
            _ => Err(Error::UnknownLayout(s.to_string())),
        }
    }
}

/// 観測されたベース名のセット
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedSet {
    names: BTreeSet<String>,
}

impl ObservedSet {
    /// ファイル名一覧から構築（`_` を含まない名前は無視）
    pub fn from_file_names<I, S>(file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = file_names
            .into_iter()
            .filter_map(|name| observed_base(name.as_ref()))
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// サブフォルダの中身
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubfolderContents {
    Files(ObservedSet),
    /// 読み取り失敗（理由）
    Unreadable(String),
}

/// 対象フォルダのスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInventory {
    Flat(ObservedSet),
    /// キーは前後の空白を除いたサブフォルダ名
    Subfolders(BTreeMap<String, SubfolderContents>),
}

/// カテゴリに対応する観測結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLookup<'a> {
    Observed(&'a ObservedSet),
    MissingSubfolder,
    Unreadable(&'a str),
}

impl TargetInventory {
    pub fn layout(&self) -> LayoutMode {
        match self {
            TargetInventory::Flat(_) => LayoutMode::Flat,
            TargetInventory::Subfolders(_) => LayoutMode::Subfolders,
        }
    }

    /// カテゴリキーに対応する観測セットを引く
    pub fn lookup(&self, key: &CategoryKey) -> CategoryLookup<'_> {
        match self {
            TargetInventory::Flat(observed) => CategoryLookup::Observed(observed),
            TargetInventory::Subfolders(folders) => match folders.get(&key.to_string()) {
                Some(SubfolderContents::Files(observed)) => CategoryLookup::Observed(observed),
                Some(SubfolderContents::Unreadable(reason)) => CategoryLookup::Unreadable(reason),
                None => CategoryLookup::MissingSubfolder,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_set_from_file_names() {
        let observed = ObservedSet::from_file_names(["001_one.wav", "002_two.wav", "notes.txt"]);
        assert_eq!(observed.len(), 2);
        assert!(observed.contains("one"));
        assert!(observed.contains("two"));
    }

    #[test]
    fn test_layout_infer_and_parse() {
        assert_eq!(LayoutMode::infer(false), LayoutMode::Flat);
        assert_eq!(LayoutMode::infer(true), LayoutMode::Subfolders);
        assert_eq!("flat".parse::<LayoutMode>().unwrap(), LayoutMode::Flat);
        assert_eq!("Subfolders".parse::<LayoutMode>().unwrap(), LayoutMode::Subfolders);
        assert!("nested".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_lookup_subfolder_states() {
        let mut folders = BTreeMap::new();
        folders.insert("1-SYL".to_string(), SubfolderContents::Files(ObservedSet::default()));
        folders.insert("3-SYL".to_string(), SubfolderContents::Unreadable("denied".into()));
        let inventory = TargetInventory::Subfolders(folders);

        let one = CategoryKey::Syllable { count: 1, part: None };
        let two = CategoryKey::Syllable { count: 2, part: Some(1) };
        let three = CategoryKey::Syllable { count: 3, part: None };

        assert!(matches!(inventory.lookup(&one), CategoryLookup::Observed(_)));
        assert_eq!(inventory.lookup(&two), CategoryLookup::MissingSubfolder);
        assert_eq!(inventory.lookup(&three), CategoryLookup::Unreadable("denied"));
    }

    #[test]
    fn test_flat_lookup_ignores_key() {
        let inventory = TargetInventory::Flat(ObservedSet::from_file_names(["9_x.wav"]));
        assert_eq!(inventory.layout(), LayoutMode::Flat);
        match inventory.lookup(&CategoryKey::Numeral { count: 2 }) {
            CategoryLookup::Observed(set) => assert!(set.contains("x")),
            other => panic!("unexpected lookup: {:?}", other),
        }
    }
}
