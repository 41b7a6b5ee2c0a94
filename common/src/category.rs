//! マッピング種別とカテゴリキー
//!
//! マッピングファイル名からカテゴリキーへの正規化をここで一元管理する。
//! 数詞ファイル（`<n>_NUM_ORD.txt` / `<n>_NUM_CAR.txt`）は序数・基数の区別を畳んで
//! 音節数ごとの共通キー `<n>-SYL_NUM` になる。

use crate::error::Error;
use serde::{Serialize, Serializer};
use std::fmt;

/// 音節数クラス（1〜4）
pub const SYLLABLE_CLASSES: [u8; 4] = [1, 2, 3, 4];

/// 2音節の名前マッピングは4分割されている
const TWO_SYLLABLE_PARTS: [u8; 4] = [1, 2, 3, 4];

/// マッピング種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MappingKind {
    Names,
    Ordinal,
    Cardinal,
}

impl MappingKind {
    pub const ALL: [MappingKind; 3] = [MappingKind::Names, MappingKind::Ordinal, MappingKind::Cardinal];

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            MappingKind::Names => "Names",
            MappingKind::Ordinal => "Ordinal (Numbers)",
            MappingKind::Cardinal => "Cardinal (Numbers)",
        }
    }

    /// この種別に属するマッピングファイル一覧（固定順）
    pub fn mapping_files(&self) -> Vec<MappingFile> {
        match self {
            MappingKind::Names => {
                let mut files = vec![MappingFile::name(1, None)];
                files.extend(TWO_SYLLABLE_PARTS.iter().map(|&part| MappingFile::name(2, Some(part))));
                files.push(MappingFile::name(3, None));
                files.push(MappingFile::name(4, None));
                files
            }
            MappingKind::Ordinal | MappingKind::Cardinal => SYLLABLE_CLASSES
                .iter()
                .map(|&syllables| MappingFile { kind: *self, syllables, part: None })
                .collect(),
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MappingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "names" | "name" => Ok(MappingKind::Names),
            "ordinal" | "ord" | "ordinal (numbers)" => Ok(MappingKind::Ordinal),
            "cardinal" | "car" | "cardinal (numbers)" => Ok(MappingKind::Cardinal),
            _ => Err(Error::UnknownMappingKind(s.to_string())),
        }
    }
}

/// マッピングファイル1件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingFile {
    pub kind: MappingKind,
    pub syllables: u8,
    /// 2音節名の分割番号（`2-SYL_001` の `1`）
    pub part: Option<u8>,
}

impl MappingFile {
    fn name(syllables: u8, part: Option<u8>) -> Self {
        Self { kind: MappingKind::Names, syllables, part }
    }

    /// mappingsディレクトリ内のファイル名
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.stem())
    }

    /// 拡張子なしのファイル名（分割音声ファイル名・出力フォルダ名にも使う）
    pub fn stem(&self) -> String {
        match self.kind {
            MappingKind::Names => self.category_key().to_string(),
            MappingKind::Ordinal => format!("{}_NUM_ORD", self.syllables),
            MappingKind::Cardinal => format!("{}_NUM_CAR", self.syllables),
        }
    }

    /// カテゴリキーへの正規化
    pub fn category_key(&self) -> CategoryKey {
        match self.kind {
            MappingKind::Names => CategoryKey::Syllable { count: self.syllables, part: self.part },
            MappingKind::Ordinal | MappingKind::Cardinal => CategoryKey::Numeral { count: self.syllables },
        }
    }
}

/// カテゴリキー
///
/// 表示形式はサブフォルダ名と一致する（`1-SYL`, `2-SYL_003`, `4-SYL_NUM`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryKey {
    Syllable { count: u8, part: Option<u8> },
    Numeral { count: u8 },
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Syllable { count, part: None } => write!(f, "{}-SYL", count),
            CategoryKey::Syllable { count, part: Some(part) } => write!(f, "{}-SYL_{:03}", count, part),
            CategoryKey::Numeral { count } => write!(f, "{}-SYL_NUM", count),
        }
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
