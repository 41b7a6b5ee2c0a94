//! 最適マッピングの自動判定
//!
//! 固定5通りの組み合わせを固定順で総当たりし、一致数最大・同数なら不足数最小のものを選ぶ。
//! 完全に同点の場合は先に評価した組み合わせが残る（評価順が結果に影響する）。

use crate::category::MappingKind;
use crate::error::Result;
use crate::inventory::{CategoryLookup, LayoutMode, TargetInventory};
use crate::reconcile::{match_count, missing_names};
use crate::reference::ReferenceSet;
use serde::Serialize;
use std::fmt;

/// マッピング種別の組み合わせ（序数と基数は組み合わせない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryCombination {
    Names,
    Ordinal,
    Cardinal,
    NamesOrdinal,
    NamesCardinal,
}

impl CategoryCombination {
    /// 評価順
    pub const ALL: [CategoryCombination; 5] = [
        CategoryCombination::Names,
        CategoryCombination::Ordinal,
        CategoryCombination::Cardinal,
        CategoryCombination::NamesOrdinal,
        CategoryCombination::NamesCardinal,
    ];

    pub fn kinds(&self) -> &'static [MappingKind] {
        match self {
            CategoryCombination::Names => &[MappingKind::Names],
            CategoryCombination::Ordinal => &[MappingKind::Ordinal],
            CategoryCombination::Cardinal => &[MappingKind::Cardinal],
            CategoryCombination::NamesOrdinal => &[MappingKind::Names, MappingKind::Ordinal],
            CategoryCombination::NamesCardinal => &[MappingKind::Names, MappingKind::Cardinal],
        }
    }
}

impl fmt::Display for CategoryCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.kinds().iter().map(MappingKind::label).collect();
        write!(f, "{}", labels.join(" + "))
    }
}

/// 組み合わせ1件の評価結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CombinationOutcome {
    Scored { matches: usize, missing: usize },
    /// 参照ファイルの読み込みに失敗したため評価せず
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationScore {
    pub combination: CategoryCombination,
    pub outcome: CombinationOutcome,
}

/// 選ばれた組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestMapping {
    pub combination: CategoryCombination,
    pub layout: LayoutMode,
    pub matches: usize,
    pub missing: usize,
}

/// 自動判定の全結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoSelection {
    pub scores: Vec<CombinationScore>,
    pub best: Option<BestMapping>,
}

/// 参照セットを観測結果で採点する（一致数, 不足数）
///
/// サブフォルダが無いカテゴリは参照件数すべてを不足として数える。
/// 読み取れないサブフォルダはどちらにも数えない。
pub fn score_references(references: &ReferenceSet, inventory: &TargetInventory) -> (usize, usize) {
    let mut matches = 0;
    let mut missing = 0;

    for (key, list) in references.iter() {
        let expected = list.name_set();
        match inventory.lookup(key) {
            CategoryLookup::Observed(observed) => {
                matches += match_count(&expected, observed);
                missing += missing_names(&expected, observed).len();
            }
            // 重複行は1件として数える（ファイルの行数ではなく名前の種類数）
            CategoryLookup::MissingSubfolder => missing += expected.len(),
            CategoryLookup::Unreadable(_) => {}
        }
    }

    (matches, missing)
}

/// 5通りの組み合わせを評価して最適なものを選ぶ
///
/// `load` は組み合わせごとの参照読み込み。失敗した組み合わせはスキップする。
pub fn select_best_mapping<F>(inventory: &TargetInventory, mut load: F) -> AutoSelection
where
    F: FnMut(&[MappingKind]) -> Result<ReferenceSet>,
{
    let mut scores = Vec::with_capacity(CategoryCombination::ALL.len());
    let mut best: Option<BestMapping> = None;

    for combination in CategoryCombination::ALL {
        let references = match load(combination.kinds()) {
            Ok(references) => references,
            Err(e) => {
                scores.push(CombinationScore {
                    combination,
                    outcome: CombinationOutcome::Skipped { reason: e.to_string() },
                });
                continue;
            }
        };

        let (matches, missing) = score_references(&references, inventory);
        scores.push(CombinationScore {
            combination,
            outcome: CombinationOutcome::Scored { matches, missing },
        });

        if matches == 0 {
            continue;
        }

        let better = match &best {
            None => true,
            Some(current) => {
                matches > current.matches || (matches == current.matches && missing < current.missing)
            }
        };

        if better {
            best = Some(BestMapping {
                combination,
                layout: inventory.layout(),
                matches,
                missing,
            });
        }
    }

    AutoSelection { scores, best }
}
