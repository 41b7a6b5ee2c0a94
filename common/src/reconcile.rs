//! 参照リストと実ファイルの突き合わせ
//!
//! 入力2つだけで決まる純粋な計算。同じ入力なら何度実行しても同じ結果になる。

use crate::category::CategoryKey;
use crate::inventory::{CategoryLookup, LayoutMode, ObservedSet, TargetInventory};
use crate::reference::ReferenceSet;
use serde::Serialize;
use std::collections::BTreeSet;

/// カテゴリ1件の判定結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CategoryStatus {
    AllPresent,
    /// 不足しているベース名（ソート済み）
    Missing(Vec<String>),
    MissingSubfolder,
    UnreadableSubfolder(String),
}

/// カテゴリ1件分のレポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: CategoryKey,
    /// 重複除去後の期待件数
    pub expected: usize,
    pub matched: usize,
    pub status: CategoryStatus,
}

impl CategoryReport {
    pub fn missing_count(&self) -> usize {
        match &self.status {
            CategoryStatus::AllPresent => 0,
            CategoryStatus::Missing(names) => names.len(),
            CategoryStatus::MissingSubfolder => self.expected,
            CategoryStatus::UnreadableSubfolder(_) => 0,
        }
    }
}

/// 突き合わせ結果全体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub layout: LayoutMode,
    pub categories: Vec<CategoryReport>,
}

impl ReconciliationReport {
    pub fn total_matched(&self) -> usize {
        self.categories.iter().map(|c| c.matched).sum()
    }

    pub fn total_missing(&self) -> usize {
        self.categories.iter().map(CategoryReport::missing_count).sum()
    }

    /// 全カテゴリで不足なし
    pub fn is_complete(&self) -> bool {
        self.categories
            .iter()
            .all(|c| matches!(c.status, CategoryStatus::AllPresent))
    }
}

/// `reference − observed`
pub fn missing_names(reference: &BTreeSet<String>, observed: &ObservedSet) -> Vec<String> {
    reference.difference(observed.names()).cloned().collect()
}

/// `reference ∩ observed` の件数
pub fn match_count(reference: &BTreeSet<String>, observed: &ObservedSet) -> usize {
    reference.intersection(observed.names()).count()
}

/// 全カテゴリを突き合わせる
pub fn reconcile(references: &ReferenceSet, inventory: &TargetInventory) -> ReconciliationReport {
    let categories = references
        .iter()
        .map(|(key, list)| {
            let expected = list.name_set();
            let (matched, status) = match inventory.lookup(key) {
                CategoryLookup::Observed(observed) => {
                    let missing = missing_names(&expected, observed);
                    let status = if missing.is_empty() {
                        CategoryStatus::AllPresent
                    } else {
                        CategoryStatus::Missing(missing)
                    };
                    (match_count(&expected, observed), status)
                }
                CategoryLookup::MissingSubfolder => (0, CategoryStatus::MissingSubfolder),
                CategoryLookup::Unreadable(reason) => {
                    (0, CategoryStatus::UnreadableSubfolder(reason.to_string()))
                }
            };

            CategoryReport {
                category: *key,
                expected: expected.len(),
                matched,
                status,
            }
        })
        .collect();

    ReconciliationReport {
        layout: inventory.layout(),
        categories,
    }
}
