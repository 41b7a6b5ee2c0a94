//! Voicekit Common Library
//!
//! 命名チェック（参照リストと実ファイルの突き合わせ）と各ツールの純粋ロジック。
//! ファイル一覧の取得や外部コマンド実行はCLI側で行う。

pub mod auto_select;
pub mod category;
pub mod cleanup;
pub mod correction;
pub mod error;
pub mod inventory;
pub mod naming;
pub mod reconcile;
pub mod reference;
pub mod split_plan;

pub use auto_select::{select_best_mapping, AutoSelection, BestMapping, CategoryCombination, CombinationOutcome};
pub use category::{CategoryKey, MappingFile, MappingKind};
pub use cleanup::DeletionPatterns;
pub use correction::CorrectionTable;
pub use error::{Error, Result};
pub use inventory::{LayoutMode, ObservedSet, SubfolderContents, TargetInventory};
pub use reconcile::{reconcile, CategoryReport, CategoryStatus, ReconciliationReport};
pub use reference::{load_references, ReferenceList, ReferenceSet, REMOVE_SENTINEL};
pub use split_plan::{plan_clips, ClipPlan};
