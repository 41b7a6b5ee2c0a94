//! 命名チェック（手動 / 自動判定）
//!
//! 画面や標準出力には依存せず、リクエストを受け取ってレポートを返す。

use crate::error::Result;
use crate::scanner;
use std::path::{Path, PathBuf};
use voicekit_common::{
    load_references, reconcile, select_best_mapping, AutoSelection, CombinationOutcome, LayoutMode,
    MappingKind, ReconciliationReport,
};

/// 解析リクエスト
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub folder: PathBuf,
    pub kinds: Vec<MappingKind>,
    pub layout: LayoutMode,
}

/// 自動判定の結果と、選ばれた組み合わせでの再解析レポート
#[derive(Debug, Clone)]
pub struct AutoAnalysis {
    pub selection: AutoSelection,
    pub report: Option<ReconciliationReport>,
}

/// 指定された種別・レイアウトで突き合わせる
pub fn run_check(request: &AnalysisRequest, mapping_dir: &Path) -> Result<ReconciliationReport> {
    // 参照が揃わなければフォルダは読まない
    let references = load_references(mapping_dir, &request.kinds)?;
    let inventory = scanner::scan_target(&request.folder, request.layout)?;

    let report = reconcile(&references, &inventory);
    tracing::debug!(
        "reconciled {} categories: {} matched, {} missing",
        report.categories.len(),
        report.total_matched(),
        report.total_missing()
    );
    Ok(report)
}

/// レイアウトと組み合わせを自動判定してから突き合わせる
pub fn run_auto(folder: &Path, mapping_dir: &Path) -> Result<AutoAnalysis> {
    let layout = scanner::detect_layout(folder)?;
    tracing::debug!("detected layout: {}", layout);

    let inventory = scanner::scan_target(folder, layout)?;
    let selection = select_best_mapping(&inventory, |kinds| load_references(mapping_dir, kinds));

    for score in &selection.scores {
        match &score.outcome {
            CombinationOutcome::Scored { matches, missing } => tracing::debug!(
                "combination {}: {} matches, {} missing",
                score.combination,
                matches,
                missing
            ),
            CombinationOutcome::Skipped { reason } => {
                tracing::debug!("combination {} skipped: {}", score.combination, reason)
            }
        }
    }

    let report = match &selection.best {
        Some(best) => {
            let request = AnalysisRequest {
                folder: folder.to_path_buf(),
                kinds: best.combination.kinds().to_vec(),
                layout: best.layout,
            };
            Some(run_check(&request, mapping_dir)?)
        }
        None => None,
    };

    Ok(AutoAnalysis { selection, report })
}
