//! レポートの表示・保存
//!
//! テキストは人が読むためのもの。JSONは補助出力で、形式は固定しない。

use crate::error::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use voicekit_common::{AutoSelection, BestMapping, CategoryStatus, LayoutMode, ReconciliationReport};

pub const NO_SUITABLE_MAPPING: &str = "No suitable mapping type found.";

/// カテゴリごとのテキストレポート
pub fn render_reconciliation(report: &ReconciliationReport) -> String {
    let mut out = String::new();
    let heading = match report.layout {
        LayoutMode::Flat => "Analysis for reference",
        LayoutMode::Subfolders => "Analysis for subfolder",
    };

    for category in &report.categories {
        match &category.status {
            CategoryStatus::MissingSubfolder => {
                let _ = writeln!(out, "Missing subfolder for: {}", category.category);
                continue;
            }
            CategoryStatus::UnreadableSubfolder(reason) => {
                let _ = writeln!(out, "Error reading subfolder {}: {}", category.category, reason);
                continue;
            }
            _ => {}
        }

        let _ = writeln!(out, "{}: {}", heading, category.category);
        match &category.status {
            CategoryStatus::Missing(names) => {
                out.push_str("  Missing files:\n");
                for name in names {
                    let _ = writeln!(out, "    {}", name);
                }
            }
            _ => out.push_str("  All files listed are present.\n"),
        }
        out.push('\n');
    }

    out
}

/// 自動判定で選ばれた組み合わせの1行表示
pub fn render_best_mapping(best: &BestMapping) -> String {
    format!(
        "Best mapping found: {} ({}) with {} matches and {} missing files",
        best.combination, best.layout, best.matches, best.missing
    )
}

/// JSON出力用ドキュメント
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: String,
    pub folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<&'a AutoSelection>,
    pub report: Option<&'a ReconciliationReport>,
}

impl<'a> ReportDocument<'a> {
    pub fn new(
        folder: &Path,
        selection: Option<&'a AutoSelection>,
        report: Option<&'a ReconciliationReport>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            folder: folder.display().to_string(),
            selection,
            report,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
