//! WAV → MP3 一括変換
//!
//! 出力は `<フォルダ>/converted/<stem>.mp3`。1件の失敗で全体は止めない。

use crate::audio::AudioTool;
use crate::error::Result;
use crate::scanner::{self, FileEntry};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR: &str = "converted";

#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutcome {
    Converted { file: String, output: PathBuf },
    Failed { file: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConvertSummary {
    pub outcomes: Vec<ConvertOutcome>,
}

impl ConvertSummary {
    pub fn converted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ConvertOutcome::Converted { .. }))
            .count()
    }
}

fn is_wav(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".wav")
}

/// 変換対象のWAVファイル（名前順）
pub fn find_wav_files(folder: &Path) -> Result<Vec<FileEntry>> {
    Ok(scanner::list_files(folder)?
        .into_iter()
        .filter(|f| is_wav(&f.file_name))
        .collect())
}

/// フォルダ内のWAVをすべてMP3に変換する（WAVが無ければ出力フォルダも作らない）
pub fn convert_folder(folder: &Path, bitrate: &str, tool: &dyn AudioTool) -> Result<ConvertSummary> {
    let files = find_wav_files(folder)?;
    let mut summary = ConvertSummary::default();
    if files.is_empty() {
        return Ok(summary);
    }

    let output_dir = folder.join(OUTPUT_DIR);
    std::fs::create_dir_all(&output_dir)?;

    let progress = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    for file in files {
        progress.set_message(file.file_name.clone());
        let stem = Path::new(&file.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file.file_name.clone());
        let output = output_dir.join(format!("{}.mp3", stem));

        let outcome = match tool.transcode_to_mp3(&file.path, &output, bitrate) {
            Ok(()) => {
                tracing::info!("converted {} -> {}", file.file_name, output.display());
                ConvertOutcome::Converted { file: file.file_name, output }
            }
            Err(e) => {
                tracing::warn!("conversion failed for {}: {}", file.file_name, e);
                ConvertOutcome::Failed {
                    file: file.file_name,
                    reason: e.to_string(),
                }
            }
        };
        summary.outcomes.push(outcome);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(summary)
}
