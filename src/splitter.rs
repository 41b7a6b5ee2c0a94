//! ナレーション音声の一括分割
//!
//! `<フォルダ>/<キー>.wav` を `<mappings>/<キー>.txt` のタイトル順に固定長で切り出し、
//! `<フォルダ>/<キー>/` に保存する。最後に `REMOVE` を含むクリップを削除する。

use crate::audio::AudioTool;
use crate::error::{Result, VoiceKitError};
use crate::scanner;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::path::{Path, PathBuf};
use voicekit_common::split_plan::{parse_titles, plan_clips, validate_clip_duration};
use voicekit_common::{MappingKind, REMOVE_SENTINEL};

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub clip_duration: f64,
    pub title_prefix: String,
}

/// 音声ファイル1件の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    Split { source: String, clips: usize, failed: usize },
    Skipped { source: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    pub outcomes: Vec<SplitOutcome>,
    /// 後処理で削除したREMOVEクリップ
    pub removed: Vec<PathBuf>,
}

impl SplitSummary {
    pub fn clip_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                SplitOutcome::Split { clips, .. } => *clips,
                SplitOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// ファイル名に使えない文字を `_` に置換
pub fn sanitize_file_name(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref INVALID_CHARS: Regex = Regex::new(r#"[\\/:*?"<>|]"#).unwrap();
    }
    INVALID_CHARS.replace_all(name, "_").to_string()
}

/// 名前マッピングごとに音声を分割する
pub fn split_all(
    folder: &Path,
    mapping_dir: &Path,
    options: &SplitOptions,
    tool: &dyn AudioTool,
) -> Result<SplitSummary> {
    validate_clip_duration(options.clip_duration)?;
    scanner::ensure_folder(folder)?;

    let mut summary = SplitSummary::default();
    let mapping_files = MappingKind::Names.mapping_files();

    for file in &mapping_files {
        let stem = file.stem();
        let audio_path = folder.join(format!("{}.wav", stem));
        let titles_path = mapping_dir.join(file.file_name());
        let source = format!("{}.wav", stem);

        if !audio_path.is_file() {
            tracing::warn!("missing audio file: {}", audio_path.display());
            summary.outcomes.push(SplitOutcome::Skipped {
                source,
                reason: format!("Missing audio file: {}", audio_path.display()),
            });
            continue;
        }
        if !titles_path.is_file() {
            tracing::warn!("missing title file: {}", titles_path.display());
            summary.outcomes.push(SplitOutcome::Skipped {
                source,
                reason: format!("Missing title file: {}", titles_path.display()),
            });
            continue;
        }

        let outcome = match split_one(&audio_path, &titles_path, &folder.join(&stem), options, tool) {
            Ok((clips, failed)) => SplitOutcome::Split { source, clips, failed },
            Err(e) => {
                tracing::warn!("{}: {}", source, e);
                SplitOutcome::Skipped { source, reason: e.to_string() }
            }
        };
        summary.outcomes.push(outcome);
    }

    let output_dirs: Vec<PathBuf> = mapping_files.iter().map(|f| folder.join(f.stem())).collect();
    summary.removed = cleanup_remove_files(&output_dirs);

    Ok(summary)
}

/// 1ファイル分割（作成数, 失敗数）
fn split_one(
    audio_path: &Path,
    titles_path: &Path,
    output_dir: &Path,
    options: &SplitOptions,
    tool: &dyn AudioTool,
) -> Result<(usize, usize)> {
    let titles = parse_titles(&std::fs::read_to_string(titles_path)?);
    let total = tool.probe_duration(audio_path)?;
    let plan = plan_clips(total, options.clip_duration, &titles, &options.title_prefix)
        .map_err(VoiceKitError::from)?;

    std::fs::create_dir_all(output_dir)?;

    let progress = ProgressBar::new(plan.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("  {msg} [{bar:30}] {pos}/{len}") {
        progress.set_style(style);
    }
    progress.set_message(
        audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    );

    let mut created = 0;
    let mut failed = 0;
    for clip in &plan {
        let output = output_dir.join(format!("{}.wav", sanitize_file_name(&clip.title)));
        match tool.extract_clip(audio_path, clip.start, clip.duration, &output) {
            Ok(()) => {
                tracing::debug!("created clip: {}", output.display());
                created += 1;
            }
            Err(e) => {
                tracing::warn!("clip {} failed: {}", output.display(), e);
                failed += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok((created, failed))
}

/// 出力フォルダから `REMOVE` を含むファイルを削除する（大文字小文字を区別しない）
pub fn cleanup_remove_files(output_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut removed = Vec::new();

    for dir in output_dirs {
        let Ok(files) = scanner::list_files(dir) else {
            continue;
        };

        for file in files {
            if !file.file_name.to_uppercase().contains(REMOVE_SENTINEL) {
                continue;
            }
            match std::fs::remove_file(&file.path) {
                Ok(()) => {
                    tracing::info!("deleted file: {}", file.path.display());
                    removed.push(file.path);
                }
                Err(e) => tracing::warn!("error deleting file {}: {}", file.path.display(), e),
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakeAudioTool;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("1.1.1.1_what?"), "1.1.1.1_what_");
        assert_eq!(sanitize_file_name(r#"a/b\c:d*e"f<g>h|i"#), "a_b_c_d_e_f_g_h_i");
        assert_eq!(sanitize_file_name("plain_name"), "plain_name");
    }

    #[test]
    fn test_cleanup_remove_files_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("1-SYL");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("1.1_a_REMOVE.wav"), b"").unwrap();
        std::fs::write(out.join("1.1_b_remove.wav"), b"").unwrap();
        std::fs::write(out.join("1.1_keep.wav"), b"").unwrap();

        let removed = cleanup_remove_files(&[out.clone(), dir.path().join("absent")]);
        assert_eq!(removed.len(), 2);
        assert!(out.join("1.1_keep.wav").exists());
    }

    fn options() -> SplitOptions {
        SplitOptions {
            clip_duration: 2.0,
            title_prefix: "1.1.1.1_".into(),
        }
    }

    #[test]
    fn test_split_all_creates_clips_and_drops_remove() {
        let takes = tempfile::tempdir().unwrap();
        let mappings = tempfile::tempdir().unwrap();
        std::fs::write(takes.path().join("1-SYL.wav"), b"").unwrap();
        std::fs::write(mappings.path().join("1-SYL.txt"), "ba\nREMOVE\nda?\n\n").unwrap();

        let tool = FakeAudioTool::with_duration(5.0);
        let summary = split_all(takes.path(), mappings.path(), &options(), &tool).unwrap();

        let out = takes.path().join("1-SYL");
        assert!(out.join("1.1.1.1_ba.wav").exists());
        assert!(out.join("1.1.1.1_da_.wav").exists());
        assert!(!out.join("1.1.1.1_REMOVE.wav").exists());
        assert_eq!(summary.removed.len(), 1);
        assert_eq!(summary.clip_count(), 3);

        // 残りの名前マッピングは音声が無いのでスキップ
        let skipped = summary
            .outcomes
            .iter()
            .filter(|o| matches!(o, SplitOutcome::Skipped { .. }))
            .count();
        assert_eq!(skipped, summary.outcomes.len() - 1);
    }

    #[test]
    fn test_split_not_enough_titles_creates_nothing() {
        let takes = tempfile::tempdir().unwrap();
        let mappings = tempfile::tempdir().unwrap();
        std::fs::write(takes.path().join("3-SYL.wav"), b"").unwrap();
        std::fs::write(mappings.path().join("3-SYL.txt"), "one\ntwo\n").unwrap();

        let tool = FakeAudioTool::with_duration(7.0);
        let summary = split_all(takes.path(), mappings.path(), &options(), &tool).unwrap();

        assert!(tool.calls.borrow().is_empty());
        assert!(summary
            .outcomes
            .iter()
            .any(|o| matches!(o, SplitOutcome::Skipped { source, .. } if source == "3-SYL.wav")));
        assert!(!takes.path().join("3-SYL").exists());
    }

    #[test]
    fn test_split_probe_failure_continues() {
        let takes = tempfile::tempdir().unwrap();
        let mappings = tempfile::tempdir().unwrap();
        for key in ["1-SYL", "3-SYL"] {
            std::fs::write(takes.path().join(format!("{}.wav", key)), b"").unwrap();
            std::fs::write(mappings.path().join(format!("{}.txt", key)), "a\nb\n").unwrap();
        }

        let tool = FakeAudioTool {
            duration: 3.0,
            fail_on: Some("1-SYL".into()),
            ..Default::default()
        };
        let summary = split_all(takes.path(), mappings.path(), &options(), &tool).unwrap();

        assert!(summary.outcomes.contains(&SplitOutcome::Split {
            source: "3-SYL.wav".into(),
            clips: 2,
            failed: 0,
        }));
        assert!(!takes.path().join("1-SYL").exists());
    }

    #[test]
    fn test_split_missing_folder() {
        let mappings = tempfile::tempdir().unwrap();
        let tool = FakeAudioTool::with_duration(1.0);
        let err = split_all(&mappings.path().join("no-takes"), mappings.path(), &options(), &tool).unwrap_err();
        assert!(matches!(err, VoiceKitError::FolderNotFound(_)));
        assert!(tool.calls.borrow().is_empty());
    }

    #[test]
    fn test_split_invalid_duration() {
        let takes = tempfile::tempdir().unwrap();
        let opts = SplitOptions {
            clip_duration: 0.0,
            title_prefix: String::new(),
        };
        let tool = FakeAudioTool::with_duration(1.0);
        assert!(split_all(takes.path(), takes.path(), &opts, &tool).is_err());
    }
}
