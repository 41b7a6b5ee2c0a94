use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voicekit_common::{LayoutMode, MappingKind};

#[derive(Parser)]
#[command(name = "voicekit")]
#[command(about = "Voice-over recording toolkit: naming checks, renaming, cleanup, splitting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// mappingsディレクトリ（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub mappings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 参照リストと録音ファイルを突き合わせる
    Check {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// マッピング種別 (names/ordinal/cardinal)、複数指定可。省略時は選択画面
        #[arg(short, long = "mapping")]
        mapping: Vec<MappingKind>,

        /// フォルダ構成 (subfolders/flat)
        #[arg(long, default_value = "subfolders")]
        layout: LayoutMode,

        /// JSONレポートの出力先
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 構成とマッピング種別を自動判定して突き合わせる
    Auto {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// JSONレポートの出力先
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 補正表に従ってファイル名を修正
    Rename {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// 補正表（CSV / xlsx / xls / ods）
        #[arg(long)]
        table: Option<PathBuf>,

        /// シート名（スプレッドシートのみ、省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// ドライラン（変更せずに表示のみ）
        #[arg(long)]
        dry_run: bool,
    },

    /// パターンに一致する音声ファイルを削除
    Clean {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// パターンファイル（1行1パターン）
        #[arg(long)]
        patterns: Option<PathBuf>,

        /// ドライラン（削除せずに表示のみ）
        #[arg(long)]
        dry_run: bool,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 名前マッピングのタイトル順に音声を分割
    Split {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// クリップ長（秒、正の数）
        #[arg(short, long, value_parser = parse_clip_duration)]
        duration: Option<f64>,

        /// ファイル名の接頭辞
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// WAVをMP3に一括変換
    Convert {
        /// 対象フォルダ（省略時は入力を求める）
        folder: Option<PathBuf>,

        /// ビットレート（例: 192k）
        #[arg(long)]
        bitrate: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// mappingsディレクトリを設定
        #[arg(long)]
        set_mappings_dir: Option<PathBuf>,

        /// ffmpegのパスを設定
        #[arg(long)]
        set_ffmpeg: Option<String>,

        /// ffprobeのパスを設定
        #[arg(long)]
        set_ffprobe: Option<String>,
    },
}

/// クリップ長の検証（数値かつ正）
pub fn parse_clip_duration(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("clip duration must be positive, got {}", s));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_clip_duration() {
        assert_eq!(parse_clip_duration("2"), Ok(2.0));
        assert_eq!(parse_clip_duration(" 1.5 "), Ok(1.5));
        assert!(parse_clip_duration("0").is_err());
        assert!(parse_clip_duration("-1").is_err());
        assert!(parse_clip_duration("abc").is_err());
        assert!(parse_clip_duration("inf").is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::try_parse_from([
            "voicekit", "--mappings", "/m", "check", "/takes", "-m", "names", "--mapping", "cardinal",
            "--layout", "flat",
        ])
        .unwrap();

        assert_eq!(cli.mappings, Some(PathBuf::from("/m")));
        match cli.command {
            Commands::Check { folder, mapping, layout, json } => {
                assert_eq!(folder, Some(PathBuf::from("/takes")));
                assert_eq!(mapping, vec![MappingKind::Names, MappingKind::Cardinal]);
                assert_eq!(layout, LayoutMode::Flat);
                assert!(json.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_split_rejects_bad_duration() {
        assert!(Cli::try_parse_from(["voicekit", "split", "/takes", "-d", "0"]).is_err());
        assert!(Cli::try_parse_from(["voicekit", "split", "/takes", "-d", "x"]).is_err());
    }
}
