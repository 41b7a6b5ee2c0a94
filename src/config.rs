use crate::error::{Result, VoiceKitError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// mappingsディレクトリを上書きする環境変数
pub const MAPPINGS_DIR_ENV: &str = "VOICEKIT_MAPPINGS_DIR";

/// 補正表の既定ファイル名（ツールのフォルダに置く）
pub const DEFAULT_CORRECTION_TABLE: &str = "Name Error Correction List - Sheet2.csv";

/// 削除パターンの既定ファイル名（mappings内）
pub const DEFAULT_PATTERN_FILE: &str = "custom_map.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mappings_dir: Option<PathBuf>,
    pub correction_table: Option<PathBuf>,
    pub deletion_patterns: Option<PathBuf>,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub mp3_bitrate: String,
    pub clip_duration: f64,
    pub title_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mappings_dir: None,
            correction_table: None,
            deletion_patterns: None,
            ffmpeg_path: "ffmpeg".into(),
            ffprobe_path: "ffprobe".into(),
            mp3_bitrate: "192k".into(),
            clip_duration: 2.0,
            title_prefix: "1.1.1.1".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（無ければ既定値）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VoiceKitError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("voicekit").join("config.json"))
    }

    /// mappingsディレクトリを解決
    ///
    /// 優先順: 引数 → 環境変数 → 設定ファイル → 実行ファイル横の `mappings` → `./mappings`
    pub fn resolve_mappings_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(dir) = cli_override {
            return dir.to_path_buf();
        }

        if let Ok(dir) = std::env::var(MAPPINGS_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir.trim());
            }
        }

        if let Some(dir) = &self.mappings_dir {
            return dir.clone();
        }

        let beside_exe = tool_dir().join("mappings");
        if beside_exe.is_dir() {
            return beside_exe;
        }

        PathBuf::from("mappings")
    }

    /// 補正表のパス（未設定ならmappingsと同じ階層の既定ファイル）
    pub fn resolve_correction_table(&self, mappings_dir: &Path) -> PathBuf {
        self.correction_table.clone().unwrap_or_else(|| {
            mappings_dir
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_CORRECTION_TABLE)
        })
    }

    /// 削除パターンファイルのパス
    pub fn resolve_deletion_patterns(&self, mappings_dir: &Path) -> PathBuf {
        self.deletion_patterns
            .clone()
            .unwrap_or_else(|| mappings_dir.join(DEFAULT_PATTERN_FILE))
    }
}

/// 実行ファイルのあるフォルダ（取得できなければカレント）
fn tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
