//! 削除パターン

/// 削除対象にする音声拡張子
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a"];

/// 部分一致で削除対象を判定するパターン一覧
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPatterns {
    patterns: Vec<String>,
}

impl DeletionPatterns {
    /// パターンファイル本文から読み込み（前後空白除去・空行除外）
    pub fn from_text(content: &str) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 一致したパターンを返す（音声拡張子以外は常に `None`）
    pub fn matching_pattern(&self, file_name: &str) -> Option<&str> {
        if !is_audio_file_name(file_name) {
            return None;
        }
        self.patterns
            .iter()
            .find(|p| file_name.contains(p.as_str()))
            .map(String::as_str)
    }
}

/// 音声拡張子か（大文字小文字を区別しない）
pub fn is_audio_file_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
