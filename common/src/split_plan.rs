//! ナレーション音声の分割計画
//!
//! 総再生時間を固定長で区切り、各クリップにタイトル行を1つずつ割り当てる。

use crate::error::{Error, Result};

/// クリップ1件
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlan {
    pub index: usize,
    /// 開始位置（秒）
    pub start: f64,
    /// 長さ（秒）。最後のクリップは端数
    pub duration: f64,
    /// 接頭辞付きタイトル（サニタイズ前）
    pub title: String,
}

/// タイトルファイル本文を読み込む（空行除外、REMOVE行は残す）
pub fn parse_titles(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// クリップ長の検証
pub fn validate_clip_duration(seconds: f64) -> Result<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(Error::InvalidDuration(seconds.to_string()))
    }
}

/// 必要クリップ数 `ceil(total / clip)`
pub fn clip_count(total_duration: f64, clip_duration: f64) -> usize {
    if total_duration <= 0.0 {
        return 0;
    }
    (total_duration / clip_duration).ceil() as usize
}

/// 分割計画を作る
///
/// タイトル数が足りない場合は1件もクリップを作らずエラーにする。
pub fn plan_clips(
    total_duration: f64,
    clip_duration: f64,
    titles: &[String],
    title_prefix: &str,
) -> Result<Vec<ClipPlan>> {
    let clip_duration = validate_clip_duration(clip_duration)?;
    let required = clip_count(total_duration, clip_duration);

    if required > titles.len() {
        return Err(Error::NotEnoughTitles {
            required,
            available: titles.len(),
        });
    }

    Ok(titles
        .iter()
        .take(required)
        .enumerate()
        .map(|(index, title)| {
            let start = index as f64 * clip_duration;
            ClipPlan {
                index,
                start,
                duration: clip_duration.min(total_duration - start),
                title: format!("{}{}", title_prefix, title),
            }
        })
        .collect())
}
