//! 外部音声ツール連携
//!
//! 音声のデコードは自前で行わず、再生時間の取得・切り出し・MP3変換を外部ツールに任せる。

mod ffmpeg;

pub use ffmpeg::FfmpegTool;

use crate::error::Result;
use std::path::Path;

pub trait AudioTool {
    /// 再生時間（秒）
    fn probe_duration(&self, input: &Path) -> Result<f64>;

    /// `start` 秒から `duration` 秒を切り出して `output` に書く
    fn extract_clip(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()>;

    /// MP3に変換する
    fn transcode_to_mp3(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()>;
}
