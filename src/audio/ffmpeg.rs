//! ffmpeg / ffprobe 呼び出し

use super::AudioTool;
use crate::config::Config;
use crate::error::{Result, VoiceKitError};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct FfmpegTool {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegTool {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ffmpeg_path.clone(), config.ffprobe_path.clone())
    }
}

/// コマンドを実行して標準出力を返す
fn run_tool(program: &str, args: &[OsString]) -> Result<String> {
    tracing::debug!("running {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| VoiceKitError::AudioTool(format!("could not start {}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VoiceKitError::AudioTool(format!(
            "{} failed (code {:?}): {}",
            program,
            output.status.code(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// ffprobe の出力から秒数を読む
fn parse_duration(stdout: &str) -> Result<f64> {
    let text = stdout.trim();
    text.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| VoiceKitError::AudioTool(format!("unexpected duration output: '{}'", text)))
}

impl AudioTool for FfmpegTool {
    fn probe_duration(&self, input: &Path) -> Result<f64> {
        let args: Vec<OsString> = vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "format=duration".into(),
            "-of".into(),
            "default=noprint_wrappers=1:nokey=1".into(),
            input.into(),
        ];
        parse_duration(&run_tool(&self.ffprobe, &args)?)
    }

    fn extract_clip(&self, input: &Path, start: f64, duration: f64, output: &Path) -> Result<()> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-ss".into(),
            start.to_string().into(),
            "-t".into(),
            duration.to_string().into(),
            output.into(),
        ];
        run_tool(&self.ffmpeg, &args).map(|_| ())
    }

    fn transcode_to_mp3(&self, input: &Path, output: &Path, bitrate: &str) -> Result<()> {
        let args: Vec<OsString> = vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-codec:a".into(),
            "libmp3lame".into(),
            "-b:a".into(),
            bitrate.into(),
            output.into(),
        ];
        run_tool(&self.ffmpeg, &args).map(|_| ())
    }
}
