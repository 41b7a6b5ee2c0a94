//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mapping directory '{0}' not found!")]
    MappingDirNotFound(String),

    #[error("Reference file {file} not found!")]
    MappingFileMissing { file: String },

    #[error("No mapping type selected")]
    NoMappingSelected,

    #[error("Unknown mapping type: {0}. Use names, ordinal, or cardinal")]
    UnknownMappingKind(String),

    #[error("Unknown analysis mode: {0}. Use subfolders or flat")]
    UnknownLayout(String),

    #[error("Not enough titles: {required} clips required, {available} titles available")]
    NotEnoughTitles { required: usize, available: usize },

    #[error("Invalid clip duration: {0}")]
    InvalidDuration(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
