use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceKitError {
    #[error(transparent)]
    Common(#[from] voicekit_common::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Please select a folder to process")]
    NoFolderSelected,

    #[error("No patterns found in {0}")]
    EmptyPatternList(String),

    #[error("Correction table error: {0}")]
    CorrectionTable(String),

    #[error("Audio tool error: {0}")]
    AudioTool(String),

    #[error("Input error: {0}")]
    Interactive(String),

    #[error("Target already exists: {0}")]
    TargetExists(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VoiceKitError>;
