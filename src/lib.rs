//! voicekit
//!
//! ナレーション収録フォルダの命名チェックと整理ツール群。
//! 純粋なロジックは `voicekit-common`、ファイル操作・外部ツール・対話入力はこちら。

pub mod audio;
pub mod checker;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod renamer;
pub mod report;
pub mod scanner;
pub mod splitter;
pub mod target;
