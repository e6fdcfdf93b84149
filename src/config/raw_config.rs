use std::path::PathBuf;

use serde::Deserialize;

use super::constants::{
    DEFAULT_AUTO_LEARN_THRESHOLD, DEFAULT_FLUSH_INTERVAL, DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_UNDO_WINDOW_SECS,
};

/// Unvalidated shape of the config file. Missing keys fall back to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    #[serde(default = "default_true")]
    pub auto_mode: bool,
    #[serde(default = "default_hotkey_manual")]
    pub hotkey_manual: String,
    #[serde(default = "default_hotkey_toggle")]
    pub hotkey_toggle: String,
    #[serde(default = "default_hotkey_undo")]
    pub hotkey_undo: String,
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    #[serde(default = "default_auto_learn_threshold")]
    pub auto_learn_threshold: u32,
    #[serde(default = "super::default_excluded_processes")]
    pub excluded_processes: Vec<String>,
    #[serde(default = "default_true")]
    pub show_notification: bool,
    #[serde(default = "default_undo_window_secs")]
    pub undo_window_secs: u64,
    #[serde(default = "default_flush_interval")]
    pub flush_interval: u32,
    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,
    #[serde(default)]
    pub user_dictionary_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}
fn default_hotkey_manual() -> String {
    "insert".to_string()
}
fn default_hotkey_toggle() -> String {
    "ctrl+alt+r".to_string()
}
fn default_hotkey_undo() -> String {
    "ctrl+z".to_string()
}
fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}
fn default_auto_learn_threshold() -> u32 {
    DEFAULT_AUTO_LEARN_THRESHOLD
}
fn default_undo_window_secs() -> u64 {
    DEFAULT_UNDO_WINDOW_SECS
}
fn default_flush_interval() -> u32 {
    DEFAULT_FLUSH_INTERVAL
}
