pub(crate) mod config_validator;
pub mod constants;
pub mod hotkey;
pub mod raw_config;

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

pub use hotkey::{Hotkey, HotkeyAction};
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

use self::constants::{
    DEFAULT_AUTO_LEARN_THRESHOLD, DEFAULT_FLUSH_INTERVAL, DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_UNDO_WINDOW_SECS,
};

const APP_DIR: &str = "RuSwitch";
const APP_DIR_UNIX: &str = "ruswitch";
const CONFIG_FILE: &str = "config.toml";
const USER_DICT_FILE: &str = "user_words.json";
const DICT_DIR: &str = "dictionaries";

pub(crate) fn default_excluded_processes() -> Vec<String> {
    ["KeePass.exe", "1Password.exe", "Bitwarden.exe"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub auto_mode: bool,
    pub hotkey_manual: String,
    pub hotkey_toggle: String,
    pub hotkey_undo: String,
    pub min_word_length: usize,
    pub auto_learn_threshold: u32,
    pub excluded_processes: Vec<String>,
    pub show_notification: bool,
    pub undo_window_secs: u64,
    pub flush_interval: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_dictionary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_mode: true,
            hotkey_manual: "insert".to_string(),
            hotkey_toggle: "ctrl+alt+r".to_string(),
            hotkey_undo: "ctrl+z".to_string(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            auto_learn_threshold: DEFAULT_AUTO_LEARN_THRESHOLD,
            excluded_processes: default_excluded_processes(),
            show_notification: true,
            undo_window_secs: DEFAULT_UNDO_WINDOW_SECS,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            dictionary_dir: None,
            user_dictionary_path: None,
        }
    }
}

/// Per-user data directory: `%APPDATA%\RuSwitch` on Windows, the XDG config dir elsewhere.
pub fn data_dir() -> io::Result<PathBuf> {
    if let Some(appdata) = std::env::var_os("APPDATA") {
        return Ok(PathBuf::from(appdata).join(APP_DIR));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_UNIX))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory available"))
}

pub fn config_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE))
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

pub fn load() -> io::Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> io::Result<Config> {
    ensure_parent_dir(path)?;
    confy::load_path(path).map_err(confy_err)
}

pub fn save(cfg: &Config) -> io::Result<()> {
    save_to(cfg, &config_path()?)
}

pub fn save_to(cfg: &Config, path: &Path) -> io::Result<()> {
    cfg.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    ensure_parent_dir(path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            auto_mode: raw.auto_mode,
            hotkey_manual: raw.hotkey_manual,
            hotkey_toggle: raw.hotkey_toggle,
            hotkey_undo: raw.hotkey_undo,
            min_word_length: raw.min_word_length,
            auto_learn_threshold: raw.auto_learn_threshold,
            excluded_processes: raw.excluded_processes,
            show_notification: raw.show_notification,
            undo_window_secs: raw.undo_window_secs,
            flush_interval: raw.flush_interval,
            dictionary_dir: raw.dictionary_dir,
            user_dictionary_path: raw.user_dictionary_path,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Config {
    /// Parsed hotkeys paired with the action they trigger.
    pub fn hotkeys(&self) -> Result<Vec<(HotkeyAction, Hotkey)>, String> {
        [
            (HotkeyAction::ManualRemap, &self.hotkey_manual),
            (HotkeyAction::ToggleAuto, &self.hotkey_toggle),
            (HotkeyAction::UndoLast, &self.hotkey_undo),
        ]
        .into_iter()
        .map(|(action, raw)| raw.parse::<Hotkey>().map(|hk| (action, hk)))
        .collect()
    }

    pub fn action_for(&self, hotkey: &Hotkey) -> Option<HotkeyAction> {
        self.hotkeys()
            .ok()?
            .into_iter()
            .find_map(|(action, hk)| (hk == *hotkey).then_some(action))
    }

    /// Excluded process names, lowercased for case-insensitive matching.
    pub fn exclusion_set(&self) -> HashSet<String> {
        self.excluded_processes
            .iter()
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }

    pub fn dictionary_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dictionary_dir {
            return dir.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DICT_DIR)))
            .unwrap_or_else(|| PathBuf::from(DICT_DIR))
    }

    pub fn user_dictionary_path(&self) -> io::Result<PathBuf> {
        match &self.user_dictionary_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(USER_DICT_FILE)),
        }
    }

    pub fn undo_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.undo_window_secs)
    }
}
