use std::fmt::Write as _;

use super::{
    Config, Hotkey,
    constants::{MANUAL_REMAP, TOGGLE_AUTO, UNDO_LAST},
};

pub fn find_duplicate_hotkeys(config: &Config) -> Option<String> {
    let hotkeys: Vec<(&str, Hotkey)> = [
        (MANUAL_REMAP, &config.hotkey_manual),
        (TOGGLE_AUTO, &config.hotkey_toggle),
        (UNDO_LAST, &config.hotkey_undo),
    ]
    .into_iter()
    .filter_map(|(name, raw)| raw.parse::<Hotkey>().ok().map(|hk| (name, hk)))
    .collect();

    let duplicates: Vec<_> = hotkeys
        .iter()
        .enumerate()
        .flat_map(|(i, (name1, hk1))| {
            hotkeys
                .iter()
                .skip(i + 1)
                .filter(move |(_, hk2)| hk1 == hk2)
                .map(move |(name2, _)| (*name1, *name2))
        })
        .collect();

    if duplicates.is_empty() {
        None
    } else {
        let mut error = String::from("Duplicate hotkeys found:\n\n");

        for (name1, name2) in &duplicates {
            // `String` implements `fmt::Write` infallibly.
            let _ = writeln!(error, "• '{name1}' and '{name2}'");
        }

        error.push_str("\nEach action must have a unique hotkey.");
        Some(error)
    }
}

fn find_malformed_hotkey(config: &Config) -> Option<String> {
    [
        (MANUAL_REMAP, &config.hotkey_manual),
        (TOGGLE_AUTO, &config.hotkey_toggle),
        (UNDO_LAST, &config.hotkey_undo),
    ]
    .into_iter()
    .find_map(|(name, raw)| {
        raw.parse::<Hotkey>()
            .err()
            .map(|e| format!("Invalid hotkey for '{name}': {e}"))
    })
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_word_length == 0 {
            return Err("min_word_length must be at least 1".to_string());
        }
        if self.auto_learn_threshold == 0 {
            return Err("auto_learn_threshold must be at least 1".to_string());
        }
        if self.flush_interval == 0 {
            return Err("flush_interval must be at least 1".to_string());
        }
        if let Some(error) = find_malformed_hotkey(self) {
            return Err(error);
        }
        if let Some(error) = find_duplicate_hotkeys(self) {
            return Err(error);
        }
        Ok(())
    }
}
