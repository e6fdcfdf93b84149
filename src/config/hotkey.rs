use std::{fmt, str::FromStr};

use super::constants::{MOD_ALT, MOD_CONTROL, MOD_SHIFT, MOD_WIN};

/// Key chord parsed from strings like `ctrl+alt+r` or `insert`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub mods: u32,
    pub key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    ManualRemap,
    ToggleAuto,
    UndoLast,
}

impl HotkeyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HotkeyAction::ManualRemap => "manual_remap",
            HotkeyAction::ToggleAuto => "toggle_auto",
            HotkeyAction::UndoLast => "undo_last",
        }
    }
}

const MODS_ORDER: &[(u32, &str)] = &[
    (MOD_CONTROL, "Ctrl"),
    (MOD_ALT, "Alt"),
    (MOD_SHIFT, "Shift"),
    (MOD_WIN, "Win"),
];

fn modifier_bit(token: &str) -> Option<u32> {
    match token {
        "ctrl" | "control" | "lctrl" | "rctrl" => Some(MOD_CONTROL),
        "alt" | "lalt" | "ralt" => Some(MOD_ALT),
        "shift" | "lshift" | "rshift" => Some(MOD_SHIFT),
        "win" | "super" | "lwin" | "rwin" => Some(MOD_WIN),
        _ => None,
    }
}

impl FromStr for Hotkey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err("hotkey is empty".to_string());
        }

        let mut mods = 0u32;
        let mut key: Option<String> = None;

        for token in normalized.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(format!("hotkey '{s}' has an empty component"));
            }
            if let Some(bit) = modifier_bit(token) {
                mods |= bit;
                continue;
            }
            if key.replace(token.to_string()).is_some() {
                return Err(format!("hotkey '{s}' names more than one key"));
            }
        }

        let Some(key) = key else {
            return Err(format!("hotkey '{s}' has modifiers but no key"));
        };

        Ok(Self { mods, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = MODS_ORDER
            .iter()
            .filter_map(|(mask, label)| ((self.mods & mask) != 0).then(|| (*label).to_string()))
            .collect();

        let mut chars = self.key.chars();
        let key = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        parts.push(key);

        f.write_str(&parts.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chord_with_modifiers() {
        let hk: Hotkey = "Ctrl+Alt+R".parse().unwrap();
        assert_eq!(hk.mods, MOD_CONTROL | MOD_ALT);
        assert_eq!(hk.key, "r");
        assert_eq!(hk.to_string(), "Ctrl + Alt + R");
    }

    #[test]
    fn parses_bare_key() {
        let hk: Hotkey = "insert".parse().unwrap();
        assert_eq!(hk.mods, 0);
        assert_eq!(hk.to_string(), "Insert");
    }

    #[test]
    fn modifier_order_does_not_matter() {
        let a: Hotkey = "alt+ctrl+r".parse().unwrap();
        let b: Hotkey = "ctrl + alt + r".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_malformed() {
        assert!("".parse::<Hotkey>().is_err());
        assert!("ctrl+".parse::<Hotkey>().is_err());
        assert!("ctrl+alt".parse::<Hotkey>().is_err());
        assert!("a+b".parse::<Hotkey>().is_err());
    }
}
