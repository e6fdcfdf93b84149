// Modifier bits, same values as the Win32 `MOD_*` flags.
pub const MOD_ALT: u32 = 0x0001;
pub const MOD_CONTROL: u32 = 0x0002;
pub const MOD_SHIFT: u32 = 0x0004;
pub const MOD_WIN: u32 = 0x0008;

// Action names used in validation messages.
pub const MANUAL_REMAP: &str = "Manual remap";
pub const TOGGLE_AUTO: &str = "Toggle auto-correction";
pub const UNDO_LAST: &str = "Undo last correction";

pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;
pub const DEFAULT_AUTO_LEARN_THRESHOLD: u32 = 3;
pub const DEFAULT_UNDO_WINDOW_SECS: u64 = 30;
pub const DEFAULT_FLUSH_INTERVAL: u32 = 8;
