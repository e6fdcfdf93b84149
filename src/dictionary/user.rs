use std::{
    collections::BTreeMap,
    fs,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;

use super::{DictionaryError, WordSource, is_learnable, lookup_key};
use crate::config::constants::DEFAULT_FLUSH_INTERVAL;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub count: u32,
    #[serde(default)]
    pub promoted: bool,
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    version: u32,
    words: &'a BTreeMap<String, UserEntry>,
}

/// Learned words with usage counters.
///
/// Only promoted words count as known. Changes are kept in memory and
/// written out on promotion, on manual edits, every `flush_interval`
/// increments, and on [`UserDictionary::flush`].
#[derive(Debug)]
pub struct UserDictionary {
    entries: BTreeMap<String, UserEntry>,
    path: Option<PathBuf>,
    flush_interval: u32,
    pending: u32,
    dirty: bool,
}

impl Default for UserDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDictionary {
    /// In-memory dictionary that never touches disk.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            path: None,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            pending: 0,
            dirty: false,
        }
    }

    /// Opens the dictionary stored at `path`.
    ///
    /// Never fails: a missing file starts empty, an unreadable one is logged
    /// and also starts empty, and individual bad entries are skipped.
    pub fn open(path: &Path) -> Self {
        let mut dict = Self::new();
        dict.path = Some(path.to_path_buf());

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no user dictionary yet");
            return dict;
        }

        let parsed = fs::read_to_string(path)
            .map_err(|source| DictionaryError::Read {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| Self::parse(&text));

        match parsed {
            Ok((entries, skipped)) => {
                if skipped > 0 {
                    tracing::warn!(skipped, path = %path.display(), "skipped malformed user dictionary entries");
                }
                dict.entries = entries;
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "user dictionary unreadable, starting empty");
            }
        }

        dict
    }

    #[must_use]
    pub fn with_flush_interval(mut self, interval: u32) -> Self {
        self.flush_interval = interval.max(1);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parses the persisted form. Returns the entries and the number of skipped ones.
    ///
    /// Accepts `{"version": 1, "words": {...}}` as well as a bare `{word: count}` map.
    /// Entry values are either `{"count": n, "promoted": b}` or a plain count.
    fn parse(text: &str) -> Result<(BTreeMap<String, UserEntry>, usize), DictionaryError> {
        let value: Value = serde_json::from_str(text)?;

        let words = match value.get("words").cloned() {
            Some(Value::Object(words)) => words,
            Some(_) => {
                return Err(DictionaryError::Json(serde::de::Error::custom(
                    "`words` is not an object",
                )));
            }
            None => match value {
                Value::Object(mut flat) => {
                    flat.remove("version");
                    flat
                }
                _ => {
                    return Err(DictionaryError::Json(serde::de::Error::custom(
                        "top level is not an object",
                    )));
                }
            },
        };

        let mut entries: BTreeMap<String, UserEntry> = BTreeMap::new();
        let mut skipped = 0usize;

        for (word, raw) in words {
            let Some(key) = lookup_key(&word) else {
                skipped += 1;
                continue;
            };

            let entry = match raw {
                Value::Number(n) => n
                    .as_u64()
                    .and_then(|c| u32::try_from(c).ok())
                    .map(|count| UserEntry {
                        count,
                        promoted: false,
                    }),
                obj @ Value::Object(_) => serde_json::from_value::<UserEntry>(obj).ok(),
                _ => None,
            };

            let Some(entry) = entry else {
                tracing::trace!(%word, "skipping malformed entry");
                skipped += 1;
                continue;
            };

            let slot = entries.entry(key).or_default();
            slot.count = slot.count.max(entry.count);
            slot.promoted |= entry.promoted;
        }

        Ok((entries, skipped))
    }

    pub fn to_json(&self) -> Result<String, DictionaryError> {
        let persisted = PersistedRef {
            version: FORMAT_VERSION,
            words: &self.entries,
        };
        Ok(serde_json::to_string_pretty(&persisted)?)
    }

    /// Writes the dictionary to `path` atomically (temp file in the same directory, then rename).
    pub fn save_to(&self, path: &Path) -> Result<(), DictionaryError> {
        let write_err = |source: std::io::Error| DictionaryError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir).map_err(write_err)?;

        let json = self.to_json()?;
        let temp_file = NamedTempFile::new_in(parent_dir).map_err(write_err)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            writer.write_all(json.as_bytes()).map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }
        temp_file.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Persists pending changes, if any and if the dictionary has a path.
    pub fn flush(&mut self) -> Result<(), DictionaryError> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = self.path.clone() else {
            self.dirty = false;
            self.pending = 0;
            return Ok(());
        };

        self.save_to(&path)?;
        self.dirty = false;
        self.pending = 0;
        tracing::debug!(path = %path.display(), words = self.entries.len(), "user dictionary flushed");
        Ok(())
    }

    fn flush_logged(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "user dictionary flush failed");
        }
    }

    /// Bumps the usage counter of `word` and returns the new count.
    ///
    /// Words with digits or mixed alphabets are not counted and return 0.
    pub fn increment(&mut self, word: &str) -> u32 {
        if !is_learnable(word) {
            return 0;
        }
        let Some(key) = lookup_key(word) else {
            return 0;
        };

        let entry = self.entries.entry(key).or_default();
        entry.count = entry.count.saturating_add(1);
        let count = entry.count;

        self.dirty = true;
        self.pending += 1;
        if self.pending >= self.flush_interval {
            self.flush_logged();
        }
        count
    }

    /// Marks `word` as known. The counter is kept for reference.
    pub fn promote(&mut self, word: &str) {
        let Some(key) = lookup_key(word) else {
            return;
        };
        self.entries.entry(key).or_default().promoted = true;
        self.dirty = true;
        self.flush_logged();
    }

    /// Adds `word` as known right away, without going through the counter.
    pub fn add_word(&mut self, word: &str) {
        self.promote(word);
    }

    /// Forgets `word` entirely, counter included. Returns whether it was present.
    pub fn remove_word(&mut self, word: &str) -> bool {
        let Some(key) = lookup_key(word) else {
            return false;
        };
        let removed = self.entries.remove(&key).is_some();
        if removed {
            self.dirty = true;
            self.flush_logged();
        }
        removed
    }

    pub fn count(&self, word: &str) -> u32 {
        lookup_key(word)
            .and_then(|key| self.entries.get(&key))
            .map_or(0, |e| e.count)
    }

    pub fn is_promoted(&self, word: &str) -> bool {
        lookup_key(word)
            .and_then(|key| self.entries.get(&key))
            .is_some_and(|e| e.promoted)
    }

    pub fn entry(&self, word: &str) -> Option<UserEntry> {
        lookup_key(word).and_then(|key| self.entries.get(&key).copied())
    }

    /// Known (promoted) words, sorted.
    pub fn words(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.promoted)
            .map(|(w, _)| w.clone())
            .collect()
    }

    /// Words still being counted.
    pub fn learning_len(&self) -> usize {
        self.entries.values().filter(|e| !e.promoted).count()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl WordSource for UserDictionary {
    fn name(&self) -> &'static str {
        "user"
    }

    fn contains(&self, word: &str) -> bool {
        self.is_promoted(word)
    }

    fn len(&self) -> usize {
        self.entries.values().filter(|e| e.promoted).count()
    }
}
