//! Word sources consulted by the classifier.
//!
//! Two read-only built-in lists (English, Russian) and the learned user
//! dictionary all implement [`WordSource`]; [`Lexicon`] queries them in a
//! fixed order.

pub mod user;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use ruswitch_core::{Script, detect_script};
pub use user::{UserDictionary, UserEntry};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed user dictionary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Language::English => "en_words.txt",
            Language::Russian => "ru_words.txt",
        }
    }
}

/// Anything that can answer "is this a real word?".
///
/// Lookups are case-insensitive and exact: no fuzzy matching.
pub trait WordSource {
    fn name(&self) -> &'static str;

    fn contains(&self, word: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dictionary key for a typed form: edge punctuation stripped, lowercased.
///
/// `Hello,` and `hello` share the key `hello`. Returns `None` when nothing
/// alphabetic is left.
pub fn lookup_key(word: &str) -> Option<String> {
    let core = word.trim_matches(|c: char| !c.is_alphabetic());
    if core.is_empty() {
        return None;
    }
    Some(core.to_lowercase())
}

/// Whether `word` may be counted towards learning: no digits and one alphabet.
///
/// Checked on the raw form, before [`lookup_key`] trims digits off the edges.
pub fn is_learnable(word: &str) -> bool {
    !word.chars().any(|c| c.is_ascii_digit()) && detect_script(word) != Script::Mixed
}

/// Read-only word set loaded once at startup.
#[derive(Debug, Clone)]
pub struct WordList {
    language: Language,
    words: HashSet<String>,
}

impl WordList {
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            words: HashSet::new(),
        }
    }

    pub fn from_words<I, S>(language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { language, words }
    }

    /// Loads a list with one word per line. Blank lines are ignored.
    pub fn load(language: Language, path: &Path) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(language, content.lines()))
    }

    /// Like [`WordList::load`], but a missing or unreadable file yields an empty list.
    pub fn load_or_empty(language: Language, path: &Path) -> Self {
        match Self::load(language, path) {
            Ok(list) => {
                tracing::debug!(lang = language.as_str(), words = list.len(), "word list loaded");
                list
            }
            Err(e) => {
                tracing::warn!(lang = language.as_str(), error = %e, "word list unavailable, continuing without it");
                Self::empty(language)
            }
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl WordSource for WordList {
    fn name(&self) -> &'static str {
        self.language.as_str()
    }

    fn contains(&self, word: &str) -> bool {
        lookup_key(word).is_some_and(|key| self.words.contains(&key))
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexiconStats {
    pub en_base: usize,
    pub ru_base: usize,
    pub user_known: usize,
    pub learning: usize,
}

/// The three word sources, queried English, Russian, then user.
#[derive(Debug)]
pub struct Lexicon {
    english: WordList,
    russian: WordList,
    user: UserDictionary,
}

impl Lexicon {
    pub fn new(english: WordList, russian: WordList, user: UserDictionary) -> Self {
        Self {
            english,
            russian,
            user,
        }
    }

    /// Loads `en_words.txt` and `ru_words.txt` from `dict_dir`. Missing files degrade to empty lists.
    pub fn load(dict_dir: &Path, user: UserDictionary) -> Self {
        let english = WordList::load_or_empty(
            Language::English,
            &dict_dir.join(Language::English.file_name()),
        );
        let russian = WordList::load_or_empty(
            Language::Russian,
            &dict_dir.join(Language::Russian.file_name()),
        );
        let lexicon = Self::new(english, russian, user);
        let stats = lexicon.stats();
        tracing::info!(
            en_base = stats.en_base,
            ru_base = stats.ru_base,
            user_known = stats.user_known,
            learning = stats.learning,
            "dictionaries loaded"
        );
        lexicon
    }

    fn sources(&self) -> [&dyn WordSource; 3] {
        [&self.english, &self.russian, &self.user]
    }

    /// Name of the first source that knows `word`.
    pub fn recognizes(&self, word: &str) -> Option<&'static str> {
        self.sources()
            .into_iter()
            .find(|source| source.contains(word))
            .map(|source| source.name())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.recognizes(word).is_some()
    }

    pub fn user(&self) -> &UserDictionary {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserDictionary {
        &mut self.user
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            en_base: self.english.len(),
            ru_base: self.russian.len(),
            user_known: self.user.len(),
            learning: self.user.learning_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::new(
            WordList::from_words(Language::English, ["hello", "world"]),
            WordList::from_words(Language::Russian, ["привет", "мир"]),
            UserDictionary::new(),
        )
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let lex = lexicon();
        assert_eq!(lex.recognizes("Hello"), Some("en"));
        assert_eq!(lex.recognizes("ПРИВЕТ"), Some("ru"));
        assert_eq!(lex.recognizes("unknown"), None);
    }

    #[test]
    fn lookup_ignores_edge_punctuation() {
        let lex = lexicon();
        assert!(lex.contains("hello,"));
        assert!(lex.contains("«мир»"));
        assert!(!lex.contains(",."));
    }

    #[test]
    fn user_source_comes_last() {
        let mut lex = lexicon();
        lex.user_mut().add_word("kubectl");
        assert_eq!(lex.recognizes("kubectl"), Some("user"));
        lex.user_mut().add_word("hello");
        assert_eq!(lex.recognizes("hello"), Some("en"));
    }

    #[test]
    fn word_list_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_words.txt");
        fs::write(&path, "Hello\n\n  world  \n").unwrap();
        let list = WordList::load(Language::English, &path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("world"));
    }

    #[test]
    fn missing_word_list_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lex = Lexicon::load(dir.path(), UserDictionary::new());
        assert_eq!(lex.stats(), LexiconStats::default());
        assert!(!lex.contains("hello"));
    }
}
