use std::sync::LazyLock;

use regex::RegexSet;
use ruswitch_core::{Script, Word};

use super::outcome::SkipReason;
use crate::{config::constants::DEFAULT_MIN_WORD_LENGTH, dictionary::Lexicon};

/// Tokens that are never words: URLs, e-mails, file paths, separated numbers.
static SKIP_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)^https?://\S+$",
        r"^\S+@\S+\.\S+$",
        r"^[a-zA-Z]:\\\S+$",
        r"^/[\w/]+$",
        r"^\d+[\d.,]+\d*$",
    ])
    .unwrap_or_else(|_| RegexSet::empty())
});

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    KeepAsTyped,
    SwitchLayout,
}

/// Decides whether a completed word was typed in the wrong layout.
#[derive(Debug, Clone)]
pub struct WordClassifier {
    min_word_length: usize,
}

impl Default for WordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WORD_LENGTH)
    }
}

fn ensure_has_letters(word: &Word) -> Result<(), SkipReason> {
    if word.text().chars().any(char::is_alphabetic) {
        return Ok(());
    }
    Err(SkipReason::NotAWord)
}

fn ensure_not_mixed(word: &Word) -> Result<(), SkipReason> {
    if word.script() == Script::Mixed {
        return Err(SkipReason::MixedScript);
    }
    Ok(())
}

fn ensure_no_digits(word: &Word) -> Result<(), SkipReason> {
    if word.text().chars().any(|c| c.is_ascii_digit()) {
        return Err(SkipReason::HasDigits);
    }
    Ok(())
}

fn ensure_not_skip_pattern(word: &Word) -> Result<(), SkipReason> {
    if SKIP_PATTERNS.is_match(word.text()) {
        return Err(SkipReason::SkipPattern);
    }
    Ok(())
}

fn ensure_changed(word: &Word, converted: &Word) -> Result<(), SkipReason> {
    if word.text() != converted.text() {
        return Ok(());
    }
    Err(SkipReason::NoChangeAfterConvert)
}

impl WordClassifier {
    pub fn new(min_word_length: usize) -> Self {
        Self {
            min_word_length: min_word_length.max(1),
        }
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    fn ensure_long_enough(&self, word: &Word) -> Result<(), SkipReason> {
        if word.char_len() < self.min_word_length {
            return Err(SkipReason::TooShort);
        }
        Ok(())
    }

    /// Returns the remapped word when the typed form should be replaced,
    /// or the reason it stays as typed.
    ///
    /// The typed form wins whenever a dictionary knows it, even if the remap
    /// is also a known word. When neither form is known the word is kept.
    pub fn check(&self, word: &Word, lexicon: &Lexicon) -> Result<Word, SkipReason> {
        ensure_has_letters(word)?;
        self.ensure_long_enough(word)?;
        ensure_not_mixed(word)?;
        ensure_no_digits(word)?;
        ensure_not_skip_pattern(word)?;

        if let Some(source) = lexicon.recognizes(word.text()) {
            tracing::trace!(%word, source, "typed form recognized");
            return Err(SkipReason::AlreadyCorrect);
        }

        let candidate = word.remap();
        ensure_changed(word, &candidate)?;

        match lexicon.recognizes(candidate.text()) {
            Some(source) => {
                tracing::trace!(%word, %candidate, source, "remapped form recognized");
                Ok(candidate)
            }
            None => Err(SkipReason::Unrecognized),
        }
    }

    pub fn classify(&self, word: &Word, lexicon: &Lexicon) -> Decision {
        match self.check(word, lexicon) {
            Ok(_) => Decision::SwitchLayout,
            Err(_) => Decision::KeepAsTyped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Language, UserDictionary, WordList};

    fn lexicon() -> Lexicon {
        Lexicon::new(
            WordList::from_words(Language::English, ["hello", "world", "code", "test"]),
            WordList::from_words(Language::Russian, ["привет", "мир", "код", "тест", "облака"]),
            UserDictionary::new(),
        )
    }

    fn check(word: &str) -> Result<String, SkipReason> {
        WordClassifier::default()
            .check(&Word::new(word), &lexicon())
            .map(|w| w.text().to_string())
    }

    #[test]
    fn known_words_are_kept() {
        assert_eq!(check("hello"), Err(SkipReason::AlreadyCorrect));
        assert_eq!(check("привет"), Err(SkipReason::AlreadyCorrect));
        assert_eq!(check("Hello,"), Err(SkipReason::AlreadyCorrect));
    }

    #[test]
    fn wrong_layout_words_switch() {
        assert_eq!(check("ghbdtn").as_deref(), Ok("привет"));
        assert_eq!(check("руддщ").as_deref(), Ok("hello"));
        assert_eq!(check("Руддщ").as_deref(), Ok("Hello"));
        assert_eq!(check("j,kfrf").as_deref(), Ok("облака"));
    }

    #[test]
    fn trailing_punctuation_key_is_remapped_with_the_word() {
        // `б` sits on the comma key
        assert_eq!(check("руддщб").as_deref(), Ok("hello,"));
    }

    #[test]
    fn unknown_in_both_layouts_is_kept() {
        assert_eq!(check("xyzabc"), Err(SkipReason::Unrecognized));
    }

    #[test]
    fn structural_skips() {
        assert_eq!(check("a"), Err(SkipReason::TooShort));
        assert_eq!(check("test123"), Err(SkipReason::HasDigits));
        assert_eq!(check("helloМир"), Err(SkipReason::MixedScript));
        assert_eq!(check("1,5"), Err(SkipReason::NotAWord));
        assert_eq!(check("https://ghbdtn"), Err(SkipReason::SkipPattern));
        assert_eq!(check("/usr/ghbdtn"), Err(SkipReason::SkipPattern));
    }

    #[test]
    fn classify_maps_check() {
        let classifier = WordClassifier::default();
        let lex = lexicon();
        assert_eq!(
            classifier.classify(&Word::new("ghbdtn"), &lex),
            Decision::SwitchLayout
        );
        assert_eq!(
            classifier.classify(&Word::new("hello"), &lex),
            Decision::KeepAsTyped
        );
    }
}
