use crate::{
    config::constants::DEFAULT_AUTO_LEARN_THRESHOLD,
    dictionary::{Lexicon, is_learnable, lookup_key},
};

/// Why a word is being observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LearnSource {
    /// Typed and left alone.
    Observed,
    /// Produced by an automatic correction.
    Auto,
    /// Produced by a manual remap.
    Manual,
    /// Restored by undo: the user insisted on this form.
    Undo,
}

impl LearnSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LearnSource::Observed => "observed",
            LearnSource::Auto => "auto",
            LearnSource::Manual => "manual",
            LearnSource::Undo => "undo",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LearnOutcome {
    /// Not something worth learning (no letters, digits, mixed script).
    Ignored,
    /// Some dictionary already knows it.
    AlreadyKnown,
    /// Counted but below the threshold.
    Counted(u32),
    /// Crossed the threshold and became a known word.
    Promoted,
}

/// Counts words the dictionaries don't know and promotes them once seen often enough.
#[derive(Debug, Clone)]
pub struct LearningTracker {
    threshold: u32,
}

impl Default for LearningTracker {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_LEARN_THRESHOLD)
    }
}

impl LearningTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn observe(&self, word: &str, source: LearnSource, lexicon: &mut Lexicon) -> LearnOutcome {
        if !is_learnable(word) {
            return LearnOutcome::Ignored;
        }
        let Some(key) = lookup_key(word) else {
            return LearnOutcome::Ignored;
        };
        if lexicon.contains(&key) {
            return LearnOutcome::AlreadyKnown;
        }

        let user = lexicon.user_mut();
        let count = user.increment(&key);
        if count < self.threshold {
            tracing::trace!(word = %key, count, source = source.as_str(), "word counted");
            return LearnOutcome::Counted(count);
        }

        user.promote(&key);
        tracing::info!(word = %key, count, source = source.as_str(), "word learned");
        LearnOutcome::Promoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Language, UserDictionary, WordList};

    fn lexicon() -> Lexicon {
        Lexicon::new(
            WordList::from_words(Language::English, ["hello"]),
            WordList::from_words(Language::Russian, ["привет"]),
            UserDictionary::new(),
        )
    }

    #[test]
    fn promotes_at_threshold() {
        let tracker = LearningTracker::new(3);
        let mut lex = lexicon();
        assert_eq!(tracker.observe("rustacean", LearnSource::Observed, &mut lex), LearnOutcome::Counted(1));
        assert_eq!(tracker.observe("Rustacean", LearnSource::Observed, &mut lex), LearnOutcome::Counted(2));
        assert!(!lex.contains("rustacean"));
        assert_eq!(tracker.observe("rustacean,", LearnSource::Observed, &mut lex), LearnOutcome::Promoted);
        assert!(lex.contains("rustacean"));
        assert_eq!(tracker.observe("rustacean", LearnSource::Observed, &mut lex), LearnOutcome::AlreadyKnown);
    }

    #[test]
    fn known_and_junk_words_are_not_counted() {
        let tracker = LearningTracker::default();
        let mut lex = lexicon();
        assert_eq!(tracker.observe("Hello", LearnSource::Auto, &mut lex), LearnOutcome::AlreadyKnown);
        assert_eq!(tracker.observe("abc123", LearnSource::Observed, &mut lex), LearnOutcome::Ignored);
        assert_eq!(tracker.observe("2fa", LearnSource::Observed, &mut lex), LearnOutcome::Ignored);
        assert_eq!(tracker.observe("helloМир", LearnSource::Observed, &mut lex), LearnOutcome::Ignored);
        assert_eq!(tracker.observe("...", LearnSource::Observed, &mut lex), LearnOutcome::Ignored);
        assert_eq!(lex.user().learning_len(), 0);
    }

    #[test]
    fn threshold_of_one_promotes_immediately() {
        let tracker = LearningTracker::new(1);
        let mut lex = lexicon();
        assert_eq!(tracker.observe("ferris", LearnSource::Undo, &mut lex), LearnOutcome::Promoted);
    }
}
