//! The correction engine.
//!
//! Every entry point handles one event from the capture layer and does at
//! most one replacement, one undo push and one learning update.

use std::collections::HashSet;

use ruswitch_core::Word;

use crate::{
    config::Config,
    conversion::{InjectionError, TextInjector},
    dictionary::{DictionaryError, Lexicon},
    domain::{
        ActionOutcome, CorrectionRecord, CorrectionSource, Failure, LearnSource, LearningTracker,
        NoRecentCorrection, Replacement, SkipReason, Span, UndoSlot, WordClassifier,
    },
    util::{Clock, SystemClock},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    WordCompleted {
        word: String,
        span: Span,
        process: String,
    },
    ManualRemap {
        text: String,
        span: Span,
        process: String,
    },
    Toggle,
    Undo,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error(transparent)]
    NoRecentCorrection(#[from] NoRecentCorrection),
    #[error("failed to restore the original text: {0}")]
    Injection(#[source] InjectionError),
}

pub struct CorrectionEngine<I, C = SystemClock> {
    lexicon: Lexicon,
    classifier: WordClassifier,
    tracker: LearningTracker,
    undo: UndoSlot,
    injector: I,
    clock: C,
    enabled: bool,
    excluded: HashSet<String>,
}

impl<I: TextInjector> CorrectionEngine<I, SystemClock> {
    pub fn new(lexicon: Lexicon, injector: I, config: &Config) -> Self {
        Self {
            lexicon,
            classifier: WordClassifier::new(config.min_word_length),
            tracker: LearningTracker::new(config.auto_learn_threshold),
            undo: UndoSlot::new(config.undo_window()),
            injector,
            clock: SystemClock,
            enabled: config.auto_mode,
            excluded: config.exclusion_set(),
        }
    }
}

/// Skip reasons after which the typed word is still worth counting.
fn counts_as_typed_word(reason: SkipReason) -> bool {
    matches!(
        reason,
        SkipReason::AlreadyCorrect | SkipReason::Unrecognized | SkipReason::NoChangeAfterConvert
    )
}

impl<I: TextInjector, C: Clock> CorrectionEngine<I, C> {
    /// Swaps the time source. Undo expiry is measured against it.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> CorrectionEngine<I, C2> {
        CorrectionEngine {
            lexicon: self.lexicon,
            classifier: self.classifier,
            tracker: self.tracker,
            undo: self.undo,
            injector: self.injector,
            clock,
            enabled: self.enabled,
            excluded: self.excluded,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        tracing::info!(enabled, "auto correction state set");
    }

    /// Flips auto correction and returns the new state. Applies from the next word.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn is_excluded(&self, process: &str) -> bool {
        self.excluded.contains(&process.trim().to_ascii_lowercase())
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn injector_mut(&mut self) -> &mut I {
        &mut self.injector
    }

    pub fn last_correction(&self) -> Option<&CorrectionRecord> {
        self.undo.peek()
    }

    pub fn on_word_completed(&mut self, word: &str, span: Span, process: &str) -> ActionOutcome {
        if self.is_excluded(process) {
            tracing::trace!(process, "autoconvert skip: excluded process");
            return ActionOutcome::Skipped(SkipReason::ExcludedProcess);
        }
        if !self.enabled {
            return ActionOutcome::Skipped(SkipReason::Disabled);
        }

        let typed = Word::new(word);
        match self.classifier.check(&typed, &self.lexicon) {
            Ok(candidate) => self.apply(
                word,
                candidate.text().to_string(),
                span,
                CorrectionSource::Auto,
            ),
            Err(reason) => {
                tracing::trace!(word, reason = %reason.as_str(), "autoconvert skip");
                if counts_as_typed_word(reason) {
                    self.tracker
                        .observe(word, LearnSource::Observed, &mut self.lexicon);
                }
                ActionOutcome::Skipped(reason)
            }
        }
    }

    /// Remaps `text` unconditionally. Works while auto correction is off.
    pub fn on_manual_remap(&mut self, text: &str, span: Span, process: &str) -> ActionOutcome {
        if self.is_excluded(process) {
            tracing::trace!(process, "manual remap skip: excluded process");
            return ActionOutcome::Skipped(SkipReason::ExcludedProcess);
        }
        if text.is_empty() {
            return ActionOutcome::Skipped(SkipReason::EmptyText);
        }

        let typed = Word::new(text);
        let converted = typed.remap();
        if converted.text() == text {
            tracing::trace!(text, reason = %SkipReason::NoChangeAfterConvert.as_str(), "manual remap skip");
            return ActionOutcome::Skipped(SkipReason::NoChangeAfterConvert);
        }

        self.apply(
            text,
            converted.text().to_string(),
            span,
            CorrectionSource::Manual,
        )
    }

    fn apply(
        &mut self,
        original: &str,
        corrected: String,
        span: Span,
        source: CorrectionSource,
    ) -> ActionOutcome {
        if let Err(e) = self.injector.replace(span, &corrected) {
            tracing::warn!(error = %e, %span, source = source.as_str(), "injection failed, correction dropped");
            return ActionOutcome::Failed(Failure::InjectionError);
        }

        tracing::debug!(original, corrected = %corrected, %span, source = source.as_str(), "correction applied");

        self.undo.push(CorrectionRecord {
            original: original.to_string(),
            corrected: corrected.clone(),
            span,
            created_at: self.clock.now(),
            source,
        });

        let learn_source = match source {
            CorrectionSource::Auto => LearnSource::Auto,
            CorrectionSource::Manual => LearnSource::Manual,
        };
        self.tracker
            .observe(&corrected, learn_source, &mut self.lexicon);

        ActionOutcome::Replaced(Replacement {
            span,
            text: corrected,
        })
    }

    /// Restores the original text of the last correction if it is recent enough.
    ///
    /// The slot is consumed even when restoring fails. An undone automatic
    /// correction counts the original as a typed word, so a word undone often
    /// enough is learned and left alone.
    pub fn undo_last(&mut self) -> Result<CorrectionRecord, UndoError> {
        let record = self.undo.take_if_fresh(self.clock.now()).inspect_err(|_| {
            tracing::debug!(reason = %SkipReason::NoRecentCorrection.as_str(), "undo skip");
        })?;

        self.injector
            .replace(record.corrected_span(), &record.original)
            .map_err(|e| {
                tracing::warn!(error = %e, span = %record.corrected_span(), "undo injection failed");
                UndoError::Injection(e)
            })?;

        tracing::info!(
            original = %record.original,
            corrected = %record.corrected,
            source = record.source.as_str(),
            "correction undone"
        );

        if record.source == CorrectionSource::Auto {
            self.tracker
                .observe(&record.original, LearnSource::Undo, &mut self.lexicon);
        }
        Ok(record)
    }

    pub fn dispatch(&mut self, event: EngineEvent) -> ActionOutcome {
        match event {
            EngineEvent::WordCompleted {
                word,
                span,
                process,
            } => self.on_word_completed(&word, span, &process),
            EngineEvent::ManualRemap {
                text,
                span,
                process,
            } => self.on_manual_remap(&text, span, &process),
            EngineEvent::Toggle => {
                self.toggle();
                ActionOutcome::Applied
            }
            EngineEvent::Undo => match self.undo_last() {
                Ok(record) => ActionOutcome::Replaced(Replacement {
                    span: Span::of_text(record.span.start, &record.original),
                    text: record.original,
                }),
                Err(UndoError::NoRecentCorrection(_)) => {
                    ActionOutcome::Skipped(SkipReason::NoRecentCorrection)
                }
                Err(UndoError::Injection(_)) => ActionOutcome::Failed(Failure::InjectionError),
            },
        }
    }

    /// Adds `word` to the user dictionary as known.
    pub fn add_word(&mut self, word: &str) {
        self.lexicon.user_mut().add_word(word);
        tracing::info!(word, "word added to user dictionary");
    }

    pub fn remove_word(&mut self, word: &str) -> bool {
        let removed = self.lexicon.user_mut().remove_word(word);
        tracing::info!(word, removed, "word removed from user dictionary");
        removed
    }

    /// Writes pending user dictionary changes to disk.
    pub fn flush(&mut self) -> Result<(), DictionaryError> {
        self.lexicon.user_mut().flush()
    }
}
