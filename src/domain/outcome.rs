use super::span::Span;

/// What an engine entry point did with an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Text under `span` was replaced with `text`.
    Replaced(Replacement),
    /// State changed without touching the text (toggle).
    Applied,
    Skipped(SkipReason),
    Failed(Failure),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub text: String,
}

impl ActionOutcome {
    pub fn replacement(&self) -> Option<&Replacement> {
        match self {
            ActionOutcome::Replaced(r) => Some(r),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ActionOutcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    ExcludedProcess,
    EmptyText,
    NotAWord,
    TooShort,
    MixedScript,
    HasDigits,
    SkipPattern,
    AlreadyCorrect,
    Unrecognized,
    NoChangeAfterConvert,
    NoRecentCorrection,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Disabled => "disabled",
            SkipReason::ExcludedProcess => "excluded_process",
            SkipReason::EmptyText => "empty_text",
            SkipReason::NotAWord => "not_a_word",
            SkipReason::TooShort => "too_short",
            SkipReason::MixedScript => "mixed_script",
            SkipReason::HasDigits => "has_digits",
            SkipReason::SkipPattern => "skip_pattern",
            SkipReason::AlreadyCorrect => "already_correct",
            SkipReason::Unrecognized => "unrecognized",
            SkipReason::NoChangeAfterConvert => "no_change_after_convert",
            SkipReason::NoRecentCorrection => "no_recent_correction",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    InjectionError,
}

impl Failure {
    pub fn as_str(self) -> &'static str {
        match self {
            Failure::InjectionError => "injection_error",
        }
    }
}
