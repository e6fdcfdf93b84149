pub mod classifier;
pub mod learning;
pub mod outcome;
pub mod span;
pub mod undo;

pub use classifier::{Decision, WordClassifier};
pub use learning::{LearnOutcome, LearnSource, LearningTracker};
pub use outcome::{ActionOutcome, Failure, Replacement, SkipReason};
pub use span::Span;
pub use undo::{CorrectionRecord, CorrectionSource, NoRecentCorrection, UndoSlot};
