use std::time::{Duration, SystemTime};

use super::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CorrectionSource {
    Auto,
    Manual,
}

impl CorrectionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionSource::Auto => "auto",
            CorrectionSource::Manual => "manual",
        }
    }
}

/// A replacement that can still be reverted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionRecord {
    pub original: String,
    pub corrected: String,
    /// Where `original` was before it got replaced.
    pub span: Span,
    pub created_at: SystemTime,
    pub source: CorrectionSource,
}

impl CorrectionRecord {
    /// Where `corrected` sits now. Differs from `span` when lengths differ.
    pub fn corrected_span(&self) -> Span {
        Span::of_text(self.span.start, &self.corrected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no recent correction to undo")]
pub struct NoRecentCorrection;

/// Holds at most one correction. A newer one overwrites the older.
#[derive(Debug, Clone)]
pub struct UndoSlot {
    last: Option<CorrectionRecord>,
    window: Duration,
}

impl UndoSlot {
    pub fn new(window: Duration) -> Self {
        Self { last: None, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, record: CorrectionRecord) {
        if let Some(previous) = self.last.replace(record) {
            tracing::trace!(dropped = %previous.corrected, "undo slot overwritten");
        }
    }

    pub fn peek(&self) -> Option<&CorrectionRecord> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Takes the stored correction if it is at most `window` old.
    ///
    /// An expired record is dropped. A clock that went backwards counts as zero elapsed.
    pub fn take_if_fresh(&mut self, now: SystemTime) -> Result<CorrectionRecord, NoRecentCorrection> {
        let record = self.last.take().ok_or(NoRecentCorrection)?;
        let elapsed = now.duration_since(record.created_at).unwrap_or_default();
        if elapsed > self.window {
            tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                window_ms = self.window.as_millis() as u64,
                "undo window expired"
            );
            return Err(NoRecentCorrection);
        }
        Ok(record)
    }
}
