use crate::domain::Span;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectionError {
    #[error("span {span} is outside of the text (length {len})")]
    OutOfRange { span: Span, len: usize },
    #[error("host rejected the replacement: {0}")]
    Rejected(String),
}

/// Writes text back into the host. The engine never retries a failed call.
pub trait TextInjector {
    /// Replaces the characters under `span` with `new_text`.
    fn replace(&mut self, span: Span, new_text: &str) -> Result<(), InjectionError>;
}

impl<T: TextInjector + ?Sized> TextInjector for &mut T {
    fn replace(&mut self, span: Span, new_text: &str) -> Result<(), InjectionError> {
        (**self).replace(span, new_text)
    }
}

/// In-memory document standing in for a text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptInjector {
    text: String,
}

impl TranscriptInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn backspace(&mut self) {
        let _ = self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn byte_offset(&self, char_idx: usize) -> Option<usize> {
        if char_idx == self.char_len() {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(char_idx).map(|(i, _)| i)
    }
}

impl TextInjector for TranscriptInjector {
    fn replace(&mut self, span: Span, new_text: &str) -> Result<(), InjectionError> {
        let out_of_range = || InjectionError::OutOfRange {
            span,
            len: self.char_len(),
        };
        let start = self.byte_offset(span.start).ok_or_else(out_of_range)?;
        let end = self.byte_offset(span.end()).ok_or_else(out_of_range)?;
        self.text.replace_range(start..end, new_text);
        tracing::trace!(%span, new_text, "transcript updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_by_char_span() {
        let mut doc = TranscriptInjector::with_text("ну ghbdtn мир");
        doc.replace(Span::new(3, 6), "привет").unwrap();
        assert_eq!(doc.as_str(), "ну привет мир");
    }

    #[test]
    fn replacement_may_change_length() {
        let mut doc = TranscriptInjector::with_text("abc def");
        doc.replace(Span::new(4, 3), "x").unwrap();
        assert_eq!(doc.as_str(), "abc x");
        doc.replace(Span::new(5, 0), "yz").unwrap();
        assert_eq!(doc.as_str(), "abc xyz");
    }

    #[test]
    fn out_of_range_is_rejected_without_change() {
        let mut doc = TranscriptInjector::with_text("abc");
        let err = doc.replace(Span::new(2, 5), "zz").unwrap_err();
        assert_eq!(
            err,
            InjectionError::OutOfRange {
                span: Span::new(2, 5),
                len: 3
            }
        );
        assert_eq!(doc.as_str(), "abc");
    }
}
