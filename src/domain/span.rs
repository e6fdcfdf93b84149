/// Run of characters in the host's text stream, counted in `char`s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Span covering `text` starting at `start`.
    pub fn of_text(start: usize, text: &str) -> Self {
        Self::new(start, text.chars().count())
    }

    pub const fn end(self) -> usize {
        self.start + self.len
    }

    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}
