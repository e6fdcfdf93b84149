use std::collections::VecDeque;

use ruswitch_core::maps_to_letter;

use crate::domain::Span;

const DEFAULT_CAPACITY: usize = 100;

/// Whether `ch` continues the current word.
///
/// Keys that give a letter in the other layout count too: `,` is `б` and
/// `;` is `ж`, so `j,kfrf` stays one word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || maps_to_letter(ch) || matches!(ch, '\'' | '-')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedWord {
    pub word: String,
    pub span: Span,
    /// The character that ended the word. Not part of `span`.
    pub boundary: char,
}

/// Tail of the typed text with absolute positions.
///
/// Keeps the last `cap` characters. `position` is the index of the next
/// character the host will receive, so spans can be handed to an injector.
#[derive(Debug, Clone)]
pub struct WordBuffer {
    cap: usize,
    buf: VecDeque<char>,
    position: usize,
    truncated: bool,
}

impl Default for WordBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl WordBuffer {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            cap,
            buf: VecDeque::with_capacity(cap),
            position: 0,
            truncated: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn text(&self) -> String {
        self.buf.iter().collect()
    }

    fn front(&self) -> usize {
        self.position - self.buf.len()
    }

    fn push_char(&mut self, ch: char) {
        self.buf.push_back(ch);
        self.position += 1;
        self.trim_to_cap();
    }

    fn trim_to_cap(&mut self) {
        while self.buf.len() > self.cap {
            let _ = self.buf.pop_front();
            self.truncated = true;
        }
    }

    /// Appends text without treating any of it as a boundary.
    pub fn push_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.push_char(ch);
        }
    }

    /// Records one typed character. Returns the word it completed, if any.
    pub fn feed(&mut self, ch: char) -> Option<CompletedWord> {
        if is_word_char(ch) {
            self.push_char(ch);
            return None;
        }

        let run = self.buf.iter().rev().take_while(|c| is_word_char(**c)).count();
        let reaches_front = run == self.buf.len();
        let word: String = self.buf.iter().skip(self.buf.len() - run).collect();
        let start = self.position - run;
        self.push_char(ch);

        if run == 0 {
            return None;
        }
        if reaches_front && self.truncated {
            tracing::trace!(len = run, "word start fell out of the buffer");
            return None;
        }
        Some(CompletedWord {
            span: Span::of_text(start, &word),
            word,
            boundary: ch,
        })
    }

    pub fn backspace(&mut self) {
        let _ = self.buf.pop_back();
        self.position = self.position.saturating_sub(1);
    }

    /// Forgets the typed tail, e.g. after the caret moved. Position is kept.
    pub fn invalidate(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }

    /// Forgets the typed tail and moves to a known caret position.
    pub fn reset(&mut self, position: usize) {
        self.invalidate();
        self.position = position;
    }

    /// Last run of non-whitespace characters and its span, trailing whitespace skipped.
    pub fn last_word(&self) -> Option<(String, Span)> {
        let suffix = self.buf.iter().rev().take_while(|c| c.is_whitespace()).count();
        let token = self
            .buf
            .iter()
            .rev()
            .skip(suffix)
            .take_while(|c| !c.is_whitespace())
            .count();
        if token == 0 {
            return None;
        }

        let from = self.buf.len() - suffix - token;
        let word: String = self.buf.iter().skip(from).take(token).collect();
        let span = Span::of_text(self.front() + from, &word);
        Some((word, span))
    }

    /// Mirrors a replacement made in the host so later spans stay correct.
    pub fn apply_replacement(&mut self, span: Span, text: &str) {
        if span.end() > self.position {
            tracing::debug!(%span, position = self.position, "replacement past the caret, buffer reset");
            self.invalidate();
            return;
        }

        let new_len = text.chars().count();
        let front = self.front();
        if span.start < front {
            self.invalidate();
        } else {
            let tail: Vec<char> = self.buf.drain(span.end() - front..).collect();
            self.buf.truncate(span.start - front);
            self.buf.extend(text.chars());
            self.buf.extend(tail);
        }
        self.position = self.position - span.len + new_len;
        self.trim_to_cap();
    }
}
