/// Capitalization shape of a word, computed over its alphabetic characters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CasePattern {
    Lower,
    Upper,
    /// First letter uppercase, the rest lowercase. A single uppercase letter counts here.
    Capitalized,
    Mixed,
    /// No alphabetic characters.
    Uncased,
}

impl CasePattern {
    #[must_use]
    pub fn of(text: &str) -> Self {
        let mut letters = text.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return Self::Uncased;
        };

        let mut rest_lower = true;
        let mut rest_upper = true;
        let mut rest_len = 0usize;
        for ch in letters {
            rest_len += 1;
            rest_lower &= ch.is_lowercase();
            rest_upper &= ch.is_uppercase();
        }

        match (first.is_uppercase(), rest_lower, rest_upper) {
            (false, true, _) => Self::Lower,
            (true, true, _) if rest_len == 0 => Self::Capitalized,
            (true, _, true) if rest_len > 0 => Self::Upper,
            (true, true, _) => Self::Capitalized,
            _ => Self::Mixed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Capitalized => "capitalized",
            Self::Mixed => "mixed",
            Self::Uncased => "uncased",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CasePattern;

    #[test]
    fn patterns() {
        assert_eq!(CasePattern::of("hello"), CasePattern::Lower);
        assert_eq!(CasePattern::of("HELLO"), CasePattern::Upper);
        assert_eq!(CasePattern::of("Hello"), CasePattern::Capitalized);
        assert_eq!(CasePattern::of("Я"), CasePattern::Capitalized);
        assert_eq!(CasePattern::of("hELLo"), CasePattern::Mixed);
        assert_eq!(CasePattern::of("ПрИвет"), CasePattern::Mixed);
        assert_eq!(CasePattern::of("123"), CasePattern::Uncased);
        assert_eq!(CasePattern::of("hello,"), CasePattern::Lower);
    }
}
