use super::{
    case::CasePattern,
    mapping::{
        ConversionDirection, Script, conversion_direction_by_keys, conversion_direction_for_text,
        convert_with_direction, detect_script,
    },
};

/// A word as typed, with its case pattern captured at construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    text: String,
    case: CasePattern,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let case = CasePattern::of(&text);
        Self { text, case }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn case(&self) -> CasePattern {
        self.case
    }

    pub fn script(&self) -> Script {
        detect_script(&self.text)
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Lowercase form used as a dictionary key.
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }

    /// Direction that moves this word into the other layout.
    ///
    /// Decided once for the whole word so that punctuation keys stay reversible.
    /// A token without letters goes the way its keys turn into letters.
    pub fn remap_direction(&self) -> ConversionDirection {
        match self.script() {
            Script::Latin => ConversionDirection::EnToRu,
            Script::Cyrillic => ConversionDirection::RuToEn,
            Script::Mixed => conversion_direction_for_text(&self.text)
                .unwrap_or(ConversionDirection::RuToEn),
            Script::Other => conversion_direction_by_keys(&self.text)
                .unwrap_or(ConversionDirection::RuToEn),
        }
    }

    /// Remaps the word to the opposite layout, keeping the case of every letter.
    #[must_use]
    pub fn remap(&self) -> Word {
        self.remap_with_direction(self.remap_direction())
    }

    #[must_use]
    pub fn remap_with_direction(&self, direction: ConversionDirection) -> Word {
        Word::new(convert_with_direction(&self.text, direction))
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_keeps_capitalization() {
        let w = Word::new("Руддщ");
        let r = w.remap();
        assert_eq!(r.text(), "Hello");
        assert_eq!(r.case(), CasePattern::Capitalized);
    }

    #[test]
    fn remap_twice_is_identity() {
        let samples = [
            "ghbdtn", "GHBDTN", "Ghbdtn", "привет", "Жук", "j,kfrf", "ёлка", "ёж", "Ёж", "`;", "бю",
        ];
        for s in samples {
            assert_eq!(Word::new(s).remap().remap().text(), s);
        }
    }

    #[test]
    fn unmapped_chars_pass_through() {
        assert_eq!(Word::new("abc123").remap().text(), "фис123");
        assert_eq!(Word::new("").remap().text(), "");
    }
}
