/// Direction of text conversion between Russian ЙЦУКЕН and English QWERTY layouts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConversionDirection {
    RuToEn,
    EnToRu,
}

impl ConversionDirection {
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::RuToEn => Self::EnToRu,
            Self::EnToRu => Self::RuToEn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RuToEn => "ru_to_en",
            Self::EnToRu => "en_to_ru",
        }
    }
}

/// Alphabet a piece of text is written in. Only alphabetic characters count.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Script {
    Latin,
    Cyrillic,
    Mixed,
    Other,
}

// Physical key inversion between EN (US QWERTY) and RU (ЙЦУКЕН).
//
// Letters are stored lowercase only; the case of the typed letter is
// re-applied after lookup. Keys whose shifted form is not the uppercase of
// the unshifted one live in the shift table.
const EN_UNSHIFT: &str = "`qwertyuiop[]asdfghjkl;'zxcvbnm,./";
const RU_UNSHIFT: &str = "ёйцукенгшщзхъфывапролджэячсмитьбю.";

const EN_SHIFT: &str = "~{}:\"<>?";
const RU_SHIFT: &str = "ЁХЪЖЭБЮ,";

// Digit row (Shift+1..=Shift+=) differs on RU layout.
const EN_DIGIT_SHIFT: &str = "!@#$%^&*()_+";
const RU_DIGIT_SHIFT: &str = "!\"№;%:?*()_+";

const fn is_latin_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

fn is_cyrillic_letter(ch: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&ch) && ch.is_alphabetic()
}

fn map_by_table(ch: char, from: &str, to: &str) -> Option<char> {
    from.chars().zip(to.chars()).find_map(|(f, t)| (f == ch).then_some(t))
}

fn map_letter_case_insensitive(ch: char, from: &str, to: &str) -> Option<char> {
    if !ch.is_uppercase() {
        return None;
    }
    let mut lower = ch.to_lowercase();
    let (Some(l), None) = (lower.next(), lower.next()) else {
        return None;
    };
    let mapped = map_by_table(l, from, to)?;
    if !mapped.is_alphabetic() {
        return None;
    }
    let mut upper = mapped.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

fn map_char(ch: char, direction: ConversionDirection) -> char {
    let (digit_from, digit_to, shift_from, shift_to, unshift_from, unshift_to) = match direction {
        ConversionDirection::EnToRu => (
            EN_DIGIT_SHIFT,
            RU_DIGIT_SHIFT,
            EN_SHIFT,
            RU_SHIFT,
            EN_UNSHIFT,
            RU_UNSHIFT,
        ),
        ConversionDirection::RuToEn => (
            RU_DIGIT_SHIFT,
            EN_DIGIT_SHIFT,
            RU_SHIFT,
            EN_SHIFT,
            RU_UNSHIFT,
            EN_UNSHIFT,
        ),
    };

    // order matters: digit-shift first, then shifted symbols, then plain keys
    map_by_table(ch, digit_from, digit_to)
        .or_else(|| map_by_table(ch, shift_from, shift_to))
        .or_else(|| map_by_table(ch, unshift_from, unshift_to))
        .or_else(|| map_letter_case_insensitive(ch, unshift_from, unshift_to))
        .unwrap_or(ch)
}

/// Returns true if the physical key that produced `ch` yields a letter in either layout.
///
/// `,` is `б` on ЙЦУКЕН and `ж` is `;` on QWERTY, so both belong to words.
#[must_use]
pub fn maps_to_letter(ch: char) -> bool {
    if ch.is_alphabetic() {
        return true;
    }
    map_char(ch, ConversionDirection::EnToRu).is_alphabetic()
        || map_char(ch, ConversionDirection::RuToEn).is_alphabetic()
}

#[must_use]
pub fn detect_script(text: &str) -> Script {
    let mut has_latin = false;
    let mut has_cyrillic = false;
    for ch in text.chars().filter(|c| c.is_alphabetic()) {
        if is_cyrillic_letter(ch) {
            has_cyrillic = true;
        } else {
            has_latin = true;
        }
    }
    match (has_latin, has_cyrillic) {
        (true, true) => Script::Mixed,
        (true, false) => Script::Latin,
        (false, true) => Script::Cyrillic,
        (false, false) => Script::Other,
    }
}

fn letter_counts(text: &str) -> (usize, usize) {
    let mut cyr = 0usize;
    let mut lat = 0usize;
    for ch in text.chars() {
        if is_cyrillic_letter(ch) {
            cyr += 1;
        } else if is_latin_letter(ch) {
            lat += 1;
        }
    }
    (cyr, lat)
}

/// Returns a conversion direction based on letter balance.
///
/// If the counts are tied (including zero letters), returns `None`.
#[must_use]
pub fn conversion_direction_for_text(text: &str) -> Option<ConversionDirection> {
    let (cyr, lat) = letter_counts(text);
    match cyr.cmp(&lat) {
        std::cmp::Ordering::Greater => Some(ConversionDirection::RuToEn),
        std::cmp::Ordering::Less => Some(ConversionDirection::EnToRu),
        std::cmp::Ordering::Equal => None,
    }
}

/// Returns the direction in which more of the typed keys become letters.
///
/// Used for tokens without letters: `` `; `` is `ёж` on ЙЦУКЕН, so it maps
/// `EnToRu`. Returns `None` on a tie, including when no key yields a letter.
#[must_use]
pub fn conversion_direction_by_keys(text: &str) -> Option<ConversionDirection> {
    let letters = |direction| {
        text.chars()
            .filter(|&ch| map_char(ch, direction).is_alphabetic())
            .count()
    };
    let to_ru = letters(ConversionDirection::EnToRu);
    let to_en = letters(ConversionDirection::RuToEn);
    match to_ru.cmp(&to_en) {
        std::cmp::Ordering::Greater => Some(ConversionDirection::EnToRu),
        std::cmp::Ordering::Less => Some(ConversionDirection::RuToEn),
        std::cmp::Ordering::Equal => None,
    }
}

/// Converts text between English QWERTY and Russian ЙЦУКЕН keyboard layouts in the given direction.
#[must_use]
pub fn convert_with_direction(text: &str, direction: ConversionDirection) -> String {
    // `text.len()` is in bytes. For En->Ru conversions, the output is commonly UTF-8 Cyrillic
    // (2 bytes per character), so we pre-allocate a bit more to avoid reallocations.
    let mut out = match direction {
        ConversionDirection::RuToEn => String::with_capacity(text.len()),
        ConversionDirection::EnToRu => String::with_capacity(text.len().saturating_mul(2)),
    };
    out.extend(text.chars().map(|ch| map_char(ch, direction)));
    out
}

/// Auto-detects the direction from letter balance (falls back to `RuToEn` on ties).
#[must_use]
pub fn convert_auto(text: &str) -> String {
    let direction = conversion_direction_for_text(text).unwrap_or(ConversionDirection::RuToEn);
    convert_with_direction(text, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_aligned() {
        assert_eq!(EN_UNSHIFT.chars().count(), RU_UNSHIFT.chars().count());
        assert_eq!(EN_SHIFT.chars().count(), RU_SHIFT.chars().count());
        assert_eq!(EN_DIGIT_SHIFT.chars().count(), RU_DIGIT_SHIFT.chars().count());
    }

    #[test]
    fn every_table_entry_inverts() {
        for direction in [ConversionDirection::EnToRu, ConversionDirection::RuToEn] {
            let sources = match direction {
                ConversionDirection::EnToRu => [EN_UNSHIFT, EN_SHIFT, EN_DIGIT_SHIFT],
                ConversionDirection::RuToEn => [RU_UNSHIFT, RU_SHIFT, RU_DIGIT_SHIFT],
            };
            for ch in sources.iter().flat_map(|s| s.chars()) {
                let there = map_char(ch, direction);
                assert_eq!(map_char(there, direction.reverse()), ch, "key {ch:?}");
            }
        }
    }

    #[test]
    fn ru_digit_row_symbols_return_after_script_chosen_roundtrip() {
        for sym in ['"', ';', ':', '?', '№'] {
            let word = format!("да{sym}");
            let there = convert_with_direction(&word, ConversionDirection::RuToEn);
            assert_eq!(detect_script(&there), Script::Latin, "word {word:?}");
            let back = convert_with_direction(&there, ConversionDirection::EnToRu);
            assert_eq!(back, word);
        }
    }

    #[test]
    fn keys_decide_direction_for_tokens_without_letters() {
        assert_eq!(
            conversion_direction_by_keys("`;"),
            Some(ConversionDirection::EnToRu)
        );
        assert_eq!(
            conversion_direction_by_keys(",."),
            Some(ConversionDirection::EnToRu)
        );
        assert_eq!(conversion_direction_by_keys("123"), None);
        assert_eq!(conversion_direction_by_keys(""), None);
    }

    #[test]
    fn uppercase_letters_keep_case() {
        assert_eq!(map_char('G', ConversionDirection::EnToRu), 'П');
        assert_eq!(map_char('Д', ConversionDirection::RuToEn), 'L');
        assert_eq!(map_char('Ж', ConversionDirection::RuToEn), ':');
        assert_eq!(map_char('Ё', ConversionDirection::RuToEn), '~');
    }

    #[test]
    fn letter_keys_are_word_chars() {
        assert!(maps_to_letter(','));
        assert!(maps_to_letter(';'));
        assert!(maps_to_letter('['));
        assert!(maps_to_letter('ж'));
        assert!(!maps_to_letter('/'));
        assert!(!maps_to_letter('?'));
        assert!(!maps_to_letter(' '));
        assert!(!maps_to_letter('7'));
    }

    #[test]
    fn script_detection() {
        assert_eq!(detect_script("hello"), Script::Latin);
        assert_eq!(detect_script("Мир"), Script::Cyrillic);
        assert_eq!(detect_script("helloМир"), Script::Mixed);
        assert_eq!(detect_script("123,."), Script::Other);
        assert_eq!(detect_script(""), Script::Other);
    }
}
