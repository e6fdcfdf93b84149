use ruswitch_core::{CasePattern, ConversionDirection, Word, convert_auto, convert_with_direction};

fn remap(s: &str) -> String {
    Word::new(s).remap().text().to_string()
}

#[test]
fn linux_roundtrip_all_cases() {
    assert_eq!(remap("Linux"), "Дштгч");
    assert_eq!(remap("Дштгч"), "Linux");

    assert_eq!(remap("linux"), "дштгч");
    assert_eq!(remap("дштгч"), "linux");

    assert_eq!(remap("LiNuX"), "ДшТгЧ");
    assert_eq!(remap("ДшТгЧ"), "LiNuX");
}

#[test]
fn hello_typed_on_russian_layout() {
    assert_eq!(remap("руддщ"), "hello");
    assert_eq!(remap("Руддщ"), "Hello");
    assert_eq!(remap("РУДДЩ"), "HELLO");
}

#[test]
fn punctuation_bottom_row_physical_mapping() {
    let en_to_ru = |s| convert_with_direction(s, ConversionDirection::EnToRu);
    let ru_to_en = |s| convert_with_direction(s, ConversionDirection::RuToEn);

    assert_eq!(en_to_ru(".,/"), "юб.");
    assert_eq!(en_to_ru("<>?"), "БЮ,");
    assert_eq!(en_to_ru(";:'\""), "жЖэЭ");

    assert_eq!(ru_to_en("юб."), ".,/");
    assert_eq!(ru_to_en("БЮ,"), "<>?");
    assert_eq!(ru_to_en("жЖэЭ"), ";:'\"");
}

#[test]
fn digit_row_shift_symbols_mapping() {
    assert_eq!(
        convert_with_direction("@#$%^&", ConversionDirection::EnToRu),
        "\"№;%:?"
    );
    assert_eq!(
        convert_with_direction("\"№;%:?", ConversionDirection::RuToEn),
        "@#$%^&"
    );
}

#[test]
fn digits_pass_through() {
    assert_eq!(remap("abc123"), "фис123");
    assert_eq!(convert_auto("2024"), "2024");
}

#[test]
fn involution_on_common_samples() {
    let samples = [
        "Linux", "Дштгч", "linux", "ghbdtn", "GHBDTN", "Ghbdtn", "привет", "ПРИВЕТ", "Жук",
        "j,kfrf", "ёлка", "Ёлка", "ghbdtn!!!", "привет???",
    ];

    for s in samples {
        assert_eq!(remap(&remap(s)), s, "sample {s:?}");
    }
}

#[test]
fn case_pattern_survives_letter_to_letter_remap() {
    let samples = ["hello", "Hello", "HELLO", "привет", "Привет", "ПРИВЕТ", "hElLo"];
    for s in samples {
        let w = Word::new(s);
        assert_eq!(w.remap().case(), w.case(), "sample {s:?}");
    }
    assert_eq!(Word::new("Hello").case(), CasePattern::Capitalized);
}

fn en_keys() -> Vec<char> {
    ('a'..='z')
        .chain('A'..='Z')
        .chain("`[];',.~{}:\"<>".chars())
        .collect()
}

fn ru_letters() -> Vec<char> {
    ('а'..='я')
        .chain('А'..='Я')
        .chain(['ё', 'Ё'])
        .collect()
}

#[test]
fn every_two_key_word_remaps_back() {
    for keys in [en_keys(), ru_letters()] {
        for &a in &keys {
            for &b in &keys {
                let word: String = [a, b].into_iter().collect();
                assert_eq!(remap(&remap(&word)), word, "word {word:?}");
            }
        }
    }
}

#[test]
fn russian_words_typed_as_punctuation_keys() {
    assert_eq!(remap("ёж"), "`;");
    assert_eq!(remap("`;"), "ёж");
    assert_eq!(remap(",."), "бю");
}
