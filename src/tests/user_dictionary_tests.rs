use std::fs;

use crate::{
    CorrectionEngine,
    config::Config,
    conversion::TranscriptInjector,
    dictionary::{Lexicon, UserDictionary},
    domain::{ActionOutcome, SkipReason, Span},
};

fn write_lists(dir: &std::path::Path) {
    fs::write(dir.join("en_words.txt"), "hello\nworld\n\n").unwrap();
    fs::write(dir.join("ru_words.txt"), "привет\nмир\n").unwrap();
}

#[test]
fn lexicon_loads_word_lists_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_lists(dir.path());

    let lexicon = Lexicon::load(dir.path(), UserDictionary::new());
    let stats = lexicon.stats();
    assert_eq!(stats.en_base, 2);
    assert_eq!(stats.ru_base, 2);
    assert_eq!(lexicon.recognizes("Привет"), Some("ru"));
    assert_eq!(lexicon.recognizes("world!"), Some("en"));
}

#[test]
fn learned_words_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    write_lists(dir.path());
    let user_path = dir.path().join("user_words.json");
    let config = Config::default();

    {
        let user = UserDictionary::open(&user_path).with_flush_interval(config.flush_interval);
        let lexicon = Lexicon::load(dir.path(), user);
        let mut engine = CorrectionEngine::new(lexicon, TranscriptInjector::new(), &config);
        for _ in 0..3 {
            engine.on_word_completed("kubectl", Span::new(0, 7), "wt.exe");
        }
        engine.on_word_completed("grep", Span::new(0, 4), "wt.exe");
        engine.flush().unwrap();
    }

    let user = UserDictionary::open(&user_path);
    assert!(user.is_promoted("kubectl"));
    assert_eq!(user.count("grep"), 1);

    let lexicon = Lexicon::load(dir.path(), user);
    let stats = lexicon.stats();
    assert_eq!(stats.user_known, 1);
    assert_eq!(stats.learning, 1);

    let mut engine = CorrectionEngine::new(
        lexicon,
        TranscriptInjector::with_text("kubectl"),
        &config,
    );
    assert_eq!(
        engine.on_word_completed("kubectl", Span::new(0, 7), "wt.exe"),
        ActionOutcome::Skipped(SkipReason::AlreadyCorrect)
    );
}

#[test]
fn corrupt_user_dictionary_does_not_block_startup() {
    let dir = tempfile::tempdir().unwrap();
    let user_path = dir.path().join("user_words.json");
    fs::write(&user_path, "[1, 2, 3]").unwrap();

    let lexicon = Lexicon::load(dir.path(), UserDictionary::open(&user_path));
    let stats = lexicon.stats();
    assert_eq!(stats, Default::default());
}
