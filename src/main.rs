use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use ruswitch::{
    CorrectionEngine,
    config::{self, Config, Hotkey, HotkeyAction},
    conversion::TranscriptInjector,
    dictionary::{Lexicon, UserDictionary},
    domain::ActionOutcome,
    input::WordBuffer,
    util::init_tracing,
};

#[derive(Parser)]
#[command(
    name = "ruswitch",
    version,
    about = "Fixes words typed in the wrong keyboard layout (QWERTY / JCUKEN)"
)]
struct Cli {
    #[arg(short, long, help = "Path to config.toml")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Directory with en_words.txt and ru_words.txt")]
    dict_dir: Option<PathBuf>,

    #[arg(short, long, help = "User dictionary file")]
    user_dict: Option<PathBuf>,

    #[arg(short, long, default_value = "console", help = "Process name the text is typed into")]
    process: String,
}

struct Session {
    engine: CorrectionEngine<TranscriptInjector>,
    buffer: WordBuffer,
    config: Config,
    process: String,
}

enum Flow {
    Continue,
    Quit,
}

impl Session {
    fn type_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        for ch in line.chars().chain(std::iter::once('\n')) {
            self.engine.injector_mut().push(ch);
            let Some(done) = self.buffer.feed(ch) else {
                continue;
            };
            let outcome = self
                .engine
                .on_word_completed(&done.word, done.span, &self.process);
            let ActionOutcome::Replaced(r) = &outcome else {
                continue;
            };
            self.buffer.apply_replacement(r.span, &r.text);
            if self.config.show_notification {
                writeln!(out, "  {} -> {}", done.word, r.text)?;
            }
        }
        writeln!(out, "> {}", self.current_line())
    }

    fn current_line(&self) -> &str {
        self.engine
            .injector()
            .as_str()
            .trim_end_matches('\n')
            .rsplit('\n')
            .next()
            .unwrap_or_default()
    }

    fn run_hotkey(&mut self, raw: &str, out: &mut impl Write) -> io::Result<()> {
        let hotkey = match raw.parse::<Hotkey>() {
            Ok(hk) => hk,
            Err(e) => return writeln!(out, "bad hotkey: {e}"),
        };
        let Some(action) = self.config.action_for(&hotkey) else {
            return writeln!(out, "{hotkey} is not bound");
        };
        tracing::debug!(%hotkey, action = action.as_str(), "hotkey");

        match action {
            HotkeyAction::ManualRemap => {
                let Some((word, span)) = self.buffer.last_word() else {
                    return writeln!(out, "nothing to remap");
                };
                match self.engine.on_manual_remap(&word, span, &self.process) {
                    ActionOutcome::Replaced(r) => {
                        self.buffer.apply_replacement(r.span, &r.text);
                        writeln!(out, "  {word} -> {}", r.text)?;
                    }
                    other => writeln!(out, "  {other:?}")?,
                }
            }
            HotkeyAction::ToggleAuto => {
                let enabled = self.engine.toggle();
                if self.config.show_notification {
                    let state = if enabled { "on" } else { "off" };
                    writeln!(out, "auto correction {state}")?;
                }
            }
            HotkeyAction::UndoLast => match self.engine.undo_last() {
                Ok(record) => {
                    self.buffer
                        .apply_replacement(record.corrected_span(), &record.original);
                    writeln!(out, "  {} -> {}", record.corrected, record.original)?;
                }
                Err(e) => writeln!(out, "  {e}")?,
            },
        }
        writeln!(out, "> {}", self.current_line())
    }

    fn run_command(&mut self, cmd: &str, out: &mut impl Write) -> io::Result<Flow> {
        let (name, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
        let arg = arg.trim();
        match name {
            "key" => self.run_hotkey(arg, out)?,
            "process" => {
                self.process = arg.to_string();
                self.buffer.invalidate();
                let excluded = self.engine.is_excluded(arg);
                writeln!(out, "process: {arg} (excluded: {excluded})")?;
            }
            "add" => {
                self.engine.add_word(arg);
                writeln!(out, "added {arg}")?;
            }
            "remove" => {
                let removed = self.engine.remove_word(arg);
                writeln!(out, "removed {arg}: {removed}")?;
            }
            "words" => {
                for word in self.engine.lexicon().user().words() {
                    writeln!(out, "{word}")?;
                }
            }
            "stats" => {
                let s = self.engine.lexicon().stats();
                writeln!(
                    out,
                    "en: {}, ru: {}, user: {}, learning: {}",
                    s.en_base, s.ru_base, s.user_known, s.learning
                )?;
            }
            "show" => writeln!(out, "{}", self.engine.injector().as_str())?,
            "quit" | "q" => return Ok(Flow::Quit),
            _ => writeln!(
                out,
                "commands: :key <hotkey>, :process <name>, :add <word>, :remove <word>, :words, :stats, :show, :quit"
            )?,
        }
        Ok(Flow::Continue)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = config::data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("logs"));
    init_tracing(&log_dir);

    let mut cfg = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    }
    .context("failed to load config")?;

    if let Some(dir) = cli.dict_dir {
        cfg.dictionary_dir = Some(dir);
    }
    if let Some(path) = cli.user_dict {
        cfg.user_dictionary_path = Some(path);
    }

    let user_path = cfg
        .user_dictionary_path()
        .context("failed to resolve user dictionary path")?;
    let user = UserDictionary::open(&user_path).with_flush_interval(cfg.flush_interval);
    let lexicon = Lexicon::load(&cfg.dictionary_dir(), user);

    let mut session = Session {
        engine: CorrectionEngine::new(lexicon, TranscriptInjector::new(), &cfg),
        buffer: WordBuffer::default(),
        config: cfg,
        process: cli.process,
    };

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if let Some(cmd) = line.strip_prefix(':') {
            if let Flow::Quit = session.run_command(cmd.trim(), &mut out)? {
                break;
            }
            continue;
        }
        session.type_line(&line, &mut out)?;
    }

    session
        .engine
        .flush()
        .context("failed to save user dictionary")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ruswitch::dictionary::{Language, WordList};

    use super::*;

    fn session(show_notification: bool) -> Session {
        let config = Config {
            show_notification,
            ..Default::default()
        };
        let lexicon = Lexicon::new(
            WordList::from_words(Language::English, ["hello"]),
            WordList::from_words(Language::Russian, ["привет"]),
            UserDictionary::new(),
        );
        Session {
            engine: CorrectionEngine::new(lexicon, TranscriptInjector::new(), &config),
            buffer: WordBuffer::default(),
            config,
            process: "console".into(),
        }
    }

    fn typed(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        session.type_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn correction_notice_follows_show_notification() {
        let out = typed(&mut session(true), "ghbdtn");
        assert_eq!(out, "  ghbdtn -> привет\n> привет\n");

        let out = typed(&mut session(false), "ghbdtn");
        assert_eq!(out, "> привет\n");
    }

    #[test]
    fn undo_hotkey_restores_the_line() {
        let mut session = session(false);
        typed(&mut session, "ghbdtn");
        let mut out = Vec::new();
        session.run_command("key ctrl+z", &mut out).unwrap();
        assert_eq!(session.current_line(), "ghbdtn");
    }
}
